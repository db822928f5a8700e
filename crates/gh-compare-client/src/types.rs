//! Domain model for a revision comparison
//!
//! These types are what the rest of the engine works with. They are built
//! from the wire payloads in [`crate::compare`] and are immutable once a
//! comparison has been fetched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A repository coordinate (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoId {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// A commit as reported by the compare endpoint.
///
/// Commits form a DAG via `parents`; the engine only ever follows the
/// first parent (the mainline of the compared range), never the full graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Content hash; immutable and unique within the repository.
    pub sha: String,
    /// Parent hashes in order; the first element is the first parent.
    pub parents: Vec<String>,
    /// Author name.
    pub author: String,
    /// Full commit message; the first line is the summary.
    pub message: String,
}

impl Commit {
    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Abbreviated hash for display.
    pub fn short_sha(&self) -> &str {
        let end = self.sha.len().min(8);
        &self.sha[..end]
    }

    /// First parent hash, absent for a root commit.
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// Change status of one file in a comparison.
///
/// An enumerated tag, validated at the JSON boundary: an unrecognized
/// status string fails the parse rather than being carried as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// File exists only on the head side.
    Added,
    /// File exists only on the base side.
    Removed,
    /// File exists on both sides with different content.
    Modified,
    /// File was moved; the entry carries the new path.
    Renamed,
}

impl FileStatus {
    /// Lowercase tag as shown in file-list rows.
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Removed => "removed",
            FileStatus::Modified => "modified",
            FileStatus::Renamed => "renamed",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One changed file within a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    /// Path relative to the repository root.
    #[serde(rename = "filename")]
    pub path: String,
    /// Change status tag.
    pub status: FileStatus,
    /// Added-line count.
    pub additions: u64,
    /// Removed-line count.
    pub deletions: u64,
}

/// The result of comparing `base...head`: the changed files in API order
/// plus the unordered commit set reported for the range.
///
/// The commit set may omit merge-excluded commits; ordering is
/// reconstructed separately by the ancestry walk in the review engine.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub repo: RepoId,
    /// Base revision of the compared range.
    pub base: String,
    /// Head revision of the compared range.
    pub head: String,
    /// Commits reported between base and head, in no guaranteed order.
    pub commits: Vec<Commit>,
    /// Changed files, preserving the API's ordering.
    pub files: Vec<ChangedFile>,
}

/// Revision pair and description resolved from a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRefs {
    pub number: u64,
    /// SHA of the base side of the PR.
    pub base_sha: String,
    /// SHA of the head side of the PR.
    pub head_sha: String,
    pub title: String,
    pub body: Option<String>,
}
