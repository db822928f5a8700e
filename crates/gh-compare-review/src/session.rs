//! Session model
//!
//! One review unit: a description, the fetched [`Comparison`], and the
//! reconstructed first-parent chain. Immutable after construction; the
//! navigator owns the selection cursor, not the session.

use crate::history::linearize;
use gh_compare_client::{ChangedFile, Commit, Comparison, RepoId};

/// The coordinates needed to resolve both sides of one changed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCoordinates {
    pub repo: RepoId,
    pub base: String,
    pub head: String,
    pub path: String,
}

/// A review session over one comparison.
#[derive(Debug, Clone)]
pub struct Session {
    /// Human-readable description shown in the navigator header.
    pub description: String,
    /// The fetched comparison, immutable once constructed.
    pub comparison: Comparison,
    /// First-parent commit chain, oldest-first.
    pub chain: Vec<Commit>,
}

impl Session {
    /// Build a session, reconstructing the commit chain from the
    /// comparison's unordered commit set.
    pub fn new(description: impl Into<String>, comparison: Comparison) -> Self {
        let chain = linearize(&comparison.commits, &comparison.head);
        Self {
            description: description.into(),
            comparison,
            chain,
        }
    }

    /// Changed files in API order.
    pub fn files(&self) -> &[ChangedFile] {
        &self.comparison.files
    }

    /// Coordinates for resolving both sides of the file at `index`.
    pub fn describe_file(&self, index: usize) -> Option<FileCoordinates> {
        let file = self.comparison.files.get(index)?;
        Some(FileCoordinates {
            repo: self.comparison.repo.clone(),
            base: self.comparison.base.clone(),
            head: self.comparison.head.clone(),
            path: file.path.clone(),
        })
    }
}
