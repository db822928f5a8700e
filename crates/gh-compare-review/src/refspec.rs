//! Review reference parsing
//!
//! Turns the command-line reference into a [`ReviewTarget`] before any
//! network traffic. A malformed reference is a fatal input error, never
//! sent to the API.
//!
//! Accepted forms:
//!
//! - `owner/repo#123` for a pull request
//! - `owner/repo#123@sha` for one commit within a pull request
//! - `owner/repo@sha` for a single commit
//! - `https://github.com/owner/repo/pull/123[/commits/sha]`
//! - `https://github.com/owner/repo/commit/sha`

use anyhow::{bail, Result};
use gh_compare_client::RepoId;
use regex::Regex;
use std::sync::OnceLock;

/// A parsed review reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewTarget {
    /// Review a whole pull request.
    PullRequest { repo: RepoId, number: u64 },
    /// Review a single commit.
    Commit { repo: RepoId, sha: String },
    /// Review one commit in the context of a pull request.
    PullCommit {
        repo: RepoId,
        number: u64,
        sha: String,
    },
}

fn pull_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^https?://[^/]+/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/pull/(\d+)(?:/commits/([0-9a-fA-F]{7,40}))?/?$",
        )
        .unwrap()
    })
}

fn commit_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^https?://[^/]+/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/commit/([0-9a-fA-F]{7,40})/?$",
        )
        .unwrap()
    })
}

fn short_pull_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)#(\d+)(?:@([0-9a-fA-F]{7,40}))?$",
        )
        .unwrap()
    })
}

fn short_commit_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)@([0-9a-fA-F]{7,40})$").unwrap()
    })
}

/// Parse a reference string into a [`ReviewTarget`].
pub fn parse_reference(reference: &str) -> Result<ReviewTarget> {
    let reference = reference.trim();

    if let Some(caps) = pull_url_re().captures(reference) {
        let repo = RepoId::new(&caps[1], &caps[2]);
        let number: u64 = caps[3].parse()?;
        return Ok(match caps.get(4) {
            Some(sha) => ReviewTarget::PullCommit {
                repo,
                number,
                sha: sha.as_str().to_string(),
            },
            None => ReviewTarget::PullRequest { repo, number },
        });
    }

    if let Some(caps) = commit_url_re().captures(reference) {
        return Ok(ReviewTarget::Commit {
            repo: RepoId::new(&caps[1], &caps[2]),
            sha: caps[3].to_string(),
        });
    }

    if let Some(caps) = short_pull_re().captures(reference) {
        let repo = RepoId::new(&caps[1], &caps[2]);
        let number: u64 = caps[3].parse()?;
        return Ok(match caps.get(4) {
            Some(sha) => ReviewTarget::PullCommit {
                repo,
                number,
                sha: sha.as_str().to_string(),
            },
            None => ReviewTarget::PullRequest { repo, number },
        });
    }

    if let Some(caps) = short_commit_re().captures(reference) {
        return Ok(ReviewTarget::Commit {
            repo: RepoId::new(&caps[1], &caps[2]),
            sha: caps[3].to_string(),
        });
    }

    bail!(
        "malformed reference '{reference}' \
         (expected owner/repo#123, owner/repo@sha, or a pull/commit URL)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_pull_reference() {
        assert_eq!(
            parse_reference("rust-lang/cargo#123").unwrap(),
            ReviewTarget::PullRequest {
                repo: RepoId::new("rust-lang", "cargo"),
                number: 123
            }
        );
    }

    #[test]
    fn test_short_commit_reference() {
        assert_eq!(
            parse_reference("o/r@deadbeefcafe").unwrap(),
            ReviewTarget::Commit {
                repo: RepoId::new("o", "r"),
                sha: "deadbeefcafe".to_string()
            }
        );
    }

    #[test]
    fn test_commit_within_pull_reference() {
        assert_eq!(
            parse_reference("o/r#7@deadbeef").unwrap(),
            ReviewTarget::PullCommit {
                repo: RepoId::new("o", "r"),
                number: 7,
                sha: "deadbeef".to_string()
            }
        );
    }

    #[test]
    fn test_pull_url() {
        assert_eq!(
            parse_reference("https://github.com/rust-lang/cargo/pull/42").unwrap(),
            ReviewTarget::PullRequest {
                repo: RepoId::new("rust-lang", "cargo"),
                number: 42
            }
        );
    }

    #[test]
    fn test_pull_commit_url() {
        assert_eq!(
            parse_reference("https://github.com/o/r/pull/42/commits/abcdef012345").unwrap(),
            ReviewTarget::PullCommit {
                repo: RepoId::new("o", "r"),
                number: 42,
                sha: "abcdef012345".to_string()
            }
        );
    }

    #[test]
    fn test_commit_url() {
        assert_eq!(
            parse_reference("https://github.com/o/r/commit/abcdef0").unwrap(),
            ReviewTarget::Commit {
                repo: RepoId::new("o", "r"),
                sha: "abcdef0".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_references_are_rejected() {
        for bad in [
            "",
            "not a ref",
            "owner/repo",
            "owner/repo#",
            "owner/repo#abc",
            "owner/repo@notahexsha!",
            "https://github.com/owner/repo",
            "owner/repo@ab", // too short for a sha
        ] {
            assert!(parse_reference(bad).is_err(), "accepted: {bad}");
        }
    }
}
