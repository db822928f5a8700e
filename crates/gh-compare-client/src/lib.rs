//! GitHub compare API client
//!
//! This crate provides the network layer for reviewing a revision range
//! hosted on GitHub (or a GitHub Enterprise host) without a local clone:
//!
//! - [`RemoteClient`], a thin request layer with explicit status
//!   classification (`200` success, `404` absent for raw content, anything
//!   else fatal). It never retries and never caches.
//! - A typed wire model ([`Commit`], [`ChangedFile`], [`Comparison`]) that is
//!   validated at the JSON boundary; malformed payloads surface as
//!   [`ClientError::Parse`], distinct from HTTP failures.
//! - [`fetch_comparison`] / [`fetch_pull_request`] / [`fetch_commit`], the
//!   JSON endpoints the review engine consumes, also exposed behind the
//!   [`CompareApi`] trait so consumers can be tested against a canned client.
//!
//! Caching is deliberately out of scope here; the `gh-content-cache` crate
//! decorates this client with memoization for immutable content.

pub mod client;
pub mod compare;
pub mod error;
pub mod types;

/// Default REST API base (public GitHub).
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default raw-content base (public GitHub).
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

pub use client::{RawContent, RemoteClient};
pub use compare::{fetch_commit, fetch_comparison, fetch_pull_request, CompareApi};
pub use error::ClientError;
pub use types::{ChangedFile, Commit, Comparison, FileStatus, PullRequestRefs, RepoId};
