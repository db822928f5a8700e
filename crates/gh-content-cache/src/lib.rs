//! Memoizing content resolver
//!
//! Resolves the text of one file at one revision, caching by the exact
//! `(repository, revision, path)` key. The design follows the decorator
//! pattern: [`ContentResolver`] wraps anything implementing
//! [`ContentFetcher`] and adds memoization, so the network layer stays
//! cache-free and tests can substitute a counting mock.
//!
//! # Soundness
//!
//! Cache entries live for the process lifetime with no invalidation. This
//! is sound only because a commit hash is immutable: the same key can never
//! name different bytes. Callers that pass a mutable revision (a branch or
//! tag name) get whatever was fetched first, a documented hazard of
//! mutable references, not something this crate tries to detect or repair.

pub mod cache;
pub mod resolver;

pub use cache::{ContentCache, ContentKey};
pub use resolver::{ContentFetcher, ContentResolver};
