//! The cache itself: an explicit, injectable key→content map
//!
//! Created once at process start and shared via `Arc`; tests inject an
//! isolated instance instead of relying on process-global storage. Writes
//! go through a mutex so concurrent embeddings cannot race duplicate
//! inserts for the same key.

use std::collections::HashMap;
use std::sync::Mutex;

/// Exact-match cache key. All three components participate in equality;
/// there is no normalization and no prefix matching.
///
/// The cache is only sound when `revision` is an immutable commit hash;
/// see the crate-level soundness note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    /// Repository coordinate as `owner/name`.
    pub repo: String,
    /// Revision the content was resolved at.
    pub revision: String,
    /// Path relative to the repository root.
    pub path: String,
}

impl ContentKey {
    pub fn new(
        repo: impl Into<String>,
        revision: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            repo: repo.into(),
            revision: revision.into(),
            path: path.into(),
        }
    }
}

/// Process-wide content cache with no eviction.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: Mutex<HashMap<ContentKey, String>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-match lookup.
    pub fn get(&self, key: &ContentKey) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Insert content for a key. Re-inserting the same key is a no-op in
    /// effect: under the immutability invariant the value cannot differ.
    pub fn set(&self, key: ContentKey, content: String) {
        self.entries.lock().unwrap().insert(key, content);
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
