//! Resolver decorator over a raw-content fetcher
//!
//! Cache miss → one network call through the [`ContentFetcher`] seam.
//! A 404 ("absent") stores and returns empty content: that is how the
//! missing side of an addition or deletion is represented. A fatal error
//! propagates and stores nothing, so a retry after a transient failure
//! goes back to the network.

use crate::cache::{ContentCache, ContentKey};
use async_trait::async_trait;
use gh_compare_client::{ClientError, RawContent, RemoteClient, RepoId};
use log::debug;
use std::sync::Arc;

/// Seam between the resolver and the network layer.
///
/// Implemented for [`RemoteClient`]; tests substitute a mock that counts
/// calls to verify memoization.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch the raw content of `path` at `revision`, classifying 404 as
    /// [`RawContent::Absent`].
    async fn fetch_raw(
        &self,
        repo: &RepoId,
        revision: &str,
        path: &str,
    ) -> Result<RawContent, ClientError>;
}

#[async_trait]
impl ContentFetcher for RemoteClient {
    async fn fetch_raw(
        &self,
        repo: &RepoId,
        revision: &str,
        path: &str,
    ) -> Result<RawContent, ClientError> {
        let url = self.raw_url(repo, revision, path);
        self.get_raw(&url).await
    }
}

/// Memoizing resolver for file content at a revision.
#[derive(Clone)]
pub struct ContentResolver<F: ContentFetcher> {
    fetcher: F,
    cache: Arc<ContentCache>,
}

impl<F: ContentFetcher> ContentResolver<F> {
    /// Wrap a fetcher with the given (injectable) cache instance.
    pub fn new(fetcher: F, cache: Arc<ContentCache>) -> Self {
        Self { fetcher, cache }
    }

    /// Shared cache handle, for embedding in further sessions.
    pub fn cache(&self) -> Arc<ContentCache> {
        Arc::clone(&self.cache)
    }

    /// Resolve the text of `path` in `repo` at `revision`.
    ///
    /// Absent content (404) resolves to an empty string. Raw bytes are
    /// decoded as UTF-8 lossily; the comparison viewer is text-only.
    pub async fn resolve(
        &self,
        repo: &RepoId,
        revision: &str,
        path: &str,
    ) -> Result<String, ClientError> {
        let key = ContentKey::new(repo.to_string(), revision, path);
        if let Some(content) = self.cache.get(&key) {
            debug!("content cache hit: {repo}@{revision}:{path}");
            return Ok(content);
        }

        debug!("content cache miss: {repo}@{revision}:{path}");
        let content = match self.fetcher.fetch_raw(repo, revision, path).await? {
            RawContent::Found(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            RawContent::Absent => String::new(),
        };
        self.cache.set(key, content.clone());
        Ok(content)
    }
}
