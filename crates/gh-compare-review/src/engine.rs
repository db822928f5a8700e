//! Session engine
//!
//! Normalizes a [`ReviewTarget`] to `(repository, base, head, description)`,
//! runs the fetch, linearize, session pipeline, and resolves file content
//! for the comparison viewer. Drill-down into a single commit reuses the
//! same pipeline recursively with the commit's first parent as base.
//!
//! The engine is generic over the client so tests can drive it with canned
//! responses. Every network failure propagates unchanged: no retries, and
//! no session is constructed from a failed fetch.

use crate::refspec::ReviewTarget;
use crate::session::{FileCoordinates, Session};
use anyhow::Result;
use gh_compare_client::{CompareApi, PullRequestRefs, RepoId};
use gh_content_cache::{ContentCache, ContentFetcher, ContentResolver};
use log::info;
use std::sync::Arc;

/// The review engine: one client, one shared content cache.
pub struct Engine<C: CompareApi + ContentFetcher + Clone> {
    client: C,
    resolver: ContentResolver<C>,
}

/// PR title with the first non-empty body line folded in, when present.
fn pr_summary(pr: &PullRequestRefs) -> String {
    let first_line = pr
        .body
        .as_deref()
        .and_then(|body| body.lines().map(str::trim).find(|line| !line.is_empty()));
    match first_line {
        Some(line) => format!("{} ({line})", pr.title),
        None => pr.title.clone(),
    }
}

impl<C: CompareApi + ContentFetcher + Clone> Engine<C> {
    /// Build an engine over a client and an injected content cache.
    pub fn new(client: C, cache: Arc<ContentCache>) -> Self {
        let resolver = ContentResolver::new(client.clone(), cache);
        Self { client, resolver }
    }

    /// Open the session for a parsed reference.
    pub async fn open_target(&self, target: &ReviewTarget) -> Result<Session> {
        match target {
            ReviewTarget::PullRequest { repo, number } => {
                let pr = self.client.pull_request(repo, *number).await?;
                let description = format!("{repo}#{number}: {}", pr_summary(&pr));
                self.open_range(repo, &pr.base_sha, &pr.head_sha, description)
                    .await
            }
            ReviewTarget::Commit { repo, sha } => self.open_commit(repo, sha, None).await,
            ReviewTarget::PullCommit { repo, number, sha } => {
                // the PR context only contributes to the description
                let pr = self.client.pull_request(repo, *number).await?;
                let session = self.open_commit(repo, sha, None).await?;
                Ok(Session {
                    description: format!("{repo}#{number} @ {sha}: {}", pr_summary(&pr)),
                    ..session
                })
            }
        }
    }

    /// Fetch, linearize, and build the session for an explicit revision pair.
    pub async fn open_range(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
        description: String,
    ) -> Result<Session> {
        let comparison = self.client.compare(repo, base, head).await?;
        let session = Session::new(description, comparison);
        info!(
            "opened session '{}': {} commits, {} files",
            session.description,
            session.chain.len(),
            session.files().len()
        );
        Ok(session)
    }

    /// Open a single-commit session by comparing first-parent...commit.
    ///
    /// `parent` is taken from already-fetched compare data when drilling
    /// down; for a bare commit reference it is resolved via the commit
    /// endpoint first. A root commit (no parents) is compared against
    /// itself, yielding an empty change set.
    pub async fn open_commit(
        &self,
        repo: &RepoId,
        sha: &str,
        parent: Option<&str>,
    ) -> Result<Session> {
        let (base, summary) = match parent {
            Some(parent) => (parent.to_string(), None),
            None => {
                let commit = self.client.commit(repo, sha).await?;
                (
                    commit
                        .first_parent()
                        .unwrap_or(commit.sha.as_str())
                        .to_string(),
                    Some(commit.summary().to_string()),
                )
            }
        };
        let description = match summary {
            Some(summary) => format!("{repo} @ {sha}: {summary}"),
            None => format!("{repo} @ {sha}"),
        };
        self.open_range(repo, &base, sha, description).await
    }

    /// Resolve both sides of a file comparison, base side first.
    ///
    /// The ordering is deterministic but carries no meaning beyond which
    /// side surfaces an error first. Either side may come back empty
    /// (addition or deletion).
    pub async fn resolve_sides(&self, coords: &FileCoordinates) -> Result<(String, String)> {
        let base = self
            .resolver
            .resolve(&coords.repo, &coords.base, &coords.path)
            .await?;
        let head = self
            .resolver
            .resolve(&coords.repo, &coords.head, &coords.path)
            .await?;
        Ok((base, head))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gh_compare_client::{ChangedFile, ClientError, Commit, Comparison, RawContent};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned client: serves fixed responses and records compare calls.
    #[derive(Clone, Default)]
    struct MockClient {
        pull: Option<PullRequestRefs>,
        commits: HashMap<String, Commit>,
        files: Vec<ChangedFile>,
        raw: HashMap<(String, String), Vec<u8>>,
        compare_calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl MockClient {
        fn compare_calls(&self) -> Vec<(String, String)> {
            self.compare_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompareApi for MockClient {
        async fn compare(
            &self,
            repo: &RepoId,
            base: &str,
            head: &str,
        ) -> Result<Comparison, ClientError> {
            self.compare_calls
                .lock()
                .unwrap()
                .push((base.to_string(), head.to_string()));
            Ok(Comparison {
                repo: repo.clone(),
                base: base.to_string(),
                head: head.to_string(),
                commits: Vec::new(),
                files: self.files.clone(),
            })
        }

        async fn pull_request(
            &self,
            _repo: &RepoId,
            number: u64,
        ) -> Result<PullRequestRefs, ClientError> {
            self.pull.clone().ok_or(ClientError::Http {
                status: 404,
                url: format!("mock://pulls/{number}"),
            })
        }

        async fn commit(&self, _repo: &RepoId, sha: &str) -> Result<Commit, ClientError> {
            self.commits.get(sha).cloned().ok_or(ClientError::Http {
                status: 404,
                url: format!("mock://commits/{sha}"),
            })
        }
    }

    #[async_trait]
    impl ContentFetcher for MockClient {
        async fn fetch_raw(
            &self,
            _repo: &RepoId,
            revision: &str,
            path: &str,
        ) -> Result<RawContent, ClientError> {
            match self.raw.get(&(revision.to_string(), path.to_string())) {
                Some(bytes) => Ok(RawContent::Found(bytes.clone())),
                None => Ok(RawContent::Absent),
            }
        }
    }

    fn repo() -> RepoId {
        RepoId::new("o", "r")
    }

    fn engine(client: MockClient) -> Engine<MockClient> {
        Engine::new(client, Arc::new(ContentCache::new()))
    }

    fn pull(title: &str, body: Option<&str>) -> PullRequestRefs {
        PullRequestRefs {
            number: 7,
            base_sha: "b1".to_string(),
            head_sha: "h1".to_string(),
            title: title.to_string(),
            body: body.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_pull_request_target_compares_its_exact_revision_pair() {
        let client = MockClient {
            pull: Some(pull("Fix it", None)),
            ..MockClient::default()
        };
        let engine = engine(client.clone());

        let target = ReviewTarget::PullRequest { repo: repo(), number: 7 };
        let session = engine.open_target(&target).await.unwrap();

        assert_eq!(client.compare_calls(), vec![("b1".to_string(), "h1".to_string())]);
        assert_eq!(session.comparison.base, "b1");
        assert_eq!(session.comparison.head, "h1");
    }

    #[tokio::test]
    async fn test_pull_request_description_folds_in_first_body_line() {
        let client = MockClient {
            pull: Some(pull("Fix it", Some("\nCloses the race.\n\nDetails follow."))),
            ..MockClient::default()
        };
        let engine = engine(client);

        let target = ReviewTarget::PullRequest { repo: repo(), number: 7 };
        let session = engine.open_target(&target).await.unwrap();
        assert_eq!(session.description, "o/r#7: Fix it (Closes the race.)");
    }

    #[tokio::test]
    async fn test_empty_body_leaves_description_as_title_only() {
        let client = MockClient {
            pull: Some(pull("Fix it", Some("   \n  "))),
            ..MockClient::default()
        };
        let engine = engine(client);

        let target = ReviewTarget::PullRequest { repo: repo(), number: 7 };
        let session = engine.open_target(&target).await.unwrap();
        assert_eq!(session.description, "o/r#7: Fix it");
    }

    #[tokio::test]
    async fn test_bare_commit_target_resolves_first_parent_as_base() {
        let mut commits = HashMap::new();
        commits.insert(
            "h1".to_string(),
            Commit {
                sha: "h1".to_string(),
                parents: vec!["p1".to_string(), "p2".to_string()],
                author: "Ada".to_string(),
                message: "merge work".to_string(),
            },
        );
        let client = MockClient { commits, ..MockClient::default() };
        let engine = engine(client.clone());

        let target = ReviewTarget::Commit { repo: repo(), sha: "h1".to_string() };
        engine.open_target(&target).await.unwrap();

        assert_eq!(client.compare_calls(), vec![("p1".to_string(), "h1".to_string())]);
    }

    #[tokio::test]
    async fn test_drill_down_with_known_parent_skips_the_commit_endpoint() {
        let client = MockClient::default();
        let engine = engine(client.clone());

        engine.open_commit(&repo(), "c2", Some("c1")).await.unwrap();
        assert_eq!(client.compare_calls(), vec![("c1".to_string(), "c2".to_string())]);
    }

    #[tokio::test]
    async fn test_deleted_file_pairs_base_content_with_empty_head() {
        let mut raw = HashMap::new();
        raw.insert(("b1".to_string(), "gone.rs".to_string()), b"old".to_vec());
        let client = MockClient { raw, ..MockClient::default() };
        let engine = engine(client);

        let coords = FileCoordinates {
            repo: repo(),
            base: "b1".to_string(),
            head: "h1".to_string(),
            path: "gone.rs".to_string(),
        };
        let (base, head) = engine.resolve_sides(&coords).await.unwrap();
        assert_eq!(base, "old");
        assert_eq!(head, "");
    }

    #[tokio::test]
    async fn test_failed_pull_lookup_builds_no_session() {
        let engine = engine(MockClient::default());
        let target = ReviewTarget::PullRequest { repo: repo(), number: 7 };
        assert!(engine.open_target(&target).await.is_err());
    }
}
