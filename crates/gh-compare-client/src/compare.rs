//! Compare and pull-request endpoint fetchers
//!
//! One call per operation, no local recovery: any fatal status from the
//! request layer propagates unchanged. A 403 in particular is passed
//! through verbatim: the API does not reliably distinguish "no access"
//! from "bad reference", so no inference is attempted.

use crate::client::RemoteClient;
use crate::error::ClientError;
use crate::types::{ChangedFile, Commit, Comparison, PullRequestRefs, RepoId};
use async_trait::async_trait;
use log::debug;
use serde::Deserialize;

/// The JSON endpoints the review engine consumes, as a trait so the
/// engine can be driven by a canned client in tests.
///
/// Implementations must be `Send + Sync` to allow sharing across tasks.
#[async_trait]
pub trait CompareApi: Send + Sync {
    /// Compare data for `base...head`.
    async fn compare(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
    ) -> Result<Comparison, ClientError>;

    /// The `(base, head)` revision pair and description of a pull request.
    async fn pull_request(
        &self,
        repo: &RepoId,
        number: u64,
    ) -> Result<PullRequestRefs, ClientError>;

    /// A single commit record.
    async fn commit(&self, repo: &RepoId, sha: &str) -> Result<Commit, ClientError>;
}

#[async_trait]
impl CompareApi for RemoteClient {
    async fn compare(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
    ) -> Result<Comparison, ClientError> {
        fetch_comparison(self, repo, base, head).await
    }

    async fn pull_request(
        &self,
        repo: &RepoId,
        number: u64,
    ) -> Result<PullRequestRefs, ClientError> {
        fetch_pull_request(self, repo, number).await
    }

    async fn commit(&self, repo: &RepoId, sha: &str) -> Result<Commit, ClientError> {
        fetch_commit(self, repo, sha).await
    }
}

// Wire shapes of GET /repos/{owner}/{repo}/compare/{base}...{head}.
// Kept private: callers only ever see the domain model.

#[derive(Debug, Deserialize)]
struct CompareResponse {
    #[serde(default)]
    commits: Vec<WireCommit>,
    #[serde(default)]
    files: Vec<ChangedFile>,
}

#[derive(Debug, Deserialize)]
struct WireCommit {
    sha: String,
    #[serde(default)]
    parents: Vec<WireParent>,
    commit: WireCommitDetail,
}

#[derive(Debug, Deserialize)]
struct WireParent {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct WireCommitDetail {
    author: Option<WireAuthor>,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct WireAuthor {
    name: String,
}

impl From<WireCommit> for Commit {
    fn from(wire: WireCommit) -> Self {
        Commit {
            sha: wire.sha,
            parents: wire.parents.into_iter().map(|p| p.sha).collect(),
            author: wire
                .commit
                .author
                .map(|a| a.name)
                .unwrap_or_else(|| "unknown".to_string()),
            message: wire.commit.message,
        }
    }
}

// Wire shape of GET /repos/{owner}/{repo}/pulls/{index}.

#[derive(Debug, Deserialize)]
struct PullResponse {
    base: WireRef,
    head: WireRef,
    #[serde(default)]
    title: String,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireRef {
    sha: String,
}

fn parse<T: serde::de::DeserializeOwned>(
    url: &str,
    value: serde_json::Value,
) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|source| ClientError::Parse {
        url: url.to_string(),
        source,
    })
}

fn compare_path(repo: &RepoId, base: &str, head: &str) -> String {
    format!("/repos/{}/{}/compare/{}...{}", repo.owner, repo.name, base, head)
}

fn pull_path(repo: &RepoId, number: u64) -> String {
    format!("/repos/{}/{}/pulls/{}", repo.owner, repo.name, number)
}

fn commit_path(repo: &RepoId, sha: &str) -> String {
    format!("/repos/{}/{}/commits/{}", repo.owner, repo.name, sha)
}

/// Fetch the compare data for `base...head`.
///
/// Returns the changed files in the API's order and the raw (unordered)
/// commit set for the range. The set may omit merge-excluded commits;
/// linearizing it is the caller's concern.
pub async fn fetch_comparison(
    client: &RemoteClient,
    repo: &RepoId,
    base: &str,
    head: &str,
) -> Result<Comparison, ClientError> {
    let url = client.api_url(&compare_path(repo, base, head));
    let body = client.get_json(&url).await?;
    let response: CompareResponse = parse(&url, body)?;

    debug!(
        "compare {repo} {base}...{head}: {} commits, {} files",
        response.commits.len(),
        response.files.len()
    );

    Ok(Comparison {
        repo: repo.clone(),
        base: base.to_string(),
        head: head.to_string(),
        commits: response.commits.into_iter().map(Commit::from).collect(),
        files: response.files,
    })
}

/// Fetch a single commit record, used to resolve the first parent of a
/// bare commit reference before comparing `parent...sha`.
pub async fn fetch_commit(
    client: &RemoteClient,
    repo: &RepoId,
    sha: &str,
) -> Result<Commit, ClientError> {
    let url = client.api_url(&commit_path(repo, sha));
    let body = client.get_json(&url).await?;
    let wire: WireCommit = parse(&url, body)?;
    Ok(wire.into())
}

/// Resolve a pull request to its `(base, head)` revision pair and title.
pub async fn fetch_pull_request(
    client: &RemoteClient,
    repo: &RepoId,
    number: u64,
) -> Result<PullRequestRefs, ClientError> {
    let url = client.api_url(&pull_path(repo, number));
    let body = client.get_json(&url).await?;
    let response: PullResponse = parse(&url, body)?;

    debug!(
        "pull {repo}#{number}: {}...{}",
        response.base.sha, response.head.sha
    );

    Ok(PullRequestRefs {
        number,
        base_sha: response.base.sha,
        head_sha: response.head.sha,
        title: response.title,
        body: response.body,
    })
}
