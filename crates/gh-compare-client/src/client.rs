//! Request layer with explicit status classification
//!
//! [`RemoteClient`] issues single authenticated GETs and classifies the
//! result for its callers:
//!
//! - JSON endpoints: `200` → parsed body, anything else → fatal
//!   [`ClientError::Http`].
//! - Raw-content endpoints: `200` → [`RawContent::Found`], `404` →
//!   [`RawContent::Absent`] (not an error: an absent file is how additions
//!   and deletions look from the other side of a comparison), anything
//!   else → fatal.
//!
//! The client never retries and never caches; memoization of immutable
//! content lives in the `gh-content-cache` decorator.

use crate::error::ClientError;
use crate::types::RepoId;
use crate::{DEFAULT_API_BASE, DEFAULT_RAW_BASE};
use log::debug;

/// JSON media type requested from the REST endpoints.
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";

/// Result of a raw-content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawContent {
    /// The file exists at that revision.
    Found(Vec<u8>),
    /// The server answered 404: the file does not exist at that revision.
    Absent,
}

/// Authenticated GitHub request client.
///
/// A missing credential is not an error; requests are simply sent
/// unauthenticated, which is sufficient for public repositories.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    token: Option<String>,
    api_base: String,
    raw_base: String,
}

impl RemoteClient {
    /// Create a client against public GitHub.
    pub fn new(token: Option<String>) -> Result<Self, ClientError> {
        Self::with_bases(token, DEFAULT_API_BASE, DEFAULT_RAW_BASE)
    }

    /// Create a client against explicit API and raw-content hosts
    /// (GitHub Enterprise).
    ///
    /// Fails if the underlying HTTP client cannot be built; a client
    /// without the User-Agent header would only fail later with an
    /// unrelated-looking 403 from the API.
    pub fn with_bases(
        token: Option<String>,
        api_base: &str,
        raw_base: &str,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gh-compare-review/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Init)?;
        Ok(Self {
            http,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
        })
    }

    /// Whether a credential is attached to outgoing requests.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for a REST API path (`path` starts with `/`).
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Absolute URL for the raw content of `path` at `revision`.
    pub fn raw_url(&self, repo: &RepoId, revision: &str, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base, repo.owner, repo.name, revision, path
        )
    }

    fn get(&self, url: &str, accept: Option<&str>) -> reqwest::RequestBuilder {
        let mut req = self.http.get(url);
        if let Some(accept) = accept {
            req = req.header(reqwest::header::ACCEPT, accept);
        }
        if let Some(token) = &self.token {
            req = req.header(reqwest::header::AUTHORIZATION, format!("token {token}"));
        }
        req
    }

    /// GET a JSON endpoint. `200` yields the parsed body; every other
    /// status is fatal and reported verbatim with the URL.
    pub async fn get_json(&self, url: &str) -> Result<serde_json::Value, ClientError> {
        debug!("GET {url}");
        let response = self
            .get(url, Some(ACCEPT_JSON))
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| ClientError::Parse {
            url: url.to_string(),
            source,
        })
    }

    /// GET a raw-content endpoint. `404` is classified as [`RawContent::Absent`]
    /// rather than an error; callers render it as empty content.
    pub async fn get_raw(&self, url: &str) -> Result<RawContent, ClientError> {
        debug!("GET (raw) {url}");
        let response = self
            .get(url, None)
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            debug!("absent: {url}");
            return Ok(RawContent::Absent);
        }
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.to_string(),
                source,
            })?;
        Ok(RawContent::Found(body.to_vec()))
    }
}
