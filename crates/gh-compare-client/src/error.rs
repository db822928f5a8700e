//! Error taxonomy for the compare client
//!
//! Three kinds, kept deliberately distinct so callers can tell a remote
//! rejection from a broken transport from a malformed payload:
//!
//! - [`ClientError::Http`]: the server answered with a status the caller
//!   cannot treat as success. Carries the status and the offending URL
//!   verbatim; the GitHub API does not reliably distinguish "not found"
//!   from "unauthorized" for private repositories, so no cause inference
//!   is attempted here or anywhere above.
//! - [`ClientError::Transport`]: the request never produced a response.
//! - [`ClientError::Parse`]: the response was 200 but did not match the
//!   documented shape.

use thiserror::Error;

/// Errors produced by [`crate::RemoteClient`] and the fetch helpers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success HTTP status. Reported verbatim with the URL so the user
    /// can diagnose credential vs. reference problems manually.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// The request failed before a status was available (DNS, TLS, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 200 response whose body did not match the expected JSON shape.
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client itself could not be constructed. Surfaced instead
    /// of degrading to a client without the User-Agent header, which the
    /// API rejects with an unrelated-looking 403.
    #[error("failed to construct HTTP client: {0}")]
    Init(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status carried by this error, if it is an HTTP rejection.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
