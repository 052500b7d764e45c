//! Typed errors for the explorer.

use std::time::Duration;
use thiserror::Error;

/// Client-visible reasons a catalog could not be shown.
///
/// `MissingToken` is decided before any request is made; every other kind is
/// produced by the catalog fetcher after a request was attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("no access token available")]
    MissingToken,
    #[error("request rejected by the server (unauthorized)")]
    Unauthorized,
    #[error("server responded with HTTP {0}")]
    ServerError(u16),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("service unreachable: {0}")]
    NetworkUnreachable(String),
    #[error("catalog document is malformed: {0}")]
    MalformedDocument(String),
}

impl FetchFailure {
    /// What the user should do next. Each kind gets its own guidance.
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::MissingToken => {
                "Authentication required. Sign in to the admin dashboard, or pass --token, then reload."
            }
            Self::Unauthorized => {
                "Your session was rejected. The token may be expired or lack the admin role; sign in again."
            }
            Self::ServerError(_) => {
                "The documentation service returned an error. Check the backend logs and reload."
            }
            Self::Timeout(_) => {
                "The documentation service did not answer in time. It may be overloaded; reload to try again."
            }
            Self::NetworkUnreachable(_) => {
                "Could not reach the documentation service. Check that the backend is running and the service root is correct."
            }
            Self::MalformedDocument(_) => {
                "The documentation service answered with an unexpected document. The backend and explorer versions may not match."
            }
        }
    }

    /// Short stable identifier, used by the HTTP adapter and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::Unauthorized => "unauthorized",
            Self::ServerError(_) => "server_error",
            Self::Timeout(_) => "timeout",
            Self::NetworkUnreachable(_) => "network_unreachable",
            Self::MalformedDocument(_) => "malformed_document",
        }
    }

    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Unauthorized)
    }
}

/// Errors from the persisted key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} is not a JSON object: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard not available: {0}")]
    Unavailable(String),
    #[error("failed to copy: {0}")]
    Write(String),
}

/// A category/endpoint selection that does not exist in the loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("catalog is not loaded")]
    NotLoaded,
    #[error("no category named {0}")]
    UnknownCategory(String),
    #[error("no category at index {0}")]
    CategoryIndex(usize),
    #[error("no endpoint {method} {path} in category {category}")]
    UnknownEndpoint {
        category: String,
        method: String,
        path: String,
    },
    #[error("no endpoint at index {endpoint} in category {category}")]
    EndpointIndex { category: usize, endpoint: usize },
    #[error("more than one endpoint matches {0}; pass --method to disambiguate")]
    Ambiguous(String),
}
