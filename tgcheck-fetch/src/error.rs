//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for probe network and parse operations.
///
/// These never reach API callers directly; probes fold them into an
/// `error` or `unknown` classification.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport error.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// Upstream answered with an unexpected status code.
    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    /// Response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The Fragment landing page carried no API hash.
    #[error("API hash not found on Fragment landing page")]
    HashNotFound,

    /// Retry budget exhausted.
    #[error("gave up after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The last error seen.
        #[source]
        source: Box<FetchError>,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FetchError {
    /// Returns true if the underlying failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Http(HttpError::Timeout) => true,
            Self::RetriesExhausted { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Returns true if repeating the request may succeed.
    ///
    /// Transport failures and 5xx/429 answers are transient; everything
    /// else (missing hash, bad JSON, blocked domain) is not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(HttpError::Timeout | HttpError::Request(_)) => true,
            Self::UpstreamStatus(code) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.into())
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout.
    #[error("Request timeout")]
    Timeout,
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}
