//! Error taxonomy for the platform API.

use thiserror::Error;

/// Result alias for direct API calls (queries go through the cache and
/// use [`crate::cache::QueryResult`] instead).
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a fetch or mutation against the platform API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, timeout, TLS, or an
    /// unreadable response body.
    #[error("transport error: {0}")]
    Network(#[from] reqwest::Error),

    /// The identified resource does not exist (or the identifier is
    /// malformed from the server's point of view).
    #[error("resource not found: {path}")]
    NotFound { path: String },

    /// The server rejected a mutation's input.
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// Missing or expired credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success status.
    #[error("unexpected API status {status}: {message}")]
    Api { status: u16, message: String },
}

impl ApiError {
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the failure is a missing resource rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the caller should re-authenticate.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
