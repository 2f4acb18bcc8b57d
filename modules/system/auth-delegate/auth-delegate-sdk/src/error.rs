//! Error types for the auth delegate.

use http::StatusCode;
use thiserror::Error;

/// Errors produced while resolving a token into an identity.
///
/// Only two kinds exist. `NotFound` is absorbed by the delegate and never
/// reaches its caller; `Internal` always does.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthDelegateError {
    /// The token id does not resolve to a record at the authorization service.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport failure, unexpected status, or an unreadable response body.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthDelegateError {
    /// HTTP status classification of the failure.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message without the kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::NotFound(msg) | Self::Internal(msg) => msg,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
