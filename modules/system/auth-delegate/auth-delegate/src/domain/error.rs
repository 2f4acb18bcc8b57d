//! Domain errors for the auth delegate.

use auth_delegate_sdk::AuthDelegateError;

/// Internal domain errors.
///
/// These cover wiring failures; resolution failures use the SDK error directly.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid authorization service url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<DomainError> for AuthDelegateError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidBaseUrl { url, reason } => {
                Self::Internal(format!("invalid authorization service url '{url}': {reason}"))
            }
            DomainError::InvalidConfig(reason) => Self::Internal(reason),
        }
    }
}
