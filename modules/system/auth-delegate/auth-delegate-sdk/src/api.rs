//! Resolver API trait.
//!
//! The delegate talks to the authorization service only through this trait,
//! so the outbound client can be shared, swapped, or stubbed in tests.

use async_trait::async_trait;

use crate::error::AuthDelegateError;
use crate::models::IdentityRecord;

/// Resolves an opaque token id into an identity record.
#[async_trait]
pub trait TokenResolverClient: Send + Sync {
    /// Resolve `token_id` (already trimmed, never empty).
    ///
    /// # Errors
    ///
    /// - `NotFound` if the token does not resolve to a record
    /// - `Internal` for transport failures, unexpected statuses, or bad payloads
    async fn resolve(&self, token_id: &str) -> Result<IdentityRecord, AuthDelegateError>;
}
