//! Static token resolver for development and end-to-end tests.

use std::collections::HashMap;

use async_trait::async_trait;
use auth_delegate_sdk::{AuthDelegateError, IdentityRecord, TokenResolverClient};

use crate::config::StaticTokenMapping;

/// Resolves tokens from a fixed in-memory table. Unknown tokens are `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, IdentityRecord>,
}

impl StaticTokenResolver {
    #[must_use]
    pub fn from_mappings(mappings: &[StaticTokenMapping]) -> Self {
        let tokens = mappings
            .iter()
            .map(|m| {
                let record = IdentityRecord {
                    token_id: m.token.clone(),
                    caller_id: m.caller_id,
                    client_id: m.client_id,
                };
                (m.token.clone(), record)
            })
            .collect();
        Self { tokens }
    }
}

#[async_trait]
impl TokenResolverClient for StaticTokenResolver {
    async fn resolve(&self, token_id: &str) -> Result<IdentityRecord, AuthDelegateError> {
        self.tokens
            .get(token_id)
            .cloned()
            .ok_or_else(|| AuthDelegateError::NotFound("access token not found".to_owned()))
    }
}
