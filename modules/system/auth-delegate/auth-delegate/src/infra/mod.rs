//! Token resolver implementations.

pub mod http_resolver;
pub mod static_resolver;

use std::sync::Arc;

use auth_delegate_sdk::TokenResolverClient;
use tracing::{info, warn};

pub use http_resolver::HttpTokenResolver;
pub use static_resolver::StaticTokenResolver;

use crate::config::{AuthDelegateConfig, ResolverMode};
use crate::domain::DomainError;

/// Build the resolver selected by `cfg.mode`.
///
/// # Errors
///
/// Returns `DomainError::InvalidBaseUrl` if `remote` mode is selected with an
/// unusable base URL.
pub fn build_resolver(
    cfg: &AuthDelegateConfig,
) -> Result<Arc<dyn TokenResolverClient>, DomainError> {
    match cfg.mode {
        ResolverMode::Remote => {
            let resolver =
                HttpTokenResolver::new(cfg.auth_service_base_url.clone(), cfg.request_timeout())?;
            info!(
                base_url = %resolver.base_url(),
                timeout_ms = cfg.request_timeout_ms,
                "Using remote token resolver"
            );
            Ok(Arc::new(resolver))
        }
        ResolverMode::StaticTokens => {
            warn!(
                token_count = cfg.tokens.len(),
                "Auth delegate is running with static tokens. Do NOT use this mode in production."
            );
            Ok(Arc::new(StaticTokenResolver::from_mappings(&cfg.tokens)))
        }
    }
}
