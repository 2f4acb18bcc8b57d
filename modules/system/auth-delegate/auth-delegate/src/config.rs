//! Configuration for the auth delegate.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Environment variable prefix, e.g. `AUTH_DELEGATE_AUTH_SERVICE_BASE_URL`.
pub const ENV_PREFIX: &str = "AUTH_DELEGATE_";

/// Auth delegate configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthDelegateConfig {
    /// Which resolver backs token lookups.
    pub mode: ResolverMode,

    /// Prefix the token id is appended to, e.g.
    /// `http://oauth:8080/oauth/access_token/`. The token id is appended
    /// verbatim (after percent-encoding), so keep the trailing slash.
    pub auth_service_base_url: String,

    /// Upper bound for one outbound resolution call.
    pub request_timeout_ms: u64,

    /// Static token-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<StaticTokenMapping>,
}

impl Default for AuthDelegateConfig {
    fn default() -> Self {
        Self {
            mode: ResolverMode::Remote,
            auth_service_base_url: "http://localhost:8080/oauth/access_token/".to_owned(),
            request_timeout_ms: 5_000,
            tokens: Vec::new(),
        }
    }
}

/// Resolver selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResolverMode {
    /// Ask the remote authorization service over HTTP.
    #[default]
    Remote,
    /// Resolve from `tokens`. Development and end-to-end tests only.
    StaticTokens,
}

/// Maps a static token id to an identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StaticTokenMapping {
    pub token: String,
    pub caller_id: i64,
    pub client_id: i64,
}

impl AuthDelegateConfig {
    /// Load configuration: defaults, then the optional YAML file, then
    /// `AUTH_DELEGATE_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be parsed or the merged
    /// configuration fails validation.
    pub fn load(yaml_path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = yaml_path {
            figment = figment.merge(Yaml::file(path));
        }
        let cfg: Self = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidConfig` if the timeout is zero or the base
    /// URL is empty in `remote` mode.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.request_timeout_ms == 0 {
            return Err(DomainError::InvalidConfig(
                "request_timeout_ms must be greater than zero".to_owned(),
            ));
        }
        if self.mode == ResolverMode::Remote && self.auth_service_base_url.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "auth_service_base_url is required in remote mode".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
