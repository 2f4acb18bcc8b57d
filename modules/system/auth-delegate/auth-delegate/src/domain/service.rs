//! Authentication entry point: resolve the request's token and annotate it.

use std::ops::ControlFlow;
use std::sync::Arc;

use auth_delegate_sdk::{
    AuthDelegateError, AuthOutcome, HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID, IdentityRecord,
    PARAM_ACCESS_TOKEN, RequestContext, TokenResolverClient, is_public,
};
use http::{HeaderName, HeaderValue};
use tracing::{debug, error};

use crate::config::AuthDelegateConfig;
use crate::domain::DomainError;
use crate::infra::{HttpTokenResolver, build_resolver};

/// Resolves bearer token references into trusted identity headers.
///
/// Holds no per-request state. One instance can serve any number of
/// concurrent requests; the resolver behind it is shared.
#[derive(Clone)]
pub struct AuthDelegate {
    resolver: Arc<dyn TokenResolverClient>,
}

impl AuthDelegate {
    #[must_use]
    pub fn new(resolver: Arc<dyn TokenResolverClient>) -> Self {
        Self { resolver }
    }

    /// Build a delegate with the resolver selected by `cfg.mode`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the configuration is invalid or the HTTP
    /// client cannot be constructed.
    pub fn from_config(cfg: &AuthDelegateConfig) -> Result<Self, DomainError> {
        cfg.validate()?;
        Ok(Self::new(build_resolver(cfg)?))
    }

    /// Authenticate `request` in place.
    ///
    /// This mutates the caller's request: `X-Client-Id` and `X-Caller-Id` are
    /// always removed, and are written back only from a successful resolution.
    ///
    /// Requests marked public, requests without an `access_token`, and tokens
    /// the authorization service does not know all succeed without identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthDelegateError::Internal` if the authorization service
    /// cannot be reached, answers with an unexpected status, or returns an
    /// unreadable record. `NotFound` is never returned.
    #[tracing::instrument(skip_all)]
    pub async fn authenticate_request<R>(
        &self,
        request: Option<&mut R>,
    ) -> Result<AuthOutcome, AuthDelegateError>
    where
        R: RequestContext + Send + ?Sized,
    {
        let Some(request) = request else {
            return Ok(AuthOutcome::Anonymous);
        };
        let token_id = match token_to_resolve(request) {
            ControlFlow::Continue(token_id) => token_id,
            ControlFlow::Break(outcome) => return Ok(outcome),
        };
        self.resolve_into(request, &token_id).await
    }

    async fn resolve_into<R>(
        &self,
        request: &mut R,
        token_id: &str,
    ) -> Result<AuthOutcome, AuthDelegateError>
    where
        R: RequestContext + Send + ?Sized,
    {
        match self.resolver.resolve(token_id).await {
            Ok(record) => {
                annotate(request, &record);
                debug!(
                    caller_id = record.caller_id,
                    client_id = record.client_id,
                    "identity attached"
                );
                Ok(AuthOutcome::Identified(record))
            }
            Err(AuthDelegateError::NotFound(reason)) => {
                debug!(%reason, "access token not found, proceeding without identity");
                Ok(AuthOutcome::Anonymous)
            }
            Err(err) => {
                error!(error = %err, "access token resolution failed");
                Err(err)
            }
        }
    }
}

/// One-shot form of [`AuthDelegate::authenticate_request`] against
/// `auth_service_base_url`, using the default request timeout.
///
/// Builds a fresh HTTP client per call. Long-lived callers should hold an
/// [`AuthDelegate`] instead.
///
/// # Errors
///
/// Same as [`AuthDelegate::authenticate_request`], plus `Internal` if a token
/// is present and `auth_service_base_url` is not an absolute http(s) URL.
pub async fn authenticate_request<R>(
    auth_service_base_url: &str,
    request: Option<&mut R>,
) -> Result<AuthOutcome, AuthDelegateError>
where
    R: RequestContext + Send + ?Sized,
{
    let Some(request) = request else {
        return Ok(AuthOutcome::Anonymous);
    };
    let token_id = match token_to_resolve(request) {
        ControlFlow::Continue(token_id) => token_id,
        ControlFlow::Break(outcome) => return Ok(outcome),
    };
    // The base URL is only touched once there is a token to resolve.
    let timeout = AuthDelegateConfig::default().request_timeout();
    let resolver = HttpTokenResolver::new(auth_service_base_url, timeout)?;
    AuthDelegate::new(Arc::new(resolver))
        .resolve_into(request, &token_id)
        .await
}

/// Clears caller-set identity, then yields the trimmed token to resolve, or
/// the final outcome for public and tokenless requests.
fn token_to_resolve<R>(request: &mut R) -> ControlFlow<AuthOutcome, String>
where
    R: RequestContext + ?Sized,
{
    clean_request(request);

    if is_public(Some(&*request)) {
        debug!("request marked public, skipping token resolution");
        return ControlFlow::Break(AuthOutcome::Public);
    }

    let token_id = request
        .query_param(PARAM_ACCESS_TOKEN)
        .map(|token| token.trim().to_owned())
        .unwrap_or_default();
    if token_id.is_empty() {
        debug!("no access token supplied, proceeding without identity");
        return ControlFlow::Break(AuthOutcome::Anonymous);
    }
    ControlFlow::Continue(token_id)
}

/// Identity headers are never accepted from the original client.
fn clean_request<R: RequestContext + ?Sized>(request: &mut R) {
    let headers = request.headers_mut();
    headers.remove(HEADER_X_CLIENT_ID);
    headers.remove(HEADER_X_CALLER_ID);
}

fn annotate<R: RequestContext + ?Sized>(request: &mut R, record: &IdentityRecord) {
    let headers = request.headers_mut();
    headers.insert(
        HeaderName::from_static(HEADER_X_CLIENT_ID),
        HeaderValue::from(record.client_id),
    );
    headers.insert(
        HeaderName::from_static(HEADER_X_CALLER_ID),
        HeaderValue::from(record.caller_id),
    );
}
