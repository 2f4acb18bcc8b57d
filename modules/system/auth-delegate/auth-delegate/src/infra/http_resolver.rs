//! HTTP resolver against the remote authorization service.
//!
//! `GET {base_url}{token_id}` answers with the token record. 404 means the
//! token is unknown; any other non-2xx status is an internal failure. The
//! configured timeout covers the whole exchange, body included.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use auth_delegate_sdk::{AuthDelegateError, IdentityRecord, TokenResolverClient};
use bytes::Bytes;
use http::{Request, StatusCode, Uri, header};
use http_body_util::{BodyExt, Collected, Empty, Limited};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::debug;

use crate::domain::DomainError;

/// Token records are small; anything larger is not a record.
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

type HttpsClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// Resolves tokens by calling the authorization service over HTTP(S).
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct HttpTokenResolver {
    client: HttpsClient,
    base_url: String,
    timeout: Duration,
}

impl fmt::Debug for HttpTokenResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTokenResolver")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HttpTokenResolver {
    /// Create a resolver for `base_url`, which must be an absolute http(s) URL.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBaseUrl` if `base_url` does not parse or
    /// lacks an http/https scheme or host.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = base_url.into();
        validate_base_url(&base_url)?;

        let https = HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let client: HttpsClient = Client::builder(TokioExecutor::new()).build(https);

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token_url(&self, token_id: &str) -> String {
        format!("{}{}", self.base_url, urlencoding::encode(token_id))
    }
}

fn validate_base_url(base_url: &str) -> Result<(), DomainError> {
    let invalid = |reason: String| DomainError::InvalidBaseUrl {
        url: base_url.to_owned(),
        reason,
    };

    let uri: Uri = base_url.parse().map_err(|e| invalid(format!("{e}")))?;
    match uri.scheme_str() {
        Some("http" | "https") => {}
        Some(other) => return Err(invalid(format!("unsupported scheme '{other}'"))),
        None => return Err(invalid("missing scheme".to_owned())),
    }
    if uri.authority().is_none() {
        return Err(invalid("missing host".to_owned()));
    }
    Ok(())
}

#[async_trait]
impl TokenResolverClient for HttpTokenResolver {
    async fn resolve(&self, token_id: &str) -> Result<IdentityRecord, AuthDelegateError> {
        let url = self.token_url(token_id);
        let request = Request::get(url.as_str())
            .header(header::ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|e| transport_error(&e))?;

        // Headers and body share one deadline; a stalled body is a timeout too.
        let exchange = async {
            let response = self
                .client
                .request(request)
                .await
                .map_err(|e| transport_error(&e))?;

            let status = response.status();
            debug!(status = status.as_u16(), "authorization service responded");

            if status == StatusCode::NOT_FOUND {
                return Err(AuthDelegateError::NotFound(
                    "access token not found".to_owned(),
                ));
            }
            if status.as_u16() > 299 {
                return Err(AuthDelegateError::Internal("api error".to_owned()));
            }

            Limited::new(response.into_body(), MAX_RESPONSE_BYTES)
                .collect()
                .await
                .map(Collected::to_bytes)
                .map_err(|e| transport_error(&*e))
        };

        let body = tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| {
                AuthDelegateError::Internal(format!(
                    "error when trying to get access token: timed out after {}ms",
                    self.timeout.as_millis()
                ))
            })??;

        serde_json::from_slice::<IdentityRecord>(&body).map_err(|e| {
            AuthDelegateError::Internal(format!(
                "error when trying to unmarshal access token response: {e}"
            ))
        })
    }
}

/// Transport errors keep their source chain; hyper's top-level message alone
/// ("client error (Connect)") says little.
fn transport_error(err: &(dyn StdError + 'static)) -> AuthDelegateError {
    let mut message = format!("error when trying to get access token: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    AuthDelegateError::Internal(message)
}
