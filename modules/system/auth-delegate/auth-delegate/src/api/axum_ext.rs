//! Axum middleware and extractors for the auth delegate.

use std::convert::Infallible;

use auth_delegate_sdk::{AuthDelegateError, get_caller_id, get_client_id};
use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::AuthDelegate;

/// Authentication middleware backed by [`AuthDelegate`].
///
/// For each request:
/// 1. Clears caller-supplied identity headers
/// 2. Skips resolution for requests marked `X-Public: true`
/// 3. Resolves `access_token` and writes `X-Caller-Id` / `X-Client-Id`
/// 4. Forwards the request; unauthenticated requests are forwarded too
///
/// Only an internal resolution failure stops the request.
///
/// ```ignore
/// let app = Router::new()
///     .route("/items", get(handler))
///     .layer(axum::middleware::from_fn_with_state(delegate, auth_delegate_middleware));
/// ```
pub async fn auth_delegate_middleware(
    State(delegate): State<AuthDelegate>,
    mut req: Request,
    next: Next,
) -> Response {
    match delegate.authenticate_request(Some(&mut req)).await {
        Ok(_) => next.run(req).await,
        Err(err) => auth_error_to_response(&err),
    }
}

/// Convert `AuthDelegateError` to an RFC-9457 Problem Details response.
fn auth_error_to_response(err: &AuthDelegateError) -> Response {
    let (status, title, detail) = match err {
        AuthDelegateError::NotFound(_) => (
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Authentication failed",
        ),
        AuthDelegateError::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Internal authentication error",
        ),
    };
    let body = serde_json::json!({
        "type": "about:blank",
        "title": title,
        "status": status.as_u16(),
        "detail": detail,
    });
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        Json(body),
    )
        .into_response()
}

/// Identity written by [`auth_delegate_middleware`].
///
/// Never rejects: ids are `0` when the request proceeded without identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity {
    pub caller_id: i64,
    pub client_id: i64,
}

impl CallerIdentity {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.caller_id != 0
    }
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            caller_id: get_caller_id(Some(&*parts)),
            client_id: get_client_id(Some(&*parts)),
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn internal_error_maps_to_problem_500() {
        let response =
            auth_error_to_response(&AuthDelegateError::Internal("api error".to_owned()));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 500);
        // Upstream detail stays in the logs, not in the response.
        assert!(!json.to_string().contains("api error"));
    }

    #[test]
    fn not_found_maps_to_401() {
        let response = auth_error_to_response(&AuthDelegateError::NotFound("x".to_owned()));
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn extractor_reads_trusted_headers() {
        let (mut parts, ()) = axum::http::Request::builder()
            .header("X-Caller-Id", "42")
            .header("X-Client-Id", "7")
            .body(())
            .unwrap()
            .into_parts();

        let identity = CallerIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(
            identity,
            CallerIdentity {
                caller_id: 42,
                client_id: 7
            }
        );
        assert!(identity.is_authenticated());
    }

    #[tokio::test]
    async fn extractor_defaults_to_anonymous() {
        let (mut parts, ()) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();

        let identity = CallerIdentity::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert!(!identity.is_authenticated());
        assert_eq!(identity.client_id, 0);
    }
}
