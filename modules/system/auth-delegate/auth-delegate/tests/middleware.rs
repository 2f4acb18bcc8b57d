#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the auth delegate middleware.
//!
//! These tests verify that:
//! 1. Downstream handlers see identity only from a successful resolution
//! 2. Unauthenticated requests are forwarded, not rejected
//! 3. Internal failures stop the request with a problem response

use std::sync::Arc;

use auth_delegate::{
    AuthDelegate, AuthDelegateConfig, CallerIdentity, ResolverMode, StaticTokenMapping,
    StaticTokenResolver, auth_delegate_middleware,
};
use auth_delegate_sdk::{AuthDelegateError, IdentityRecord, TokenResolverClient};
use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    middleware,
    routing::get,
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Handler that echoes what it sees as the caller identity.
async fn whoami(identity: CallerIdentity) -> Json<Value> {
    Json(json!({
        "caller_id": identity.caller_id,
        "client_id": identity.client_id,
        "authenticated": identity.is_authenticated(),
    }))
}

fn router(delegate: AuthDelegate) -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .layer(middleware::from_fn_with_state(
            delegate,
            auth_delegate_middleware,
        ))
}

fn static_delegate() -> AuthDelegate {
    let cfg = AuthDelegateConfig {
        mode: ResolverMode::StaticTokens,
        tokens: vec![StaticTokenMapping {
            token: "dev-token".to_owned(),
            caller_id: 42,
            client_id: 7,
        }],
        ..AuthDelegateConfig::default()
    };
    AuthDelegate::from_config(&cfg).unwrap()
}

async fn call(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn resolved_identity_reaches_handler() {
    let req = Request::builder()
        .uri("/whoami?access_token=dev-token")
        .body(Body::empty())
        .unwrap();

    let (status, body) = call(router(static_delegate()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["caller_id"], 42);
    assert_eq!(body["client_id"], 7);
    assert_eq!(body["authenticated"], true);
}

#[tokio::test]
async fn spoofed_headers_never_reach_handler() {
    for uri in ["/whoami", "/whoami?access_token=unknown"] {
        let req = Request::builder()
            .uri(uri)
            .header("X-Caller-Id", "1")
            .header("X-Client-Id", "1")
            .body(Body::empty())
            .unwrap();

        let (status, body) = call(router(static_delegate()), req).await;

        assert_eq!(status, StatusCode::OK, "uri {uri}");
        assert_eq!(body["caller_id"], 0, "uri {uri}");
        assert_eq!(body["authenticated"], false, "uri {uri}");
    }
}

#[tokio::test]
async fn public_request_is_forwarded_without_identity() {
    let req = Request::builder()
        .uri("/whoami?access_token=dev-token")
        .header("X-Public", "true")
        .header("X-Caller-Id", "1")
        .body(Body::empty())
        .unwrap();

    let (status, body) = call(router(static_delegate()), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
}

/// Resolver whose backend is always down.
struct FailingResolver;

#[async_trait::async_trait]
impl TokenResolverClient for FailingResolver {
    async fn resolve(&self, _token_id: &str) -> Result<IdentityRecord, AuthDelegateError> {
        Err(AuthDelegateError::Internal("connection refused".to_owned()))
    }
}

#[tokio::test]
async fn internal_failure_returns_problem_response() {
    let delegate = AuthDelegate::new(Arc::new(FailingResolver));
    let req = Request::builder()
        .uri("/whoami?access_token=abc")
        .body(Body::empty())
        .unwrap();

    let response = router(delegate).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let problem: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(problem["title"], "Internal Server Error");
}

#[tokio::test]
async fn internal_failure_is_skipped_for_requests_without_token() {
    let delegate = AuthDelegate::new(Arc::new(FailingResolver));
    let req = Request::builder()
        .uri("/whoami")
        .body(Body::empty())
        .unwrap();

    let (status, body) = call(router(delegate), req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["authenticated"], false);
}

#[tokio::test]
async fn static_resolver_can_be_injected_directly() {
    let resolver = StaticTokenResolver::from_mappings(&[StaticTokenMapping {
        token: "t1".to_owned(),
        caller_id: 3,
        client_id: 4,
    }]);
    let req = Request::builder()
        .uri("/whoami?access_token=t1")
        .body(Body::empty())
        .unwrap();

    let (_, body) = call(router(AuthDelegate::new(Arc::new(resolver))), req).await;

    assert_eq!(body["caller_id"], 3);
    assert_eq!(body["client_id"], 4);
}
