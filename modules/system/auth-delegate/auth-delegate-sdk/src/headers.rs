//! Trust-boundary headers and the read side of the identity contract.
//!
//! The classifier and the identity accessors are best-effort reads. They never
//! fail: anything missing or malformed degrades to "public" or `0`.

use http::HeaderMap;

use crate::context::RequestContext;

/// Marks a request as not requiring authentication when equal to `"true"`.
pub const HEADER_X_PUBLIC: &str = "x-public";

/// Trusted header carrying the resolved client (application) id.
pub const HEADER_X_CLIENT_ID: &str = "x-client-id";

/// Trusted header carrying the resolved caller (user) id.
pub const HEADER_X_CALLER_ID: &str = "x-caller-id";

/// Query parameter holding the opaque token identifier.
pub const PARAM_ACCESS_TOKEN: &str = "access_token";

/// Returns `true` if the request is explicitly marked public.
///
/// A missing request is treated as public: there is nothing to protect.
/// Otherwise the `X-Public` header must be present and exactly `true`
/// (case-sensitive).
#[must_use]
pub fn is_public<R: RequestContext + ?Sized>(request: Option<&R>) -> bool {
    request.is_none_or(|req| {
        req.headers()
            .get(HEADER_X_PUBLIC)
            .is_some_and(|value| value.as_bytes() == b"true")
    })
}

/// Caller id set by a previous authentication pass, or `0`.
#[must_use]
pub fn get_caller_id<R: RequestContext + ?Sized>(request: Option<&R>) -> i64 {
    request.map_or(0, |req| read_id(req.headers(), HEADER_X_CALLER_ID))
}

/// Client id set by a previous authentication pass, or `0`.
#[must_use]
pub fn get_client_id<R: RequestContext + ?Sized>(request: Option<&R>) -> i64 {
    request.map_or(0, |req| read_id(req.headers(), HEADER_X_CLIENT_ID))
}

fn read_id(headers: &HeaderMap, name: &str) -> i64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(0)
}
