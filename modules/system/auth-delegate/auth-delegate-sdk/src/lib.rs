//! Auth Delegate SDK
//!
//! Public contract of the `auth_delegate` module:
//!
//! - [`TokenResolverClient`] - trait for resolving a token id into an identity
//! - [`IdentityRecord`], [`AuthOutcome`] - models
//! - [`AuthDelegateError`] - error type
//! - [`is_public`], [`get_caller_id`], [`get_client_id`] - read side of the
//!   trusted header contract, for downstream handlers
//! - [`RequestContext`] - request carrier abstraction over `http` types
//!
//! ## Usage
//!
//! ```ignore
//! use auth_delegate_sdk::{get_caller_id, is_public};
//!
//! if !is_public(Some(&request)) {
//!     let caller = get_caller_id(Some(&request));
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod context;
pub mod error;
pub mod headers;
pub mod models;

pub use api::TokenResolverClient;
pub use context::RequestContext;
pub use error::AuthDelegateError;
pub use headers::{
    HEADER_X_CALLER_ID, HEADER_X_CLIENT_ID, HEADER_X_PUBLIC, PARAM_ACCESS_TOKEN, get_caller_id,
    get_client_id, is_public,
};
pub use models::{AuthOutcome, IdentityRecord};
