//! Auth Delegate Module
//!
//! Delegates request authentication to a remote authorization service.
//! For each inbound request the delegate clears caller-supplied identity
//! headers, skips requests marked `X-Public: true`, resolves the
//! `access_token` query parameter through a [`TokenResolverClient`], and
//! writes the resolved ids back as trusted `X-Caller-Id` / `X-Client-Id`
//! headers.
//!
//! A missing token and a token the service does not know are both
//! "proceed without identity". Only internal failures are errors.
//!
//! [`TokenResolverClient`]: auth_delegate_sdk::TokenResolverClient
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;

pub use api::{CallerIdentity, auth_delegate_middleware};
pub use config::{AuthDelegateConfig, ResolverMode, StaticTokenMapping};
pub use domain::{AuthDelegate, DomainError, authenticate_request};
pub use infra::{HttpTokenResolver, StaticTokenResolver, build_resolver};
