//! Framework adapters.

pub mod axum_ext;

pub use axum_ext::{CallerIdentity, auth_delegate_middleware};
