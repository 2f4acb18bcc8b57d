//! Domain layer for the auth delegate.

pub mod error;
pub mod service;

pub use error::DomainError;
pub use service::{AuthDelegate, authenticate_request};
