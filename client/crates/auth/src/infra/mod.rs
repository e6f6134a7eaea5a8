//! Infrastructure Layer
//!
//! External service integrations.

pub mod http;

pub use http::HttpAuthGateway;
