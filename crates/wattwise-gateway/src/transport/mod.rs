//! Transport layer (HTTP/JSON).
//!
//! Exposes the session handlers and the error-to-response mapping they share.

pub mod error;
pub mod http;

pub use error::ApiError;
