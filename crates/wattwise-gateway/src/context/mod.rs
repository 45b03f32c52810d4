//! Request context types shared across layers.
//!
//! A session id is the only context a request carries; it keys the caller's
//! isolated record list in the session registry.

pub mod session;

pub use session::SessionId;
