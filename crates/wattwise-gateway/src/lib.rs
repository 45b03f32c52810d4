//! Wattwise gateway library entry.
//!
//! This crate hosts one `MetricsEngine` per user session behind an HTTP/JSON
//! surface: config, session registry, handlers, ops endpoints and metrics. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod obs;
pub mod ops;
pub mod router;
pub mod session;
pub mod transport;
