//! Lightweight in-process metrics (dependency-free).
//!
//! Counters and a latency histogram are stored as atomics and rendered in
//! Prometheus text format by the `/metrics` handler.

pub mod metrics;

pub use metrics::{CounterVec, GatewayMetrics, HistogramVec};
