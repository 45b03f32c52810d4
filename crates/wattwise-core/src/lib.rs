//! Wattwise core: monthly electricity records and the derived-metrics pipeline.
//!
//! This crate owns the record model, the [`MetricsEngine`](engine::MetricsEngine)
//! that turns a record list into a [`ResultBundle`](report::ResultBundle), the
//! CSV export and the error surface shared with the gateway. It carries no
//! transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input surfaces as `WattwiseError`, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod protocol;
pub mod report;
pub mod safety;

/// Shared result type.
pub use error::{Result, WattwiseError};

pub use engine::MetricsEngine;
pub use model::{Month, MonthlyRecord};
pub use report::{Forecast, ResultBundle, Summary, TableRow, Trend};
pub use safety::{SafetyLevel, SafetyPolicy, SafetyReport};
