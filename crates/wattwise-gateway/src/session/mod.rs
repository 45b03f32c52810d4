//! Per-session engine hosting.
//!
//! Every session owns its own `MetricsEngine`; the registry hands out
//! exclusive access per entry, so no two sessions ever share records.

mod registry;
mod sweeper;

pub use registry::SessionRegistry;
pub use sweeper::{spawn_sweeper, sweep_once};
