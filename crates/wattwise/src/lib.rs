//! Top-level facade crate for Wattwise.
//!
//! Re-exports the metrics core and the session gateway so users can depend on a single crate.

pub mod core {
    pub use wattwise_core::*;
}

pub mod gateway {
    pub use wattwise_gateway::*;
}
