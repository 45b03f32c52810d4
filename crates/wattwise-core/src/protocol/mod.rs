//! Wire payloads accepted from the input layer.
//!
//! Parsing is strict: unknown fields and unknown month names are rejected at
//! deserialization, numeric ranges are checked when the payload is turned into
//! a [`MonthlyRecord`](crate::model::MonthlyRecord).

pub mod submit;

pub use submit::SubmitRecord;
