//! JSON scenario vector loader shared by the pipeline tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::fs;

use serde::Deserialize;

use wattwise_core::protocol::SubmitRecord;
use wattwise_core::{MetricsEngine, Result, SafetyPolicy};

#[derive(Debug, Deserialize)]
pub struct TestVector {
    pub description: String,
    /// Raw submit payloads, appended in order.
    pub records: Vec<serde_json::Value>,
    #[serde(default)]
    pub safety_policy: Option<SafetyPolicy>,
    #[serde(default)]
    pub expect: Option<serde_json::Value>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
}

pub fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

impl TestVector {
    /// Replay every submit payload into a fresh engine, stopping at the first error.
    pub fn replay(&self) -> Result<MetricsEngine> {
        let mut engine = MetricsEngine::new();
        for raw in &self.records {
            let record = SubmitRecord::from_json(&raw.to_string())?.into_record()?;
            engine.append(record)?;
        }
        Ok(engine)
    }
}

/// Float comparison with a relative tolerance.
pub fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}
