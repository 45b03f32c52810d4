//! Submit event payload (JSON).

use serde::Deserialize;

use crate::error::{Result, WattwiseError};
use crate::model::{Month, MonthlyRecord};

/// `{ "month": "Jan", "bill": 2000.0, "rate": 6.0, "units": 300.0 }`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitRecord {
    pub month: Month,
    pub bill: f64,
    /// Currency per kWh (`rateUnit` in older clients).
    #[serde(alias = "rateUnit")]
    pub rate: f64,
    pub units: f64,
}

impl SubmitRecord {
    /// Parse a JSON body.
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s)
            .map_err(|e| WattwiseError::BadRequest(format!("invalid submit json: {e}")))
    }

    /// Convert into a record, rejecting negative or non-finite values.
    pub fn into_record(self) -> Result<MonthlyRecord> {
        let record = MonthlyRecord::new(self.month, self.bill, self.rate, self.units);
        record.validate()?;
        Ok(record)
    }
}
