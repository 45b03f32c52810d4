//! Data model: calendar months and user-submitted monthly records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WattwiseError};

/// kg of CO2 emitted per kWh (regional grid average).
pub const CO2_FACTOR_KG_PER_KWH: f64 = 0.82;

/// kg of CO2 one tree absorbs per year.
pub const TREE_ABSORPTION_KG_PER_YEAR: f64 = 22.0;

/// Flat growth applied to the latest period's units to project the next one.
pub const FORECAST_GROWTH_FACTOR: f64 = 1.05;

/// Calendar month, serialized as its three-letter short name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Calendar index, `Jan = 0 .. Dec = 11`.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// One submitted month's bill/usage/rate entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: Month,
    /// Bill amount (currency).
    pub bill: f64,
    /// Currency per kWh.
    pub rate: f64,
    /// kWh consumed.
    pub units: f64,
}

impl MonthlyRecord {
    pub fn new(month: Month, bill: f64, rate: f64, units: f64) -> Self {
        Self {
            month,
            bill,
            rate,
            units,
        }
    }

    /// Emissions for this record in kg CO2.
    pub fn co2(&self) -> f64 {
        self.units * CO2_FACTOR_KG_PER_KWH
    }

    /// Reject negative or non-finite numeric fields.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("bill", self.bill), ("rate", self.rate), ("units", self.units)] {
            if !value.is_finite() || value < 0.0 {
                return Err(WattwiseError::InvalidRecord(format!(
                    "{field} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
