//! Result bundle returned by [`MetricsEngine::compute`](crate::engine::MetricsEngine::compute).
//!
//! Every type here is plain data, recomputed from the record list on each call
//! and serialized as-is by the gateway.

use serde::Serialize;

use crate::model::{Month, MonthlyRecord, CO2_FACTOR_KG_PER_KWH, FORECAST_GROWTH_FACTOR};
use crate::safety::SafetyReport;

/// Label of the synthetic forecast row in [`ResultBundle::projection`].
pub const NEXT_PERIOD_LABEL: &str = "Next";

/// One sorted record with its derived CO2 column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub month: Month,
    pub units: f64,
    pub bill: f64,
    pub rate: f64,
    pub co2: f64,
}

impl From<&MonthlyRecord> for TableRow {
    fn from(r: &MonthlyRecord) -> Self {
        Self {
            month: r.month,
            units: r.units,
            bill: r.bill,
            rate: r.rate,
            co2: r.co2(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub record_count: usize,
    pub total_units: f64,
    pub total_bill: f64,
    /// Unweighted mean of `rate` across all records.
    pub avg_rate: f64,
    pub total_co2: f64,
    /// CO2 of the last (sorted) record.
    pub monthly_co2: f64,
    /// Trees needed for a year to absorb `total_co2`.
    pub trees_per_year: f64,
}

/// Direction of usage between the first and last sorted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// `Up` only when `last > first`; ties are `Down`.
    pub fn between(first_units: f64, last_units: f64) -> Self {
        if last_units > first_units {
            Trend::Up
        } else {
            Trend::Down
        }
    }
}

/// Next-period projection at a flat growth factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    pub next_units: f64,
    pub next_bill: f64,
    pub next_co2: f64,
    pub delta_units: f64,
    pub delta_bill: f64,
    pub delta_co2: f64,
}

impl Forecast {
    pub fn from_last(last: &MonthlyRecord) -> Self {
        let next_units = last.units * FORECAST_GROWTH_FACTOR;
        let next_bill = next_units * last.rate;
        let next_co2 = next_units * CO2_FACTOR_KG_PER_KWH;
        Self {
            next_units,
            next_bill,
            next_co2,
            delta_units: next_units - last.units,
            delta_bill: next_bill - last.bill,
            delta_co2: next_co2 - last.co2(),
        }
    }
}

/// Row of the actual-vs-predicted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionRow {
    /// Month short name, or [`NEXT_PERIOD_LABEL`] for the forecast row.
    pub label: String,
    /// Calendar index; 12 for the forecast row.
    pub order: usize,
    pub units: f64,
    pub bill: f64,
    pub rate: f64,
    pub co2: f64,
    pub predicted: bool,
}

/// Percentage share of one row in the column totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShareRow {
    pub month: Month,
    pub units_pct: f64,
    pub bill_pct: f64,
    pub rate_pct: f64,
    pub co2_pct: f64,
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultBundle {
    pub table: Vec<TableRow>,
    pub summary: Summary,
    pub trend: Trend,
    pub forecast: Forecast,
    pub safety: SafetyReport,
    pub projection: Vec<ProjectionRow>,
    pub shares: Vec<ShareRow>,
}

pub(crate) fn projection(table: &[TableRow], last_rate: f64, forecast: &Forecast) -> Vec<ProjectionRow> {
    let mut rows: Vec<ProjectionRow> = table
        .iter()
        .map(|r| ProjectionRow {
            label: r.month.short_name().to_string(),
            order: r.month.index(),
            units: r.units,
            bill: r.bill,
            rate: r.rate,
            co2: r.co2,
            predicted: false,
        })
        .collect();
    rows.push(ProjectionRow {
        label: NEXT_PERIOD_LABEL.to_string(),
        order: Month::ALL.len(),
        units: forecast.next_units,
        bill: forecast.next_bill,
        rate: last_rate,
        co2: forecast.next_co2,
        predicted: true,
    });
    rows
}

pub(crate) fn shares(table: &[TableRow], summary: &Summary) -> Vec<ShareRow> {
    let total_rate: f64 = table.iter().map(|r| r.rate).sum();
    table
        .iter()
        .map(|r| ShareRow {
            month: r.month,
            units_pct: percent(r.units, summary.total_units),
            bill_pct: percent(r.bill, summary.total_bill),
            rate_pct: percent(r.rate, total_rate),
            co2_pct: percent(r.co2, summary.total_co2),
        })
        .collect()
}

fn percent(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total * 100.0
    } else {
        0.0
    }
}
