//! MetricsEngine: the append-only record store and the derived-metrics pipeline.
//!
//! Nothing is cached between calls. `compute` re-derives the whole bundle from
//! the record list, which stays small at human entry pace.

use crate::error::{Result, WattwiseError};
use crate::model::{MonthlyRecord, TREE_ABSORPTION_KG_PER_YEAR};
use crate::report::{self, Forecast, ResultBundle, Summary, TableRow, Trend};
use crate::safety::{SafetyPolicy, SafetyReport};

/// One session's worth of monthly records.
#[derive(Debug, Clone, Default)]
pub struct MetricsEngine {
    records: Vec<MonthlyRecord>,
}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record after checking its numeric fields.
    ///
    /// A rejected record leaves the store unchanged.
    pub fn append(&mut self, record: MonthlyRecord) -> Result<()> {
        if let Err(e) = record.validate() {
            tracing::warn!(month = %record.month, error = %e, "record rejected");
            return Err(e);
        }
        self.records.push(record);
        tracing::debug!(month = %record.month, count = self.records.len(), "record appended");
        Ok(())
    }

    pub fn clear(&mut self) {
        let dropped = self.records.len();
        self.records.clear();
        tracing::debug!(dropped, "records cleared");
    }

    /// Records in submission order.
    pub fn records(&self) -> &[MonthlyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in calendar order; same-month entries keep submission order.
    pub fn sorted(&self) -> Vec<MonthlyRecord> {
        let mut sorted = self.records.clone();
        // `sort_by_key` is stable.
        sorted.sort_by_key(|r| r.month.index());
        sorted
    }

    /// Compute the bundle under the three-tier safety policy.
    pub fn compute(&self) -> Result<ResultBundle> {
        self.compute_with(SafetyPolicy::default())
    }

    pub fn compute_with(&self, policy: SafetyPolicy) -> Result<ResultBundle> {
        let sorted = self.sorted();
        let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
            tracing::debug!("compute on empty dataset");
            return Err(WattwiseError::EmptyDataset);
        };

        let table: Vec<TableRow> = sorted.iter().map(TableRow::from).collect();
        let summary = summarize(&table, last);
        let trend = Trend::between(first.units, last.units);
        let forecast = Forecast::from_last(last);
        let safety = SafetyReport::assess(policy, last.units);
        let projection = report::projection(&table, last.rate, &forecast);
        let shares = report::shares(&table, &summary);

        tracing::debug!(
            records = table.len(),
            total_units = summary.total_units,
            trend = ?trend,
            safety = ?safety.level,
            "bundle computed"
        );

        Ok(ResultBundle {
            table,
            summary,
            trend,
            forecast,
            safety,
            projection,
            shares,
        })
    }
}

fn summarize(table: &[TableRow], last: &MonthlyRecord) -> Summary {
    let total_units: f64 = table.iter().map(|r| r.units).sum();
    let total_bill: f64 = table.iter().map(|r| r.bill).sum();
    let total_co2: f64 = table.iter().map(|r| r.co2).sum();
    let avg_rate = table.iter().map(|r| r.rate).sum::<f64>() / table.len() as f64;

    Summary {
        record_count: table.len(),
        total_units,
        total_bill,
        avg_rate,
        total_co2,
        monthly_co2: last.co2(),
        trees_per_year: total_co2 / TREE_ABSORPTION_KG_PER_YEAR,
    }
}
