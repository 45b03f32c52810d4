//! CSV export of the sorted table.
//!
//! Header: `Month,Units (kWh),Bill,Rate,CO2 (kg)`. Units and CO2 are written
//! with one decimal place, bill and rate with two.

use std::io::Write;

use crate::error::{Result, WattwiseError};
use crate::report::TableRow;

pub const CSV_HEADER: [&str; 5] = ["Month", "Units (kWh)", "Bill", "Rate", "CO2 (kg)"];

/// Write `rows` as CSV into `out`.
pub fn write_csv<W: Write>(rows: &[TableRow], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CSV_HEADER).map_err(csv_err)?;
    for r in rows {
        writer
            .write_record([
                r.month.short_name().to_string(),
                format!("{:.1}", r.units),
                format!("{:.2}", r.bill),
                format!("{:.2}", r.rate),
                format!("{:.1}", r.co2),
            ])
            .map_err(csv_err)?;
    }
    writer
        .flush()
        .map_err(|e| WattwiseError::Internal(format!("csv flush failed: {e}")))?;
    Ok(())
}

pub fn to_csv_string(rows: &[TableRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(rows, &mut buf)?;
    String::from_utf8(buf).map_err(|e| WattwiseError::Internal(format!("csv not utf8: {e}")))
}

fn csv_err(e: csv::Error) -> WattwiseError {
    WattwiseError::Internal(format!("csv write failed: {e}"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::Month;

    #[test]
    fn header_only_for_empty_table() {
        let s = to_csv_string(&[]).unwrap();
        assert_eq!(s, "Month,Units (kWh),Bill,Rate,CO2 (kg)\n");
    }

    #[test]
    fn rows_are_rounded() {
        let rows = [TableRow {
            month: Month::Mar,
            units: 350.0,
            bill: 2600.456,
            rate: 7.0,
            co2: 287.04,
        }];
        let s = to_csv_string(&rows).unwrap();
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Mar,350.0,2600.46,7.00,287.0");
    }
}
