//! Per-day totals export
//!
//! One CSV row per stored day, ascending by date:
//!
//! ```text
//! date,entries,calories,carbs,protein,fat
//! 2024-06-01,2,435,27,63,6
//! ```

use crate::ledger::{compute_totals, LogStore};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct DayRow {
    date: String,
    entries: usize,
    calories: u32,
    carbs: u32,
    protein: u32,
    fat: u32,
}

/// Write per-day totals as CSV into `writer`
pub fn write_daily_totals_csv<W: Write>(logs: &LogStore, writer: W) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    if logs.is_empty() {
        // Serialize only emits the header with the first record
        csv_writer.write_record(["date", "entries", "calories", "carbs", "protein", "fat"])?;
    }

    for (date, log) in logs {
        let totals = compute_totals(log);
        csv_writer.serialize(DayRow {
            date: date.format("%Y-%m-%d").to_string(),
            entries: log.entry_count(),
            calories: totals.calories,
            carbs: totals.carbs,
            protein: totals.protein,
            fat: totals.fat,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Per-day totals as a CSV string
pub fn daily_totals_csv(logs: &LogStore) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_daily_totals_csv(logs, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
