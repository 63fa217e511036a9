//! Checkpoint summaries at fixed future horizons

use crate::error::{ForecastError, Result};
use crate::postprocess::ForecastPoint;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

/// The fixed reporting horizons, ascending
pub const CHECKPOINTS: [(&str, i64); 6] = [
    ("1 month", 30),
    ("3 months", 90),
    ("6 months", 180),
    ("1 year", 365),
    ("3 years", 1095),
    ("5 years", 1825),
];

/// Summary of the forecast at one fixed horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckpointEntry {
    /// Horizon label, e.g. "1 month"
    pub label: &'static str,
    /// Horizon offset in days past the last actual date
    pub offset_days: i64,
    /// Predicted price at the checkpoint date
    pub predicted_price: f64,
    /// Percent change of the predicted price against the current price
    pub change_rate: f64,
    /// Upper bound at the checkpoint date
    pub upper_bound: f64,
    /// Lower bound at the checkpoint date
    pub lower_bound: f64,
}

/// Summarize a forecast at the fixed checkpoints.
///
/// Each checkpoint is looked up at exactly `last_actual_date + offset`; a
/// date absent from the forecast grid is silently omitted, never
/// interpolated. Entries come back in ascending-horizon order.
pub fn summarize(
    points: &[ForecastPoint],
    last_actual_date: NaiveDate,
    current_price: f64,
) -> Result<Vec<CheckpointEntry>> {
    if current_price == 0.0 {
        return Err(ForecastError::InvalidInput(
            "current price is zero, change rate is undefined".to_string(),
        ));
    }

    let by_date: HashMap<NaiveDate, &ForecastPoint> =
        points.iter().map(|p| (p.date, p)).collect();

    let mut entries = Vec::with_capacity(CHECKPOINTS.len());
    for (label, offset_days) in CHECKPOINTS {
        let target_date = last_actual_date + Duration::days(offset_days);

        if let Some(point) = by_date.get(&target_date) {
            let change_rate = (point.predicted - current_price) / current_price * 100.0;

            entries.push(CheckpointEntry {
                label,
                offset_days,
                predicted_price: point.predicted,
                change_rate,
                upper_bound: point.upper,
                lower_bound: point.lower,
            });
        }
    }

    Ok(entries)
}
