//! Forecast post-processing: inverse transform, clipping, actual overlay

use crate::data::StockSeries;
use crate::models::RawForecast;
use crate::transform::destabilize;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One forecast row in price space.
///
/// Covers a single date of the historical range or the future horizon;
/// `actual` is the original close when the date falls inside the history.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastPoint {
    /// Calendar date of this row
    pub date: NaiveDate,
    /// Predicted price
    pub predicted: f64,
    /// Lower bound of the uncertainty band
    pub lower: f64,
    /// Upper bound of the uncertainty band
    pub upper: f64,
    /// Original close, for dates inside the historical range
    pub actual: Option<f64>,
}

/// Convert a raw model forecast into price-space points with actuals joined.
///
/// The three columns are destabilized and clipped to zero independently;
/// bounds are not re-sorted afterwards, so a clipped lower bound can sit
/// above the predicted value. Actuals are joined by exact date equality;
/// future-only dates carry no actual.
pub fn post_process(raw: &RawForecast, series: &StockSeries) -> Vec<ForecastPoint> {
    let predicted = destabilize(raw.predicted());
    let lower = destabilize(raw.lower());
    let upper = destabilize(raw.upper());

    let actuals: HashMap<NaiveDate, f64> = series
        .dates()
        .into_iter()
        .zip(series.actual_closes())
        .collect();

    raw.dates()
        .iter()
        .enumerate()
        .map(|(i, date)| ForecastPoint {
            date: *date,
            predicted: predicted[i],
            lower: lower[i],
            upper: upper[i],
            actual: actuals.get(date).copied(),
        })
        .collect()
}
