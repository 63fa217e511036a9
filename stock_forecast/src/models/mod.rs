//! Forecasting model boundary
//!
//! The pipeline treats the model as opaque: it is trained on a stabilized
//! series and asked for a [`RawForecast`] covering the training range plus a
//! daily future grid. Nothing downstream inspects how the model decomposes
//! trend or seasonality.

use crate::data::StockSeries;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use std::fmt::Debug;

pub mod seasonal_trend;

/// Raw model output in stabilized space.
///
/// One row per date, covering both the training range and the future
/// horizon. Values are in model space; the post-processor owns the inverse
/// transform back to prices.
#[derive(Debug, Clone)]
pub struct RawForecast {
    dates: Vec<NaiveDate>,
    predicted: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl RawForecast {
    /// Create a new raw forecast, validating that all columns align
    pub fn new(
        dates: Vec<NaiveDate>,
        predicted: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self> {
        if predicted.len() != dates.len()
            || lower.len() != dates.len()
            || upper.len() != dates.len()
        {
            return Err(ForecastError::ValidationError(format!(
                "forecast columns must align: {} dates, {} predicted, {} lower, {} upper",
                dates.len(),
                predicted.len(),
                lower.len(),
                upper.len()
            )));
        }

        Ok(Self {
            dates,
            predicted,
            lower,
            upper,
        })
    }

    /// Dates covered by the forecast
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Predicted values, stabilized space
    pub fn predicted(&self) -> &[f64] {
        &self.predicted
    }

    /// Lower interval bounds, stabilized space
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper interval bounds, stabilized space
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the forecast holds no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Produce a forecast covering the training range plus `horizon_days`
    /// beyond the last training date
    fn predict(&self, horizon_days: usize) -> Result<RawForecast>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a stabilized series
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on the series
    fn train(&self, series: &StockSeries) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Standard-normal multiplier for a symmetric interval of the given width
pub(crate) fn z_score(interval_width: f64) -> f64 {
    match interval_width {
        c if c >= 0.99 => 2.576,
        c if c >= 0.95 => 1.96,
        c if c >= 0.90 => 1.645,
        _ => 1.0,
    }
}
