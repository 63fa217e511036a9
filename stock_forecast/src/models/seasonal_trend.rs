//! Additive trend + seasonality model for stabilized close series

use crate::data::StockSeries;
use crate::error::{ForecastError, Result};
use crate::models::{z_score, ForecastModel, RawForecast, TrainedForecastModel};
use chrono::{Datelike, Duration, NaiveDate};

/// Smoothing weight for the level component
const LEVEL_SMOOTHING: f64 = 0.5;

/// Trend + seasonality decomposition model.
///
/// Fits a Holt-style level/trend on the stabilized series, then estimates
/// optional weekly (per-weekday) and yearly (per-month) components from the
/// trend residuals. Uncertainty intervals come from the residual standard
/// deviation at the configured interval width and widen with the horizon.
#[derive(Debug, Clone)]
pub struct SeasonalTrendModel {
    /// Name of the model
    name: String,
    /// Fit a per-month component
    yearly_seasonality: bool,
    /// Fit a per-weekday component
    weekly_seasonality: bool,
    /// Width of the symmetric uncertainty interval, e.g. 0.95
    interval_width: f64,
    /// How fast the trend follows recent observations
    trend_flexibility: f64,
}

/// Trained trend + seasonality model
#[derive(Debug, Clone)]
pub struct TrainedSeasonalTrend {
    name: String,
    /// Final smoothed level
    level: f64,
    /// Final smoothed trend, per day of the training grid
    trend: f64,
    /// Mean residual per weekday (Monday first)
    weekday_component: [f64; 7],
    /// Mean residual per calendar month (January first)
    month_component: [f64; 12],
    /// Residual standard deviation after seasonal adjustment
    sigma: f64,
    /// Interval multiplier for the configured width
    z: f64,
    /// Training dates
    dates: Vec<NaiveDate>,
    /// One-step-ahead fitted values for the training range
    fitted: Vec<f64>,
}

impl SeasonalTrendModel {
    /// Create a new model with the given seasonality flags, interval width
    /// and trend flexibility
    pub fn new(
        yearly_seasonality: bool,
        weekly_seasonality: bool,
        daily_seasonality: bool,
        interval_width: f64,
        trend_flexibility: f64,
    ) -> Result<Self> {
        if daily_seasonality {
            return Err(ForecastError::ValidationError(
                "daily seasonality is not available on daily close data".to_string(),
            ));
        }
        if interval_width <= 0.0 || interval_width >= 1.0 {
            return Err(ForecastError::ValidationError(
                "interval width must be between 0 and 1".to_string(),
            ));
        }
        if trend_flexibility <= 0.0 || trend_flexibility >= 1.0 {
            return Err(ForecastError::ValidationError(
                "trend flexibility must be between 0 and 1".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Seasonal Trend (flexibility={trend_flexibility})"),
            yearly_seasonality,
            weekly_seasonality,
            interval_width,
            trend_flexibility,
        })
    }
}

impl ForecastModel for SeasonalTrendModel {
    type Trained = TrainedSeasonalTrend;

    fn train(&self, series: &StockSeries) -> Result<TrainedSeasonalTrend> {
        let values = series.stabilized_values();
        let dates = series.dates();

        if values.len() < 3 {
            return Err(ForecastError::ForecastingError(format!(
                "insufficient data: need at least 3 observations, got {}",
                values.len()
            )));
        }

        let alpha = LEVEL_SMOOTHING;
        let beta = (2.0 * self.trend_flexibility).clamp(0.05, 0.5);

        // Holt smoothing; fitted[i] is the one-step-ahead forecast for i
        let mut level = values[0];
        let mut trend = 0.0;
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(values[0]);

        for &value in &values[1..] {
            fitted.push(level + trend);

            let prev_level = level;
            level = alpha * value + (1.0 - alpha) * (level + trend);
            trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        }

        let residuals: Vec<f64> = values
            .iter()
            .zip(fitted.iter())
            .map(|(v, f)| v - f)
            .collect();

        let weekday_component = if self.weekly_seasonality {
            bucket_means(&residuals, &dates, |d| weekday_index(d))
        } else {
            [0.0; 7]
        };

        let month_component = if self.yearly_seasonality {
            bucket_means(&residuals, &dates, |d| month_index(d))
        } else {
            [0.0; 12]
        };

        let adjusted: Vec<f64> = residuals
            .iter()
            .zip(dates.iter())
            .map(|(r, d)| {
                r - weekday_component[weekday_index(d)] - month_component[month_index(d)]
            })
            .collect();

        let sigma =
            (adjusted.iter().map(|e| e * e).sum::<f64>() / adjusted.len() as f64).sqrt();

        Ok(TrainedSeasonalTrend {
            name: self.name.clone(),
            level,
            trend,
            weekday_component,
            month_component,
            sigma,
            z: z_score(self.interval_width),
            dates,
            fitted,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedForecastModel for TrainedSeasonalTrend {
    fn predict(&self, horizon_days: usize) -> Result<RawForecast> {
        let n = self.dates.len();
        let last_date = *self.dates.last().ok_or_else(|| {
            ForecastError::ForecastingError("model has no training dates".to_string())
        })?;

        let total = n + horizon_days;
        let mut dates = Vec::with_capacity(total);
        let mut predicted = Vec::with_capacity(total);
        let mut lower = Vec::with_capacity(total);
        let mut upper = Vec::with_capacity(total);

        // Training range: one-step fitted values with a constant band
        for (date, fit) in self.dates.iter().zip(self.fitted.iter()) {
            let value = fit + self.seasonal(date);
            let margin = self.z * self.sigma;

            dates.push(*date);
            predicted.push(value);
            lower.push(value - margin);
            upper.push(value + margin);
        }

        // Future horizon: strictly daily grid, band widening with distance
        for h in 1..=horizon_days {
            let date = last_date + Duration::days(h as i64);
            let value = self.level + h as f64 * self.trend + self.seasonal(&date);
            let margin = self.z * self.sigma * (1.0 + h as f64 / n as f64).sqrt();

            dates.push(date);
            predicted.push(value);
            lower.push(value - margin);
            upper.push(value + margin);
        }

        RawForecast::new(dates, predicted, lower, upper)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedSeasonalTrend {
    fn seasonal(&self, date: &NaiveDate) -> f64 {
        self.weekday_component[weekday_index(date)] + self.month_component[month_index(date)]
    }
}

fn weekday_index(date: &NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

fn month_index(date: &NaiveDate) -> usize {
    date.month0() as usize
}

/// Mean residual per calendar bucket; buckets with no samples stay at zero
fn bucket_means<const N: usize>(
    residuals: &[f64],
    dates: &[NaiveDate],
    index: impl Fn(&NaiveDate) -> usize,
) -> [f64; N] {
    let mut sums = [0.0; N];
    let mut counts = [0usize; N];

    for (r, d) in residuals.iter().zip(dates.iter()) {
        let i = index(d);
        sums[i] += r;
        counts[i] += 1;
    }

    let mut means = [0.0; N];
    for i in 0..N {
        if counts[i] > 0 {
            means[i] = sums[i] / counts[i] as f64;
        }
    }

    means
}
