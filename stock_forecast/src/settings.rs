//! Fixed pipeline configuration

use std::time::Duration;

/// Pipeline constants.
///
/// These mirror a deliberate product decision: the forecast setup is fixed,
/// not end-user tunable. Defaults give a five-year horizon with yearly and
/// weekly seasonality at a 95% interval, and provider/model results cached
/// for one hour.
#[derive(Debug, Clone)]
pub struct ForecastSettings {
    /// How many days past the last observation to forecast
    pub horizon_days: usize,
    /// Fit a per-month seasonal component
    pub yearly_seasonality: bool,
    /// Fit a per-weekday seasonal component
    pub weekly_seasonality: bool,
    /// Daily seasonality stays off for daily close data
    pub daily_seasonality: bool,
    /// Width of the uncertainty interval
    pub interval_width: f64,
    /// Expiry for cached fetches and forecasts
    pub cache_ttl: Duration,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            horizon_days: 1825,
            yearly_seasonality: true,
            weekly_seasonality: true,
            daily_seasonality: false,
            interval_width: 0.95,
            cache_ttl: Duration::from_secs(3600),
        }
    }
}

impl ForecastSettings {
    /// Trend flexibility for a series of the given length; longer histories
    /// support a more responsive trend
    pub fn trend_flexibility(&self, series_len: usize) -> f64 {
        if series_len > 500 {
            0.10
        } else {
            0.05
        }
    }
}
