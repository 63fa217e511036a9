//! End-to-end forecast orchestration

use crate::chart::ChartData;
use crate::data::StockSeries;
use crate::error::{ForecastError, Result};
use crate::models::seasonal_trend::SeasonalTrendModel;
use crate::models::{ForecastModel, RawForecast, TrainedForecastModel};
use crate::postprocess::{post_process, ForecastPoint};
use crate::settings::ForecastSettings;
use crate::summary::{summarize, CheckpointEntry};
use chrono::NaiveDate;
use serde::Serialize;
use stock_data::{PriceHistory, PriceProvider, TtlCache};

/// Result of one forecast run, ready for display
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    /// Ticker symbol the run was for
    pub symbol: String,
    /// Company name reported by the provider
    pub company_name: String,
    /// Most recent observed close
    pub current_price: f64,
    /// Date of the most recent observation
    pub last_actual_date: NaiveDate,
    /// Full forecast in price space, history and horizon
    pub points: Vec<ForecastPoint>,
    /// Checkpoint summary, ascending horizon
    pub summary: Vec<CheckpointEntry>,
}

impl ForecastReport {
    /// Assemble the chart layers for this report
    pub fn chart_data(&self) -> ChartData {
        ChartData::build(
            format!("{} ({}) - Price Forecast", self.company_name, self.symbol),
            &self.points,
            &self.summary,
            self.last_actual_date,
        )
    }
}

/// Orchestrates one forecast run: fetch, stabilize, fit/predict,
/// post-process, summarize.
///
/// Provider fetches and model output are memoized with a fixed expiry; a
/// repeated run inside the window reuses both. There is no single-flight
/// guard, so concurrent first runs may duplicate the underlying calls.
pub struct Forecaster<P> {
    provider: P,
    settings: ForecastSettings,
    fetch_cache: TtlCache<String, PriceHistory>,
    forecast_cache: TtlCache<(String, usize), RawForecast>,
}

impl<P: PriceProvider> Forecaster<P> {
    /// Create a forecaster with default settings
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, ForecastSettings::default())
    }

    /// Create a forecaster with explicit settings
    pub fn with_settings(provider: P, settings: ForecastSettings) -> Self {
        let fetch_cache = TtlCache::new(settings.cache_ttl);
        let forecast_cache = TtlCache::new(settings.cache_ttl);

        Self {
            provider,
            settings,
            fetch_cache,
            forecast_cache,
        }
    }

    /// Settings this forecaster runs with
    pub fn settings(&self) -> &ForecastSettings {
        &self.settings
    }

    /// The provider this forecaster fetches with
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run the full pipeline for a ticker symbol.
    ///
    /// An empty symbol is rejected before any external call. Provider and
    /// model failures are terminal: no retry, no partial result.
    pub fn run(&self, symbol: &str) -> Result<ForecastReport> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ForecastError::InvalidInput(
                "no ticker symbol supplied".to_string(),
            ));
        }

        let history = self.fetch(symbol)?;
        let series = StockSeries::from_history(&history)?;
        let raw = self.fit_predict(symbol, &series)?;

        self.assemble(symbol.to_string(), history.company_name, &series, &raw)
    }

    /// Run the pipeline over an already-loaded series, e.g. from a CSV
    /// file. Bypasses both caches.
    pub fn run_with_series(&self, name: &str, series: &StockSeries) -> Result<ForecastReport> {
        let raw = self.train_and_predict(series)?;
        self.assemble(name.to_string(), name.to_string(), series, &raw)
    }

    fn fetch(&self, symbol: &str) -> Result<PriceHistory> {
        if let Some(history) = self.fetch_cache.get(&symbol.to_string()) {
            tracing::debug!(symbol, "using cached history");
            return Ok(history);
        }

        let history = self.provider.fetch_daily(symbol)?;
        self.fetch_cache.insert(symbol.to_string(), history.clone());

        Ok(history)
    }

    fn fit_predict(&self, symbol: &str, series: &StockSeries) -> Result<RawForecast> {
        let key = (symbol.to_string(), self.settings.horizon_days);
        if let Some(raw) = self.forecast_cache.get(&key) {
            tracing::debug!(symbol, "using cached forecast");
            return Ok(raw);
        }

        let raw = self.train_and_predict(series)?;
        self.forecast_cache.insert(key, raw.clone());

        Ok(raw)
    }

    fn train_and_predict(&self, series: &StockSeries) -> Result<RawForecast> {
        let model = SeasonalTrendModel::new(
            self.settings.yearly_seasonality,
            self.settings.weekly_seasonality,
            self.settings.daily_seasonality,
            self.settings.interval_width,
            self.settings.trend_flexibility(series.len()),
        )?;

        tracing::info!(
            model = model.name(),
            observations = series.len(),
            horizon_days = self.settings.horizon_days,
            "training forecast model"
        );

        let trained = model.train(series)?;
        let raw = trained.predict(self.settings.horizon_days)?;

        let values = series.stabilized_values();
        if !values.is_empty() {
            let overlap = values.len().min(raw.len());
            let mae = raw.predicted()[..overlap]
                .iter()
                .zip(values.iter())
                .map(|(f, v)| (f - v).abs())
                .sum::<f64>()
                / overlap as f64;
            tracing::debug!(mae, "in-sample fit, stabilized space");
        }

        Ok(raw)
    }

    fn assemble(
        &self,
        symbol: String,
        company_name: String,
        series: &StockSeries,
        raw: &RawForecast,
    ) -> Result<ForecastReport> {
        let points = post_process(raw, series);

        let last_actual_date = series.last_actual_date().ok_or_else(|| {
            ForecastError::DataUnavailable(format!("no observations for {symbol}"))
        })?;
        let current_price = series.current_price().ok_or_else(|| {
            ForecastError::DataUnavailable(format!("no observations for {symbol}"))
        })?;

        let summary = summarize(&points, last_actual_date, current_price)?;

        Ok(ForecastReport {
            symbol,
            company_name,
            current_price,
            last_actual_date,
            points,
            summary,
        })
    }
}
