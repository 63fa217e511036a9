//! Yahoo Finance daily-history provider

use crate::{DataError, PriceHistory, PricePoint, PriceProvider};
use chrono::{DateTime, Duration, Utc};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use serde::Deserialize;

/// Length of the requested history window, in days
pub const HISTORY_DAYS: i64 = 5 * 365;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const REQUEST_USER_AGENT: &str = "Mozilla/5.0 (compatible; stock-forecast/0.1)";

/// Provider backed by the Yahoo Finance v8 chart endpoint
pub struct YahooFinanceProvider {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    symbol: String,
    #[serde(rename = "longName", default)]
    long_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl YahooFinanceProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch and parse the raw chart response for a symbol
    fn fetch_chart(&self, symbol: &str) -> Result<ChartResponse, DataError> {
        let end = Utc::now();
        let start = end - Duration::days(HISTORY_DAYS);
        let url = format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            symbol,
            start.timestamp(),
            end.timestamp()
        );

        tracing::debug!(symbol, %url, "fetching daily history");

        let response: ChartResponse = self
            .client
            .get(&url)
            .header(USER_AGENT, REQUEST_USER_AGENT)
            .send()?
            .json()?;

        Ok(response)
    }
}

impl Default for YahooFinanceProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL.to_string())
    }
}

impl PriceProvider for YahooFinanceProvider {
    fn fetch_daily(&self, symbol: &str) -> Result<PriceHistory, DataError> {
        let response = self.fetch_chart(symbol)?;
        let history = history_from_chart(symbol, response)?;

        tracing::info!(
            symbol,
            points = history.len(),
            "fetched daily history from Yahoo Finance"
        );

        Ok(history)
    }

    fn name(&self) -> &str {
        "Yahoo Finance"
    }
}

/// Convert a chart response to our internal history type
fn history_from_chart(symbol: &str, response: ChartResponse) -> Result<PriceHistory, DataError> {
    if response.chart.error.is_some() {
        return Err(DataError::SymbolNotFound(symbol.to_string()));
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0))
            }
        })
        .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;

    let closes = result
        .indicators
        .quote
        .first()
        .map(|q| q.close.clone())
        .ok_or_else(|| DataError::MalformedResponse("missing quote indicators".to_string()))?;

    if result.timestamp.len() != closes.len() {
        return Err(DataError::MalformedResponse(format!(
            "timestamp/close length mismatch: {} vs {}",
            result.timestamp.len(),
            closes.len()
        )));
    }

    // Days with no trade come back as null closes; drop them
    let mut points: Vec<PricePoint> = result
        .timestamp
        .iter()
        .zip(closes.iter())
        .filter_map(|(&ts, close)| {
            let close = (*close)?;
            let date = DateTime::<Utc>::from_timestamp(ts, 0)?.date_naive();
            Some(PricePoint { date, close })
        })
        .collect();

    if points.is_empty() {
        return Err(DataError::EmptyHistory(symbol.to_string()));
    }

    // Should already be sorted by the provider, but ensure it
    points.sort_by_key(|p| p.date);
    points.dedup_by_key(|p| p.date);

    let company_name = result
        .meta
        .long_name
        .unwrap_or_else(|| result.meta.symbol.clone());

    Ok(PriceHistory {
        symbol: symbol.to_string(),
        company_name,
        points,
    })
}
