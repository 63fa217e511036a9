//! # Stock Data
//!
//! `stock_data` provides the daily close-price data types shared by the
//! forecasting pipeline, the market-data provider boundary, and a
//! time-bounded cache for provider results.
//!
//! ## Usage Example
//!
//! ```no_run
//! use stock_data::{PriceProvider, YahooFinanceProvider};
//!
//! let provider = YahooFinanceProvider::default();
//! let history = provider.fetch_daily("AAPL").unwrap();
//!
//! println!(
//!     "{}: {} closes, latest {:?}",
//!     history.company_name,
//!     history.len(),
//!     history.current_price()
//! );
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod cache;
pub mod yahoo;

pub use cache::TtlCache;
pub use yahoo::YahooFinanceProvider;

/// Errors that can occur while acquiring market data
#[derive(Error, Debug)]
pub enum DataError {
    /// The provider returned no result for the requested symbol
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider answered but the history contained no usable closes
    #[error("Empty price history for symbol: {0}")]
    EmptyHistory(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for DataError {
    fn from(err: reqwest::Error) -> Self {
        DataError::NetworkError(err.to_string())
    }
}

/// A single daily observation: calendar date and closing price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Date of the close
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

/// Daily close history for one symbol, in chronological order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Ticker symbol the history was requested for
    pub symbol: String,
    /// Long company name when the provider knows it, otherwise the symbol
    pub company_name: String,
    /// Daily observations, ascending by date
    pub points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Number of daily observations
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the history holds no observations
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dates of all observations, in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Closing prices of all observations, in order
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent closing price, if any observations exist
    pub fn current_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Trait defining a source of daily close histories
///
/// Implementations handle the specifics of one data source. Callers treat
/// the source as opaque: a symbol goes in, a chronological history comes
/// out, and a missing symbol surfaces as [`DataError::SymbolNotFound`].
pub trait PriceProvider {
    /// Fetch the daily close history for a symbol
    fn fetch_daily(&self, symbol: &str) -> Result<PriceHistory, DataError>;

    /// Human-readable name of this provider
    fn name(&self) -> &str;
}
