//! # Stock Forecast
//!
//! A Rust library for forecasting stock prices from daily close history.
//!
//! ## Features
//!
//! - Close-series handling with a log1p-stabilized model representation
//! - A trend + seasonality model behind an opaque train/predict boundary
//! - Forecast post-processing: inverse transform, non-negativity clipping,
//!   exact-date overlay of observed closes
//! - Checkpoint summaries at fixed horizons (1 month through 5 years)
//! - Chart layer construction and PNG rendering with uncertainty bands
//! - Time-bounded memoization of provider fetches and model output
//!
//! ## Quick Start
//!
//! ```no_run
//! use stock_data::YahooFinanceProvider;
//! use stock_forecast::Forecaster;
//!
//! let forecaster = Forecaster::new(YahooFinanceProvider::default());
//!
//! let report = forecaster.run("AAPL").unwrap();
//! println!("current price: {:.2}", report.current_price);
//!
//! for entry in &report.summary {
//!     println!(
//!         "{}: {:.2} ({:+.1}%)",
//!         entry.label, entry.predicted_price, entry.change_rate
//!     );
//! }
//!
//! report.chart_data().render_png("forecast.png", 800, 500).unwrap();
//! ```

pub mod chart;
pub mod data;
pub mod error;
pub mod forecaster;
pub mod models;
pub mod postprocess;
pub mod settings;
pub mod summary;
pub mod transform;

// Re-export commonly used types
pub use crate::chart::ChartData;
pub use crate::data::{DataLoader, StockSeries};
pub use crate::error::ForecastError;
pub use crate::forecaster::{ForecastReport, Forecaster};
pub use crate::models::{ForecastModel, RawForecast, TrainedForecastModel};
pub use crate::postprocess::{post_process, ForecastPoint};
pub use crate::settings::ForecastSettings;
pub use crate::summary::{summarize, CheckpointEntry, CHECKPOINTS};
pub use crate::transform::{destabilize, stabilize};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
