//! Price series container for forecasting

use crate::error::{ForecastError, Result};
use crate::transform::stabilize;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use stock_data::PriceHistory;

const DS_COLUMN: &str = "ds";
const Y_COLUMN: &str = "y";
const Y_ORIGINAL_COLUMN: &str = "y_original";

/// Historical close series with its stabilized representation.
///
/// Holds three parallel columns: the observation date, the stabilized value
/// the model is fitted on, and the original close kept for chart overlay and
/// change-rate computation.
#[derive(Debug, Clone)]
pub struct StockSeries {
    df: DataFrame,
}

/// Data loader for close series stored in CSV files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a close series from a CSV file with a date column and a
    /// close/price column
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<StockSeries> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let date_column = Self::detect_date_column(&df)?;
        let close_column = Self::detect_close_column(&df)?;

        let dates = Self::column_as_dates(&df, &date_column)?;
        let closes = Self::column_as_f64(&df, &close_column)?;

        StockSeries::new(dates, closes)
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        for name in df.get_column_names() {
            let lower_name = name.to_lowercase();
            if lower_name.contains("date") || lower_name.contains("time") {
                return Ok(name.to_string());
            }
        }

        Err(ForecastError::ValidationError(
            "no date column found in data".to_string(),
        ))
    }

    /// Detect the close-price column in a DataFrame
    fn detect_close_column(df: &DataFrame) -> Result<String> {
        for name in df.get_column_names() {
            let lower_name = name.to_lowercase();
            if lower_name.contains("close") || lower_name.contains("price") {
                return Ok(name.to_string());
            }
        }

        Err(ForecastError::ValidationError(
            "no close column found in data".to_string(),
        ))
    }

    /// Read a column as calendar dates
    fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<NaiveDate>> {
        let col = df.column(column_name)?;

        match col.dtype() {
            DataType::Utf8 => {
                let mut dates = Vec::with_capacity(df.height());
                for value in col.utf8()?.into_iter() {
                    let raw = value.ok_or_else(|| {
                        ForecastError::ValidationError(format!(
                            "missing date in column '{column_name}'"
                        ))
                    })?;
                    dates.push(parse_date(raw)?);
                }
                Ok(dates)
            }
            DataType::Date => Ok(col
                .date()?
                .into_iter()
                .flatten()
                .filter_map(|days| {
                    NaiveDate::from_ymd_opt(1970, 1, 1)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(days as u64))
                })
                .collect()),
            other => Err(ForecastError::ValidationError(format!(
                "column '{column_name}' has unsupported date type {other}"
            ))),
        }
    }

    /// Read a column as f64 values
    fn column_as_f64(df: &DataFrame, column_name: &str) -> Result<Vec<f64>> {
        let col = df.column(column_name)?;

        match col.dtype() {
            DataType::Float64 => Ok(col.f64()?.into_iter().flatten().collect()),
            DataType::Float32 => Ok(col
                .f32()?
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int64 => Ok(col
                .i64()?
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            DataType::Int32 => Ok(col
                .i32()?
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect()),
            other => Err(ForecastError::ValidationError(format!(
                "column '{column_name}' of type {other} cannot be read as prices"
            ))),
        }
    }
}

/// Parse a calendar date in ISO or US format
fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .map_err(|_| ForecastError::ValidationError(format!("unparseable date '{raw}'")))
}

impl StockSeries {
    /// Build a series from parallel dates and closes.
    ///
    /// Dates must be strictly ascending; closes must be non-negative. The
    /// stabilized column is computed here so the two representations cannot
    /// drift apart.
    pub fn new(dates: Vec<NaiveDate>, closes: Vec<f64>) -> Result<Self> {
        if dates.len() != closes.len() {
            return Err(ForecastError::ValidationError(format!(
                "dates length ({}) doesn't match closes length ({})",
                dates.len(),
                closes.len()
            )));
        }

        for pair in dates.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ForecastError::ValidationError(format!(
                    "dates must be strictly ascending, got {} before {}",
                    pair[0], pair[1]
                )));
            }
        }

        let stabilized = stabilize(&closes)?;

        let ds = Series::new(
            DS_COLUMN,
            dates
                .iter()
                .map(|d| d.num_days_from_ce() as i64)
                .collect::<Vec<i64>>(),
        );
        let y = Series::new(Y_COLUMN, stabilized);
        let y_original = Series::new(Y_ORIGINAL_COLUMN, closes);

        let df = DataFrame::new(vec![ds, y, y_original])?;

        Ok(Self { df })
    }

    /// Build a series from a provider history
    pub fn from_history(history: &PriceHistory) -> Result<Self> {
        Self::new(history.dates(), history.closes())
    }

    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Observation dates, in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.df
            .column(DS_COLUMN)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .flatten()
            .filter_map(|days| NaiveDate::from_num_days_from_ce_opt(days as i32))
            .collect()
    }

    /// Stabilized values the model is fitted on
    pub fn stabilized_values(&self) -> Vec<f64> {
        self.column_values(Y_COLUMN)
    }

    /// Original closing prices
    pub fn actual_closes(&self) -> Vec<f64> {
        self.column_values(Y_ORIGINAL_COLUMN)
    }

    fn column_values(&self, name: &str) -> Vec<f64> {
        self.df
            .column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect()
    }

    /// Date of the most recent observation
    pub fn last_actual_date(&self) -> Option<NaiveDate> {
        self.dates().last().copied()
    }

    /// Most recent closing price
    pub fn current_price(&self) -> Option<f64> {
        self.actual_closes().last().copied()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.df.height()
    }
}
