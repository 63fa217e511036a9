use assert_approx_eq::assert_approx_eq;
use chrono::{Duration, NaiveDate};
use std::io::Write;
use stock_data::{PriceHistory, PricePoint};
use stock_forecast::{DataLoader, ForecastError, StockSeries};
use tempfile::NamedTempFile;

fn make_dates(len: usize) -> Vec<NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    (0..len)
        .map(|i| start + Duration::days(i as i64))
        .collect()
}

#[test]
fn test_series_construction() {
    let closes = vec![100.0, 102.0, 101.5, 103.0];
    let series = StockSeries::new(make_dates(4), closes.clone()).unwrap();

    assert_eq!(series.len(), 4);
    assert!(!series.is_empty());
    assert_eq!(series.actual_closes(), closes);
    assert_eq!(series.current_price(), Some(103.0));
    assert_eq!(
        series.last_actual_date(),
        Some(NaiveDate::from_ymd_opt(2023, 1, 5).unwrap())
    );
}

#[test]
fn test_stabilized_column_round_trips() {
    let closes = vec![0.0, 1.0, 250.5, 30000.0];
    let series = StockSeries::new(make_dates(4), closes.clone()).unwrap();

    let restored = stock_forecast::destabilize(&series.stabilized_values());
    for (orig, back) in closes.iter().zip(restored.iter()) {
        assert_approx_eq!(orig, back, 1e-6);
    }
}

#[test]
fn test_length_mismatch_rejected() {
    let result = StockSeries::new(make_dates(3), vec![100.0, 101.0]);
    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_unsorted_dates_rejected() {
    let mut dates = make_dates(3);
    dates.swap(0, 2);

    let result = StockSeries::new(dates, vec![100.0, 101.0, 102.0]);
    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_duplicate_dates_rejected() {
    let mut dates = make_dates(3);
    dates[2] = dates[1];

    let result = StockSeries::new(dates, vec![100.0, 101.0, 102.0]);
    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_negative_close_rejected() {
    let result = StockSeries::new(make_dates(3), vec![100.0, -1.0, 102.0]);
    assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
}

#[test]
fn test_from_history() {
    let history = PriceHistory {
        symbol: "TEST".to_string(),
        company_name: "Test Corp".to_string(),
        points: vec![
            PricePoint {
                date: NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
                close: 100.0,
            },
            PricePoint {
                date: NaiveDate::from_ymd_opt(2023, 1, 3).unwrap(),
                close: 101.0,
            },
        ],
    };

    let series = StockSeries::from_history(&history).unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series.current_price(), Some(101.0));
}

#[test]
fn test_csv_loading() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    writeln!(file, "2023-01-02,100.0").unwrap();
    writeln!(file, "2023-01-03,102.0").unwrap();
    writeln!(file, "2023-01-04,101.0").unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.actual_closes(), vec![100.0, 102.0, 101.0]);
    assert_eq!(
        series.last_actual_date(),
        Some(NaiveDate::from_ymd_opt(2023, 1, 4).unwrap())
    );
}

#[test]
fn test_csv_detects_price_column_and_us_dates() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Price").unwrap();
    writeln!(file, "01/02/2023,100.0").unwrap();
    writeln!(file, "01/03/2023,102.0").unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(
        series.dates()[0],
        NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()
    );
}

#[test]
fn test_csv_without_close_column_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,volume").unwrap();
    writeln!(file, "2023-01-02,1000").unwrap();

    let result = DataLoader::from_csv(file.path());
    assert!(matches!(result, Err(ForecastError::ValidationError(_))));
}

#[test]
fn test_csv_missing_file_is_io_error() {
    let result = DataLoader::from_csv("/nonexistent/path.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}
