use chrono::{Duration, NaiveDate};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use stock_data::{DataError, PriceHistory, PricePoint, PriceProvider};
use stock_forecast::{DataLoader, ForecastError, Forecaster};
use tempfile::NamedTempFile;

/// Provider that serves a canned history and counts its calls
struct ScriptedProvider {
    history: Option<PriceHistory>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn with_history(history: PriceHistory) -> Self {
        Self {
            history: Some(history),
            calls: AtomicUsize::new(0),
        }
    }

    fn not_found() -> Self {
        Self {
            history: None,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PriceProvider for ScriptedProvider {
    fn fetch_daily(&self, symbol: &str) -> Result<PriceHistory, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.history {
            Some(history) => Ok(history.clone()),
            None => Err(DataError::SymbolNotFound(symbol.to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn sample_history(len: usize) -> PriceHistory {
    let start = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();

    PriceHistory {
        symbol: "TEST".to_string(),
        company_name: "Test Corp".to_string(),
        points: (0..len)
            .map(|i| PricePoint {
                date: start + Duration::days(i as i64),
                close: 80.0 + i as f64 * 0.05 + (i % 5) as f64 * 0.4,
            })
            .collect(),
    }
}

#[test]
fn test_full_forecast_workflow() {
    let history = sample_history(600);
    let last_date = history.last_date().unwrap();
    let current = history.current_price().unwrap();

    let forecaster = Forecaster::new(ScriptedProvider::with_history(history));
    let report = forecaster.run("TEST").unwrap();

    assert_eq!(report.symbol, "TEST");
    assert_eq!(report.company_name, "Test Corp");
    assert_eq!(report.current_price, current);
    assert_eq!(report.last_actual_date, last_date);

    // History plus the default five-year horizon
    assert_eq!(report.points.len(), 600 + 1825);

    // Every historical row carries its observed close, future rows none
    assert!(report.points[..600].iter().all(|p| p.actual.is_some()));
    assert!(report.points[600..].iter().all(|p| p.actual.is_none()));

    // Prices never go negative, whatever the model emitted
    for point in &report.points {
        assert!(point.predicted >= 0.0);
        assert!(point.lower >= 0.0);
        assert!(point.upper >= 0.0);
    }

    // A daily grid over 1825 days reaches every checkpoint
    assert_eq!(report.summary.len(), 6);
    assert_eq!(report.summary[0].label, "1 month");
    assert_eq!(report.summary[5].label, "5 years");
}

#[test]
fn test_fetch_is_cached_within_ttl() {
    let forecaster = Forecaster::new(ScriptedProvider::with_history(sample_history(50)));

    forecaster.run("TEST").unwrap();
    forecaster.run("TEST").unwrap();

    // The second run is served from the caches
    assert_eq!(forecaster.provider().call_count(), 1);
}

#[test]
fn test_unknown_symbol_is_data_unavailable() {
    let forecaster = Forecaster::new(ScriptedProvider::not_found());

    let result = forecaster.run("NOPE");
    assert!(matches!(result, Err(ForecastError::DataUnavailable(_))));
}

#[test]
fn test_empty_symbol_makes_no_provider_call() {
    let forecaster = Forecaster::new(ScriptedProvider::with_history(sample_history(50)));

    let result = forecaster.run("   ");
    assert!(matches!(result, Err(ForecastError::InvalidInput(_))));
    assert_eq!(forecaster.provider().call_count(), 0);
}

#[test]
fn test_csv_workflow() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    for i in 0..30 {
        let date = start + Duration::days(i);
        writeln!(file, "{},{:.2}", date, 100.0 + i as f64).unwrap();
    }

    let series = DataLoader::from_csv(file.path()).unwrap();
    let forecaster = Forecaster::new(ScriptedProvider::not_found());
    let report = forecaster.run_with_series("offline", &series).unwrap();

    assert_eq!(report.symbol, "offline");
    assert_eq!(report.points.len(), 30 + 1825);
    assert_eq!(report.summary.len(), 6);
    // The offline path never touches the provider
    assert_eq!(forecaster.provider().call_count(), 0);
}
