use chrono::{Duration, NaiveDate};
use stock_forecast::{summarize, ChartData, ForecastPoint};

fn last_actual() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 3, 31).unwrap()
}

/// Ten historical days followed by `horizon` future days
fn make_points(horizon: i64) -> Vec<ForecastPoint> {
    let mut points = Vec::new();

    for i in 0..10 {
        let date = last_actual() - Duration::days(9 - i);
        points.push(ForecastPoint {
            date,
            predicted: 100.0 + i as f64,
            lower: 95.0 + i as f64,
            upper: 105.0 + i as f64,
            actual: Some(101.0 + i as f64),
        });
    }

    for offset in 1..=horizon {
        points.push(ForecastPoint {
            date: last_actual() + Duration::days(offset),
            predicted: 110.0 + offset as f64 * 0.1,
            lower: 100.0 + offset as f64 * 0.05,
            upper: 120.0 + offset as f64 * 0.2,
            actual: None,
        });
    }

    points
}

#[test]
fn test_band_and_prediction_start_after_last_actual() {
    let points = make_points(60);
    let summary = summarize(&points, last_actual(), 110.0).unwrap();
    let chart = ChartData::build("Test".to_string(), &points, &summary, last_actual());

    assert!(!chart.predicted.is_empty());
    assert!(!chart.band.is_empty());

    // The historical region has no band and no predicted line
    assert!(chart.predicted.iter().all(|(d, _)| *d > last_actual()));
    assert!(chart.band.iter().all(|(d, _, _)| *d > last_actual()));

    // The forecast region starts the very next day
    assert_eq!(chart.predicted[0].0, last_actual() + Duration::days(1));
}

#[test]
fn test_actual_layer_covers_history_only() {
    let points = make_points(60);
    let summary = summarize(&points, last_actual(), 110.0).unwrap();
    let chart = ChartData::build("Test".to_string(), &points, &summary, last_actual());

    assert_eq!(chart.actual.len(), 10);
    assert!(chart.actual.iter().all(|(d, _)| *d <= last_actual()));
    // The actual layer plots observed closes, not fitted values
    assert_eq!(chart.actual[0].1, 101.0);
}

#[test]
fn test_y_axis_rule() {
    let points = make_points(60);
    let summary = summarize(&points, last_actual(), 110.0).unwrap();
    let chart = ChartData::build("Test".to_string(), &points, &summary, last_actual());

    // Highest value is the last predicted point: 110 + 60*0.1
    let expected_max = (110.0 + 60.0 * 0.1) * 1.2;
    assert!((chart.y_max - expected_max).abs() < 1e-9);
}

#[test]
fn test_markers_mirror_summary() {
    let points = make_points(120);
    let summary = summarize(&points, last_actual(), 110.0).unwrap();
    let chart = ChartData::build("Test".to_string(), &points, &summary, last_actual());

    // 120-day horizon reaches the 30 and 90 day checkpoints
    assert_eq!(summary.len(), 2);
    assert_eq!(chart.markers.len(), 2);

    assert_eq!(chart.markers[0].0, last_actual() + Duration::days(30));
    assert_eq!(chart.markers[0].2, "1 month");
    assert_eq!(chart.markers[1].0, last_actual() + Duration::days(90));
    assert_eq!(chart.markers[1].2, "3 months");
}

#[test]
fn test_empty_chart_refuses_to_render() {
    let chart = ChartData::build(
        "Empty".to_string(),
        &[],
        &[],
        last_actual(),
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chart.png");
    assert!(chart.render_png(&path, 400, 300).is_err());
}
