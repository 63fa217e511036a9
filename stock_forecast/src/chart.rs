//! Chart construction for forecast output

use crate::error::{ForecastError, Result};
use crate::postprocess::ForecastPoint;
use crate::summary::CheckpointEntry;
use chrono::{Duration, NaiveDate};
use plotters::prelude::*;
use std::path::Path;

const ACTUAL_COLOR: RGBColor = RGBColor(30, 80, 200);
const PREDICTED_COLOR: RGBColor = RGBColor(255, 165, 0);
const MARKER_COLOR: RGBColor = RGBColor(200, 30, 30);

/// The logical layers of a forecast chart, ready for rendering.
///
/// Layer construction is kept separate from drawing so the region rules can
/// be exercised without a bitmap backend.
#[derive(Debug, Clone)]
pub struct ChartData {
    /// Chart caption
    pub title: String,
    /// Solid line: dates with an observed close
    pub actual: Vec<(NaiveDate, f64)>,
    /// Dashed line: predicted values, strictly after the last actual date
    pub predicted: Vec<(NaiveDate, f64)>,
    /// Shaded band rows (date, lower, upper), forecast region only
    pub band: Vec<(NaiveDate, f64, f64)>,
    /// Checkpoint markers (date, predicted price, label)
    pub markers: Vec<(NaiveDate, f64, &'static str)>,
    /// Top of the y-axis: 1.2 × the maximum of actual and predicted values
    pub y_max: f64,
}

impl ChartData {
    /// Assemble chart layers from processed forecast points and the
    /// checkpoint summary
    pub fn build(
        title: String,
        points: &[ForecastPoint],
        summary: &[CheckpointEntry],
        last_actual_date: NaiveDate,
    ) -> Self {
        let actual: Vec<(NaiveDate, f64)> = points
            .iter()
            .filter_map(|p| p.actual.map(|a| (p.date, a)))
            .collect();

        // Predicted line and band begin strictly after the last observation;
        // the historical region shows no band.
        let predicted: Vec<(NaiveDate, f64)> = points
            .iter()
            .filter(|p| p.date > last_actual_date)
            .map(|p| (p.date, p.predicted))
            .collect();

        let band: Vec<(NaiveDate, f64, f64)> = points
            .iter()
            .filter(|p| p.date > last_actual_date)
            .map(|p| (p.date, p.lower, p.upper))
            .collect();

        let markers: Vec<(NaiveDate, f64, &'static str)> = summary
            .iter()
            .map(|entry| {
                (
                    last_actual_date + Duration::days(entry.offset_days),
                    entry.predicted_price,
                    entry.label,
                )
            })
            .collect();

        let highest = actual
            .iter()
            .map(|(_, v)| *v)
            .chain(points.iter().map(|p| p.predicted))
            .fold(0.0_f64, f64::max);
        let y_max = if highest > 0.0 { highest * 1.2 } else { 1.0 };

        Self {
            title,
            actual,
            predicted,
            band,
            markers,
            y_max,
        }
    }

    /// Render the chart to a PNG file
    pub fn render_png<P: AsRef<Path>>(&self, path: P, width: u32, height: u32) -> Result<()> {
        if self.actual.is_empty() && self.predicted.is_empty() {
            return Err(ForecastError::ChartError(
                "no data to draw".to_string(),
            ));
        }

        let dates = self
            .actual
            .iter()
            .map(|(d, _)| *d)
            .chain(self.predicted.iter().map(|(d, _)| *d));
        let x_min = dates.clone().min().unwrap();
        let mut x_max = dates.max().unwrap();
        if x_max == x_min {
            x_max = x_min + Duration::days(1);
        }

        let root = BitMapBackend::new(path.as_ref(), (width, height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ForecastError::ChartError(e.to_string()))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 30.0).into_font())
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0.0..self.y_max)
            .map_err(|e| ForecastError::ChartError(e.to_string()))?;

        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc("Price")
            .draw()
            .map_err(|e| ForecastError::ChartError(e.to_string()))?;

        if !self.band.is_empty() {
            let mut polygon: Vec<(NaiveDate, f64)> =
                self.band.iter().map(|(d, _, u)| (*d, *u)).collect();
            polygon.extend(self.band.iter().rev().map(|(d, l, _)| (*d, *l)));

            chart
                .draw_series(std::iter::once(Polygon::new(
                    polygon,
                    PREDICTED_COLOR.mix(0.2),
                )))
                .map_err(|e| ForecastError::ChartError(e.to_string()))?;
        }

        chart
            .draw_series(LineSeries::new(
                self.actual.iter().copied(),
                ACTUAL_COLOR.stroke_width(2),
            ))
            .map_err(|e| ForecastError::ChartError(e.to_string()))?;

        chart
            .draw_series(DashedLineSeries::new(
                self.predicted.iter().copied(),
                5,
                3,
                PREDICTED_COLOR.stroke_width(2),
            ))
            .map_err(|e| ForecastError::ChartError(e.to_string()))?;

        chart
            .draw_series(
                self.markers
                    .iter()
                    .map(|(d, v, _)| Circle::new((*d, *v), 4, MARKER_COLOR.filled())),
            )
            .map_err(|e| ForecastError::ChartError(e.to_string()))?;

        root.present()
            .map_err(|e| ForecastError::ChartError(e.to_string()))?;

        Ok(())
    }
}
