use std::path::Path;

use chrono::{DateTime, Utc};
use plotters::prelude::*;
use thiserror::Error;

use crate::models::{PricePoint, PriceSeries};

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Not enough price data to generate chart ({0} point(s), minimum 2 required)")]
    NotEnoughData(usize),
    #[error("Invalid timestamp in series: {0}")]
    InvalidTimestamp(i64),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

/// Append a price sample to the series.
///
/// A sample whose timestamp OR price equals the last point's is dropped and
/// the very same series is returned. Only a sample that differs in both
/// grows the series.
pub fn append(series: &PriceSeries, timestamp: i64, price: f64) -> PriceSeries {
    let point = PricePoint { timestamp, price };

    let Some(last) = series.last() else {
        return PriceSeries::from_points(vec![point]);
    };

    if last.timestamp == timestamp || last.price == price {
        return series.clone();
    }

    let mut points = Vec::with_capacity(series.len() + 1);
    points.extend_from_slice(series.points());
    points.push(point);
    PriceSeries::from_points(points)
}

fn to_datetime(timestamp_ms: i64) -> Result<DateTime<Utc>, ChartError> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).ok_or(ChartError::InvalidTimestamp(timestamp_ms))
}

/// Render the series as a PNG line chart at `path`
pub fn render_chart(
    series: &PriceSeries,
    path: &Path,
    width: u32,
    height: u32,
) -> Result<(), ChartError> {
    let points = series
        .points()
        .iter()
        .map(|p| to_datetime(p.timestamp).map(|t| (t, p.price)))
        .collect::<Result<Vec<_>, ChartError>>()?;

    if points.len() < 2 {
        return Err(ChartError::NotEnoughData(points.len()));
    }

    let backend = BitMapBackend::new(path, (width, height));
    let root = backend.into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ChartError::Drawing(format!("Failed to fill canvas: {}", e)))?;

    let min_price = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max_price = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    // Pad the y range by 10% so the line does not hug the frame
    let price_range = (max_price - min_price).max(1e-8);
    let padding = price_range * 0.1;
    let y_min = (min_price - padding).max(0.0);
    let y_max = max_price + padding;

    let x_min = points[0].0;
    let x_max = points[points.len() - 1].0;

    let mut chart = ChartBuilder::on(&root)
        .caption("BTC/USD Price", ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| ChartError::Drawing(format!("Failed to build chart: {}", e)))?;

    chart
        .configure_mesh()
        .y_desc("USD")
        .x_desc("Time")
        .x_label_formatter(&|t: &DateTime<Utc>| t.format("%H:%M:%S").to_string())
        .draw()
        .map_err(|e| ChartError::Drawing(format!("Failed to draw mesh: {}", e)))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(|e| ChartError::Drawing(format!("Failed to draw line: {}", e)))?;

    chart
        .draw_series(points.iter().map(|p| Circle::new(*p, 3, BLUE.filled())))
        .map_err(|e| ChartError::Drawing(format!("Failed to draw points: {}", e)))?;

    root.present()
        .map_err(|e| ChartError::Drawing(format!("Failed to render chart: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series_of(points: &[(i64, f64)]) -> PriceSeries {
        points.iter().fold(PriceSeries::new(), |s, (t, p)| append(&s, *t, *p))
    }

    #[test]
    fn test_append_to_empty_series() {
        let series = append(&PriceSeries::new(), 1_000, 27000.5);
        assert_eq!(
            series.points(),
            &[PricePoint {
                timestamp: 1_000,
                price: 27000.5
            }]
        );
    }

    #[test]
    fn test_same_timestamp_is_suppressed_even_if_price_differs() {
        let series = series_of(&[(1_000, 100.0)]);
        let next = append(&series, 1_000, 101.0);
        assert!(next.ptr_eq(&series));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_same_price_is_suppressed_even_if_timestamp_differs() {
        let series = series_of(&[(1_000, 100.0)]);
        let next = append(&series, 2_000, 100.0);
        assert!(next.ptr_eq(&series));
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_distinct_sample_appends_one_point() {
        let series = series_of(&[(1_000, 100.0), (2_000, 101.0)]);
        let next = append(&series, 3_000, 99.5);

        assert!(!next.ptr_eq(&series));
        assert_eq!(series.len(), 2);
        assert_eq!(next.len(), 3);
        assert_eq!(&next.points()[..2], series.points());
        assert_eq!(
            next.last(),
            Some(&PricePoint {
                timestamp: 3_000,
                price: 99.5
            })
        );
    }

    #[test]
    fn test_only_last_point_is_compared() {
        // 100.0 reappears after a different price, so it is appended again
        let series = series_of(&[(1_000, 100.0), (2_000, 101.0), (3_000, 100.0)]);
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_render_needs_two_points() {
        let series = series_of(&[(1_000, 100.0)]);
        let path = std::env::temp_dir().join("pleb_wallet_chart_short.png");
        assert!(matches!(
            render_chart(&series, &path, 320, 200),
            Err(ChartError::NotEnoughData(1))
        ));
    }
}
