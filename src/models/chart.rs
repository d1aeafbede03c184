//! Chart models

use std::sync::Arc;

/// A single data point on the price chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub price: f64,
}

/// Time-ordered, immutable sequence of price points.
///
/// Cloning is cheap and shares the underlying points, so snapshots can hand
/// the series to the view without copying it.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Arc<Vec<PricePoint>>,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_points(points: Vec<PricePoint>) -> Self {
        Self {
            points: Arc::new(points),
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when both handles share the same points, i.e. no append happened.
    pub fn ptr_eq(&self, other: &PriceSeries) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }
}

impl PartialEq for PriceSeries {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}
