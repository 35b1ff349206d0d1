// File: crates/trendline-core/src/series.rs
// Summary: Series collection model: shared time axis plus named, colored value series.
// Notes:
// - Timestamps are unix seconds stored as f64, the same unit every horizontal
//   range in the engine uses.
// - Construction validates the invariants once; everything downstream assumes them.

use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::geometry::ValueRange;

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: skia::Color,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: skia::Color, values: Vec<f64>) -> Self {
        Self { name: name.into(), color, values }
    }
}

/// Time axis shared by every series.
/// Contract: non-empty, strictly increasing, each series has one value per timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesCollection {
    timestamps: Vec<f64>,
    series: Vec<Series>,
}

impl SeriesCollection {
    pub fn new(timestamps: Vec<f64>, series: Vec<Series>) -> Result<Self> {
        if timestamps.is_empty() {
            return Err(ChartError::EmptyAxis);
        }
        for (i, w) in timestamps.windows(2).enumerate() {
            if !(w[1] > w[0]) {
                return Err(ChartError::UnsortedAxis { index: i + 1, previous: w[0], current: w[1] });
            }
        }
        for s in &series {
            if s.values.len() != timestamps.len() {
                return Err(ChartError::LengthMismatch {
                    name: s.name.clone(),
                    expected: timestamps.len(),
                    actual: s.values.len(),
                });
            }
            if let Some(index) = s.values.iter().position(|v| !v.is_finite()) {
                return Err(ChartError::NonFiniteValue { name: s.name.clone(), index });
            }
        }
        Ok(Self { timestamps, series })
    }

    pub fn timestamps(&self) -> &[f64] { &self.timestamps }
    pub fn series(&self) -> &[Series] { &self.series }
    pub fn len(&self) -> usize { self.timestamps.len() }
    pub fn is_empty(&self) -> bool { self.timestamps.is_empty() }
    pub fn series_count(&self) -> usize { self.series.len() }

    /// First to last timestamp.
    pub fn horizontal_range(&self) -> ValueRange {
        let first = self.timestamps.first().copied().unwrap_or(0.0);
        let last = self.timestamps.last().copied().unwrap_or(first);
        ValueRange::new(first, last)
    }

    /// Spacing between the first two samples, if there are two.
    pub fn native_spacing(&self) -> Option<f64> {
        match self.timestamps.as_slice() {
            [a, b, ..] => Some(b - a),
            _ => None,
        }
    }

    /// Index of the sample closest to `timestamp`; the first one wins ties.
    pub fn closest_index(&self, timestamp: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &t) in self.timestamps.iter().enumerate() {
            let d = (t - timestamp).abs();
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Series paired with `(timestamp, value)` points, as line renderers consume them.
    pub fn points(&self, series_index: usize) -> Vec<(f64, f64)> {
        self.series
            .get(series_index)
            .map(|s| self.timestamps.iter().copied().zip(s.values.iter().copied()).collect())
            .unwrap_or_default()
    }
}
