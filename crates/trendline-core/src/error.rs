// File: crates/trendline-core/src/error.rs
// Summary: Precondition errors raised when building chart data or toggling series.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("time axis is empty; at least one timestamp is required")]
    EmptyAxis,

    #[error("timestamps must be strictly increasing (index {index}: {previous} then {current})")]
    UnsortedAxis { index: usize, previous: f64, current: f64 },

    #[error("series '{name}' has {actual} samples, expected {expected}")]
    LengthMismatch { name: String, expected: usize, actual: usize },

    #[error("series '{name}' has a non-finite sample at index {index}")]
    NonFiniteValue { name: String, index: usize },

    #[error("a chart needs at least one series")]
    NoSeries,

    #[error("visibility vector has {actual} entries, expected {expected}")]
    VisibilityMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, ChartError>;
