// File: crates/trendline-core/src/lib.rs
// Summary: Core library entry point; exports the animated time-series chart engine.

pub mod error;
pub mod types;
pub mod geometry;
pub mod config;
pub mod animation;
pub mod series;
pub mod format;
pub mod axis;
pub mod scale;
pub mod theme;
pub mod text;
pub mod render;
pub mod range_selection;
pub mod controller;
pub mod chart;

pub use animation::{Easing, FrameClock, ValueAnimator};
pub use chart::{ChartView, RangeSelectionView, ViewOptions};
pub use config::{ChartConfig, DetailsMetrics, RangeSelectionConfig};
pub use controller::{
    ChartComponent, ChartKind, ControllerEvent, DrillTicket, Layer, PercentController, StackedBarsController,
    TwoAxisLinesController, ZoomState,
};
pub use error::{ChartError, Result};
pub use geometry::{Point, Rect, ValueRange};
pub use range_selection::{RangeEvent, RangeMarker, RangeSelection};
pub use series::{Series, SeriesCollection};
pub use theme::Theme;
pub use text::TextShaper;
pub use types::{Insets, ViewId};
