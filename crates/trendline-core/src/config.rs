// File: crates/trendline-core/src/config.rs
// Summary: Tunables for controllers, renderers and the range selection control.

use std::time::Duration;

use crate::types::DAY;

/// Controller and renderer tunables. All distances are in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Duration of every "animated" transition.
    pub animation_duration: Duration,
    /// Minimum spacing between two date labels.
    pub min_axis_x_label_distance: f32,
    /// Minimum spacing between two value gridlines.
    pub min_axis_y_label_distance: f32,
    /// Length of the overview window selected on load (seconds).
    pub initial_range_length: f64,
    /// Length of the window shown after a drill-in (seconds).
    pub zoomed_range_length: f64,
    pub range_paging_enabled: bool,
    /// Page size (fraction of the whole domain) used by the range control.
    pub range_page_size: f64,
    /// Pixel column width within which line points may be merged.
    pub lines_optimization_level: f32,
    pub preview_lines_optimization_level: f32,
    pub main_line_width: f32,
    pub preview_line_width: f32,
    pub details: DetailsMetrics,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(300),
            min_axis_x_label_distance: 60.0,
            min_axis_y_label_distance: 50.0,
            initial_range_length: DAY * 60.0,
            zoomed_range_length: DAY,
            range_paging_enabled: false,
            range_page_size: 0.05,
            lines_optimization_level: 1.0,
            preview_lines_optimization_level: 2.0,
            main_line_width: 2.0,
            preview_line_width: 1.0,
            details: DetailsMetrics::default(),
        }
    }
}

impl ChartConfig {
    /// Duration to use for a transition, zero when not animated.
    pub fn duration(&self, animated: bool) -> Duration {
        if animated { self.animation_duration } else { Duration::ZERO }
    }
}

/// Layout metrics of the details tooltip banner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetailsMetrics {
    pub font_size: f32,
    pub margins: f32,
    pub row_height: f32,
    pub corner_radius: f32,
    pub arrow_width: f32,
    /// Gap between the marker line and the banner.
    pub position_offset: f32,
    /// Gap between the content frame top and the banner.
    pub top_offset: f32,
}

impl Default for DetailsMetrics {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            margins: 10.0,
            row_height: 20.0,
            corner_radius: 5.0,
            arrow_width: 10.0,
            position_offset: 10.0,
            top_offset: 10.0,
        }
    }
}

/// Tunables of the dual-thumb range selection control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeSelectionConfig {
    /// Width of the touch zone around each thumb.
    pub hit_tolerance: f32,
    /// Smallest allowed window, as a fraction of the whole domain.
    pub min_distance: f64,
    /// Horizontal margin between the view edge and the content frame.
    pub horizontal_margin: f32,
    /// Vertical margin reserved for the selection frame stroke.
    pub frame_line_width: f32,
    /// Width of the thumb handles drawn on the selection frame.
    pub thumb_width: f32,
    pub corner_radius: f32,
}

impl Default for RangeSelectionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: 25.0,
            min_distance: 0.05,
            horizontal_margin: 16.0,
            frame_line_width: 1.0,
            thumb_width: 10.0,
            corner_radius: 5.0,
        }
    }
}
