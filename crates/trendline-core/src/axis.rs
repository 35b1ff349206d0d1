// File: crates/trendline-core/src/axis.rs
// Summary: Axis label engine: power-of-two date strides and "nice number" value gridlines.
// Notes:
// - Everything here is pure. The only state is the previous stride kept by
//   `HorizontalLabeler` so label sets are replaced only when the stride moves.

use tracing::debug;

use crate::format::format_decimals;
use crate::geometry::{ValueRange, MIN_SPAN};

/// Anchors a normalized gridline step is snapped to, largest first.
pub const VERTICAL_BASE_ANCHORS: [f64; 11] = [9.0, 8.0, 6.0, 5.0, 4.0, 3.0, 2.5, 2.0, 1.5, 1.0, 0.5];
/// Anchor used when the normalized step does not exceed any entry (only reachable for NaN input).
pub const DEFAULT_VERTICAL_BASE_ANCHOR: f64 = 0.5;

/// Decimal places shown for a step in `[1, 10)`; grows with each power of ten below 1.
const BASE_DECIMALS: usize = 2;
/// Hard cap on generated rows, keeps degenerate input from spinning.
const MAX_ROWS: usize = 10_000;
const MAX_STRIDE: f64 = (1u64 << 40) as f64;

/// One axis label: where it sits on the axis and what it reads.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisLabel {
    pub value: f64,
    pub text: String,
}

impl AxisLabel {
    pub fn new(value: f64, text: impl Into<String>) -> Self {
        Self { value, text: text.into() }
    }

    /// Placeholder emitted for an empty domain.
    pub fn sentinel() -> Self {
        Self::new(0.0, "0")
    }
}

// ---- horizontal (time) ------------------------------------------------------

/// Power-of-two subsampling stride for date labels.
pub fn horizontal_stride(range_distance: f64, native_spacing: f64, available_width: f32, min_label_distance: f32) -> usize {
    let items = range_distance.max(0.0) / native_spacing.max(MIN_SPAN);
    let max_items = (available_width / min_label_distance.max(1.0)).max(1.0) as f64;
    let wanted = (items / max_items).ceil();
    let wanted = if wanted.is_finite() { wanted.clamp(1.0, MAX_STRIDE) as u64 } else { 1 };
    wanted.next_power_of_two() as usize
}

/// Labels for every `stride`-th timestamp, anchored at the last sample, over the whole domain.
pub fn horizontal_labels(timestamps: &[f64], stride: usize, formatter: impl Fn(f64) -> String) -> Vec<AxisLabel> {
    if timestamps.is_empty() {
        return vec![AxisLabel::sentinel()];
    }
    let stride = stride.max(1);
    let mut labels: Vec<AxisLabel> = timestamps
        .iter()
        .rev()
        .step_by(stride)
        .map(|&t| AxisLabel::new(t, formatter(t)))
        .collect();
    labels.reverse();
    labels
}

/// Keeps the last stride so a new label set is produced only when it changes.
#[derive(Clone, Debug, Default)]
pub struct HorizontalLabeler {
    previous_stride: Option<usize>,
}

impl HorizontalLabeler {
    pub fn new() -> Self { Self::default() }

    /// Forget the previous stride; the next update always produces labels.
    pub fn reset(&mut self) {
        self.previous_stride = None;
    }

    pub fn previous_stride(&self) -> Option<usize> { self.previous_stride }

    /// New label set when the stride changed (or `force`), else `None`.
    pub fn update(
        &mut self,
        timestamps: &[f64],
        visible: ValueRange,
        available_width: f32,
        min_label_distance: f32,
        fallback_spacing: f64,
        force: bool,
        formatter: impl Fn(f64) -> String,
    ) -> Option<Vec<AxisLabel>> {
        let spacing = match timestamps {
            [a, b, ..] => b - a,
            _ => fallback_spacing,
        };
        let stride = horizontal_stride(visible.distance(), spacing, available_width, min_label_distance);
        if !force && self.previous_stride == Some(stride) {
            return None;
        }
        debug!(stride, previous = ?self.previous_stride, force, "horizontal label stride changed");
        self.previous_stride = Some(stride);
        Some(horizontal_labels(timestamps, stride, formatter))
    }
}

// ---- vertical (values) ------------------------------------------------------

/// Gridline step and the decimals needed to print it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NiceStep {
    pub step: f64,
    /// The anchor the normalized step was snapped to.
    pub anchor: f64,
    pub decimals: usize,
}

/// Round gridline step for `distance` spread over `available_height` pixels.
pub fn nice_step(distance: f64, available_height: f32, min_label_distance: f32) -> Option<NiceStep> {
    if !(distance > 0.0) || !(available_height > 0.0) || !distance.is_finite() {
        return None;
    }
    let rows = (available_height / min_label_distance.max(1.0)).max(1.0) as f64;
    let mut normalized = distance / rows;
    let mut multiplier = 1.0;
    while normalized > 10.0 {
        normalized /= 10.0;
        multiplier *= 10.0;
    }
    let mut divider = 1.0;
    let mut decimals = BASE_DECIMALS;
    while normalized < 1.0 {
        normalized *= 10.0;
        divider *= 10.0;
        decimals += 1;
    }
    let anchor = VERTICAL_BASE_ANCHORS
        .iter()
        .copied()
        .find(|&a| normalized > a)
        .unwrap_or(DEFAULT_VERTICAL_BASE_ANCHOR);
    Some(NiceStep { step: anchor * multiplier / divider, anchor, decimals })
}

/// Gridline layout of one value axis before row reconciliation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisRows {
    pub start: f64,
    pub step: f64,
    pub count: usize,
    pub decimals: usize,
}

impl AxisRows {
    /// Rows needed to cover `range`; `count` is zero for hidden series.
    pub fn compute(range: ValueRange, available_height: f32, min_label_distance: f32, visible: bool) -> Option<Self> {
        let nice = nice_step(range.distance(), available_height, min_label_distance)?;
        let start = (range.lower / nice.step).floor() * nice.step;
        let count = if visible { row_count(start, nice.step, range.upper) } else { 0 };
        Some(Self { start, step: nice.step, count, decimals: nice.decimals })
    }

    /// Range from the first row through the value after the last of `rows` rows.
    pub fn expanded_range(&self, rows: usize) -> ValueRange {
        ValueRange::new(self.start, self.start + self.step * rows as f64)
    }

    pub fn labels(&self, rows: usize, formatter: impl Fn(f64, usize) -> String) -> Vec<AxisLabel> {
        (0..rows)
            .map(|i| {
                let v = self.start + self.step * i as f64;
                AxisLabel::new(v, formatter(v, self.decimals))
            })
            .collect()
    }
}

fn row_count(start: f64, step: f64, upper: f64) -> usize {
    let mut count = 0;
    while count < MAX_ROWS && start + step * (count as f64) < upper {
        count += 1;
    }
    count
}

/// Gridlines for one axis: the expanded range to animate to and its labels.
pub fn vertical_labels(range: ValueRange, available_height: f32, min_label_distance: f32) -> (ValueRange, Vec<AxisLabel>) {
    match AxisRows::compute(range, available_height, min_label_distance, true) {
        Some(rows) if rows.count > 0 => (rows.expanded_range(rows.count), rows.labels(rows.count, format_decimals)),
        _ => (ValueRange::unit(), vec![AxisLabel::sentinel()]),
    }
}

/// Row count shared by several axes: the longest visible one wins and the
/// shorter ones are extended to it. Zero when no axis has a visible row.
pub fn shared_row_count(axes: &[Option<AxisRows>]) -> usize {
    axes.iter().flatten().map(|a| a.count).max().unwrap_or(0)
}

/// Fixed 0-100 % gridlines on a unit range.
pub fn percent_labels() -> Vec<AxisLabel> {
    [0.0, 25.0, 50.0, 75.0, 100.0]
        .iter()
        .map(|&v| AxisLabel::new(v / 100.0, format_decimals(v, 0)))
        .collect()
}
