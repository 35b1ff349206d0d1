// File: crates/trendline-core/src/range_selection.rs
// Summary: Dual-thumb range selection control: gesture state machine, paging snap and overlay drawing.
// Notes:
// - The selected range is a fraction of the whole horizontal domain, always
//   within `[0, 1]` and at least `min_distance` wide.
// - Pointer positions are view pixels; the content frame is the view inset by
//   the horizontal margin and the frame stroke.

use std::time::Duration;

use skia_safe as skia;
use tracing::trace;

use crate::animation::ValueAnimator;
use crate::config::RangeSelectionConfig;
use crate::geometry::{Rect, ValueRange};
use crate::render::{fill_paint, stroke_paint};
use crate::theme::Theme;

/// What the active pointer is dragging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeMarker {
    Lower,
    Upper,
    Window,
}

/// Notifications produced by pointer handling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RangeEvent {
    /// The selection moved; `finished` is set on pointer release.
    Changed { range: ValueRange, finished: bool },
    /// A pointer went down and up without grabbing anything.
    TouchedOutside,
}

pub struct RangeSelection {
    config: RangeSelectionConfig,
    bounds: Rect,
    lower: f64,
    upper: f64,
    min_distance: f64,
    paging_enabled: bool,
    enabled: bool,
    marker: Option<RangeMarker>,
    marker_offset: f32,
    displayed: ValueAnimator<ValueRange>,
    tint_color: ValueAnimator<skia::Color>,
    frame_color: ValueAnimator<skia::Color>,
    arrow_color: ValueAnimator<skia::Color>,
}

impl RangeSelection {
    pub fn new(config: RangeSelectionConfig, bounds: Rect, theme: &Theme) -> Self {
        Self {
            config,
            bounds,
            lower: 0.0,
            upper: 1.0,
            min_distance: config.min_distance,
            paging_enabled: false,
            enabled: true,
            marker: None,
            marker_offset: 0.0,
            displayed: ValueAnimator::new(ValueRange::unit()),
            tint_color: ValueAnimator::new(theme.range_tint),
            frame_color: ValueAnimator::new(theme.range_frame),
            arrow_color: ValueAnimator::new(theme.range_thumb_arrow),
        }
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect { self.bounds }

    /// Area the overview renderers draw into.
    pub fn content_frame(&self) -> Rect {
        let b = self.bounds;
        let dx = self.config.horizontal_margin;
        let dy = self.config.frame_line_width;
        Rect::from_ltrb(b.left + dx, b.top + dy, (b.right - dx).max(b.left + dx), (b.bottom - dy).max(b.top + dy))
    }

    /// Selected fractional range (gesture target, not the animated one).
    pub fn range(&self) -> ValueRange {
        ValueRange::new(self.lower, self.upper)
    }

    /// Range as currently drawn.
    pub fn displayed_range(&self) -> ValueRange {
        self.displayed.current()
    }

    /// Programmatic update, e.g. from the chart controller.
    pub fn set_range(&mut self, range: ValueRange, duration: Duration) {
        let lower = range.lower.clamp(0.0, 1.0);
        let upper = range.upper.clamp(lower, 1.0);
        self.lower = lower;
        self.upper = upper;
        self.displayed.animate(ValueRange::new(lower, upper), duration);
    }

    /// Snap moves to a grid of `page_size` and use it as the minimum width.
    pub fn set_paging(&mut self, enabled: bool, page_size: f64) {
        self.paging_enabled = enabled;
        self.min_distance = if page_size > 0.0 { page_size.min(1.0) } else { self.config.min_distance };
    }

    pub fn is_paging_enabled(&self) -> bool { self.paging_enabled }
    pub fn min_distance(&self) -> f64 { self.min_distance }

    /// A disabled control ignores pointers and drops the active drag.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.marker = None;
        }
        self.enabled = enabled;
    }

    pub fn active_marker(&self) -> Option<RangeMarker> { self.marker }

    fn location(&self, fraction: f64) -> f32 {
        let frame = self.content_frame();
        frame.left + frame.width() * fraction as f32
    }

    fn fraction_for(&self, x: f32) -> f64 {
        let frame = self.content_frame();
        if frame.width() <= 0.0 {
            return 0.0;
        }
        (((x - frame.left) / frame.width()) as f64).clamp(0.0, 1.0)
    }

    /// Nearest page boundary; the lower one wins a tie.
    fn snap(&self, fraction: f64) -> f64 {
        let step = self.min_distance;
        let pages = (1.0 / step + 1e-9).floor();
        let below = (fraction / step).floor().clamp(0.0, pages);
        let above = (below + 1.0).min(pages);
        let (lo, hi) = (below * step, above * step);
        if (hi - fraction).abs() < (fraction - lo).abs() { hi } else { lo }
    }

    /// Classify a press. Returns true when a thumb or the window was grabbed.
    pub fn pointer_down(&mut self, x: f32) -> bool {
        if !self.enabled {
            return false;
        }
        let tolerance = self.config.hit_tolerance;
        let lower_x = self.location(self.lower);
        let upper_x = self.location(self.upper);
        let (marker, anchor) = if (upper_x - x + tolerance / 2.0).abs() < tolerance {
            (RangeMarker::Upper, upper_x)
        } else if (lower_x - x - tolerance / 2.0).abs() < tolerance {
            (RangeMarker::Lower, lower_x)
        } else if x > lower_x && x < upper_x {
            (RangeMarker::Window, lower_x)
        } else {
            self.marker = None;
            return false;
        };
        trace!(?marker, x, "range selection grabbed");
        self.marker = Some(marker);
        self.marker_offset = x - anchor;
        true
    }

    pub fn pointer_move(&mut self, x: f32) -> Option<RangeEvent> {
        if !self.enabled {
            return None;
        }
        let marker = self.marker?;
        self.update_marker(marker, x);
        Some(RangeEvent::Changed { range: self.range(), finished: false })
    }

    pub fn pointer_up(&mut self, x: f32) -> Option<RangeEvent> {
        if !self.enabled {
            return None;
        }
        let Some(marker) = self.marker.take() else {
            return Some(RangeEvent::TouchedOutside);
        };
        self.update_marker(marker, x);
        Some(RangeEvent::Changed { range: self.range(), finished: true })
    }

    /// Drop the drag without reporting anything.
    pub fn pointer_cancel(&mut self) {
        self.marker = None;
    }

    fn update_marker(&mut self, marker: RangeMarker, x: f32) {
        let raw = self.fraction_for(x - self.marker_offset);
        let fraction = if self.paging_enabled { self.snap(raw) } else { raw };
        match marker {
            RangeMarker::Lower => {
                self.lower = fraction.min(self.upper - self.min_distance).max(0.0);
            }
            RangeMarker::Upper => {
                self.upper = fraction.max(self.lower + self.min_distance).min(1.0);
            }
            RangeMarker::Window => {
                let width = self.upper - self.lower;
                self.lower = fraction.min(1.0 - width).max(0.0);
                self.upper = self.lower + width;
            }
        }
        trace!(?marker, lower = self.lower, upper = self.upper, "range selection moved");
        self.displayed.set_immediate(self.range());
    }

    pub fn apply_theme(&mut self, theme: &Theme, duration: Duration) {
        self.tint_color.animate(theme.range_tint, duration);
        self.frame_color.animate(theme.range_frame, duration);
        self.arrow_color.animate(theme.range_thumb_arrow, duration);
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        let range = self.displayed.tick(dt);
        let tint = self.tint_color.tick(dt);
        let frame = self.frame_color.tick(dt);
        let arrow = self.arrow_color.tick(dt);
        range || tint || frame || arrow
    }

    /// Tint outside the selection, then the frame with its two thumbs.
    pub fn render_overlay(&self, canvas: &skia::Canvas) {
        let content = self.content_frame();
        if content.is_empty() {
            return;
        }
        let range = self.displayed.current();
        let lx = self.location(range.lower);
        let ux = self.location(range.upper);
        let tint = fill_paint(self.tint_color.current());
        if lx > content.left {
            canvas.draw_rect(skia::Rect::from_ltrb(content.left, content.top, lx, content.bottom), &tint);
        }
        if ux < content.right {
            canvas.draw_rect(skia::Rect::from_ltrb(ux, content.top, content.right, content.bottom), &tint);
        }

        let line = self.config.frame_line_width;
        let thumb = self.config.thumb_width;
        let top = content.top - line;
        let bottom = content.bottom + line;
        let frame = fill_paint(self.frame_color.current());
        let radius = self.config.corner_radius;
        let left_thumb = skia::Rect::from_ltrb(lx - thumb, top, lx, bottom);
        let right_thumb = skia::Rect::from_ltrb(ux, top, ux + thumb, bottom);
        canvas.draw_round_rect(left_thumb, radius, radius, &frame);
        canvas.draw_round_rect(right_thumb, radius, radius, &frame);
        canvas.draw_rect(skia::Rect::from_ltrb(lx, top, ux, top + line), &frame);
        canvas.draw_rect(skia::Rect::from_ltrb(lx, bottom - line, ux, bottom), &frame);

        let arrow = stroke_paint(self.arrow_color.current(), 1.5);
        let cy = (top + bottom) / 2.0;
        let h = thumb * 0.25;
        for (cx, dir) in [(lx - thumb / 2.0, -1.0f32), (ux + thumb / 2.0, 1.0)] {
            canvas.draw_line((cx - dir * h / 2.0, cy - h), (cx + dir * h / 2.0, cy), &arrow);
            canvas.draw_line((cx + dir * h / 2.0, cy), (cx - dir * h / 2.0, cy + h), &arrow);
        }
    }
}
