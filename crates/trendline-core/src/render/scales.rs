// File: crates/trendline-core/src/render/scales.rs
// Summary: Date labels under the frame and value gridlines with labels, both crossfading label sets.

use std::time::Duration;

use skia_safe as skia;

use crate::animation::ValueAnimator;
use crate::axis::AxisLabel;
use crate::geometry::Rect;
use crate::scale::ScaleTransform;
use crate::text::{TextAnchor, TextWeight};

use super::{fade_to, stroke_paint, with_alpha, ChartRenderer, DrawContext, RendererState};

const LABEL_FONT_SIZE: f32 = 11.0;
/// Gap between the frame bottom and the date label baseline.
const DATE_LABEL_OFFSET: f32 = 6.0;
/// Gap between a gridline and the value label sitting on it.
const VALUE_LABEL_OFFSET: f32 = 4.0;

#[derive(Clone, Debug)]
struct LabelSet {
    labels: Vec<AxisLabel>,
    alpha: ValueAnimator<f64>,
}

/// Label sets being shown: the newest fades in while older ones fade out and
/// are dropped once invisible.
#[derive(Clone, Debug, Default)]
pub struct AnimatedLabels {
    sets: Vec<LabelSet>,
}

impl AnimatedLabels {
    pub fn set(&mut self, labels: Vec<AxisLabel>, duration: Duration) {
        if duration.is_zero() {
            self.sets.clear();
            self.sets.push(LabelSet { labels, alpha: ValueAnimator::new(1.0) });
            return;
        }
        for set in &mut self.sets {
            set.alpha.animate(0.0, duration);
        }
        let mut alpha = ValueAnimator::new(0.0);
        alpha.animate(1.0, duration);
        self.sets.push(LabelSet { labels, alpha });
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        let running = self.sets.iter_mut().fold(false, |running, s| s.alpha.tick(dt) || running);
        self.sets.retain(|s| s.alpha.end() > 0.0 || s.alpha.is_animating());
        running
    }

    /// The newest label set.
    pub fn current(&self) -> &[AxisLabel] {
        self.sets.last().map(|s| s.labels.as_slice()).unwrap_or(&[])
    }

    /// Number of sets still on screen (fading ones included).
    pub fn set_count(&self) -> usize { self.sets.len() }

    pub fn iter(&self) -> impl Iterator<Item = (&[AxisLabel], f64)> + '_ {
        self.sets.iter().map(|s| (s.labels.as_slice(), s.alpha.current()))
    }
}

pub struct HorizontalScalesRenderer {
    state: RendererState,
    labels: AnimatedLabels,
    pub labels_color: skia::Color,
}

impl Default for HorizontalScalesRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HorizontalScalesRenderer {
    pub fn new() -> Self {
        Self { state: RendererState::default(), labels: AnimatedLabels::default(), labels_color: skia::Color::GRAY }
    }

    pub fn set_labels(&mut self, labels: Vec<AxisLabel>, duration: Duration) {
        self.labels.set(labels, duration);
    }

    pub fn labels(&self) -> &AnimatedLabels { &self.labels }
}

impl ChartRenderer for HorizontalScalesRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, dt: Duration) -> bool {
        self.labels.tick(dt)
    }

    fn render(&self, ctx: &DrawContext<'_>, bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() || chart_frame.is_empty() {
            return;
        }
        let projection = self.state.projection(chart_frame);
        let general = self.state.alpha.current();
        let y = chart_frame.bottom + LABEL_FONT_SIZE + DATE_LABEL_OFFSET;
        for (labels, alpha) in self.labels.iter() {
            let color = with_alpha(self.labels_color, alpha * general);
            for label in labels {
                let x = projection.to_screen_x(label.value);
                if x < bounds.left || x > bounds.right {
                    continue;
                }
                ctx.text.draw(ctx.canvas, &label.text, x, y, LABEL_FONT_SIZE, color, TextAnchor::Center, TextWeight::Regular);
            }
        }
    }
}

pub struct VerticalScalesRenderer {
    state: RendererState,
    labels: AnimatedLabels,
    lines_alpha: ValueAnimator<f64>,
    pub labels_color: skia::Color,
    pub horizontal_lines_color: skia::Color,
    pub axis_color: skia::Color,
    /// Draw labels against the right edge of the frame (second axis).
    pub right_aligned: bool,
}

impl Default for VerticalScalesRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VerticalScalesRenderer {
    pub fn new() -> Self {
        Self {
            state: RendererState::default(),
            labels: AnimatedLabels::default(),
            lines_alpha: ValueAnimator::new(1.0),
            labels_color: skia::Color::GRAY,
            horizontal_lines_color: skia::Color::LIGHT_GRAY,
            axis_color: skia::Color::GRAY,
            right_aligned: false,
        }
    }

    pub fn set_labels(&mut self, labels: Vec<AxisLabel>, duration: Duration) {
        self.labels.set(labels, duration);
    }

    pub fn labels(&self) -> &AnimatedLabels { &self.labels }

    /// Fade the gridlines and baseline independently of the labels.
    pub fn set_horizontal_lines_visible(&mut self, visible: bool, duration: Duration) {
        fade_to(&mut self.lines_alpha, visible, duration);
    }

    pub fn horizontal_lines_visible(&self) -> bool {
        self.lines_alpha.end() > 0.0
    }
}

impl ChartRenderer for VerticalScalesRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, dt: Duration) -> bool {
        let labels = self.labels.tick(dt);
        let lines = self.lines_alpha.tick(dt);
        labels || lines
    }

    fn render(&self, ctx: &DrawContext<'_>, _bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() || chart_frame.is_empty() {
            return;
        }
        let projection = self.state.projection(chart_frame);
        let general = self.state.alpha.current();
        let lines = self.lines_alpha.current();
        let canvas = ctx.canvas;
        let (x, anchor) = if self.right_aligned {
            (chart_frame.right, TextAnchor::Right)
        } else {
            (chart_frame.left, TextAnchor::Left)
        };
        for (labels, alpha) in self.labels.iter() {
            let line_paint = stroke_paint(with_alpha(self.horizontal_lines_color, alpha * lines * general), 1.0);
            let text_color = with_alpha(self.labels_color, alpha * general);
            for label in labels {
                let y = projection.to_screen_y(label.value);
                if y < chart_frame.top - 1.0 || y > chart_frame.bottom + 1.0 {
                    continue;
                }
                if lines > 0.0 {
                    canvas.draw_line((chart_frame.left, y), (chart_frame.right, y), &line_paint);
                }
                ctx.text.draw(canvas, &label.text, x, y - VALUE_LABEL_OFFSET, LABEL_FONT_SIZE, text_color, anchor, TextWeight::Regular);
            }
        }
        if lines > 0.0 {
            let axis = stroke_paint(with_alpha(self.axis_color, lines * general), 1.0);
            canvas.draw_line((chart_frame.left, chart_frame.bottom), (chart_frame.right, chart_frame.bottom), &axis);
        }
    }
}
