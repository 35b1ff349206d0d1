// File: crates/trendline-core/src/render/markers.rs
// Summary: Vertical marker line and per-line bullets highlighting the selected sample.

use std::time::Duration;

use skia_safe as skia;

use crate::animation::ValueAnimator;
use crate::geometry::Rect;
use crate::scale::ScaleTransform;

use super::{fade_to, fill_paint, stroke_paint, with_alpha, ChartRenderer, DrawContext, RendererState};

const BULLET_RADIUS: f32 = 4.0;
const BULLET_LINE_WIDTH: f32 = 2.0;

/// Vertical lines across the frame at fixed timestamps.
pub struct VerticalLineRenderer {
    state: RendererState,
    values: Vec<f64>,
    pub line_color: skia::Color,
    pub line_width: f32,
}

impl Default for VerticalLineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VerticalLineRenderer {
    pub fn new() -> Self {
        Self { state: RendererState::default(), values: Vec::new(), line_color: skia::Color::GRAY, line_width: 1.0 }
    }

    pub fn set_values(&mut self, values: Vec<f64>) {
        self.values = values;
    }

    pub fn values(&self) -> &[f64] { &self.values }
}

impl ChartRenderer for VerticalLineRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, _dt: Duration) -> bool {
        false
    }

    fn render(&self, ctx: &DrawContext<'_>, _bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() || chart_frame.is_empty() {
            return;
        }
        let projection = self.state.projection(chart_frame);
        let paint = stroke_paint(with_alpha(self.line_color, self.state.alpha.current()), self.line_width);
        for &v in &self.values {
            let x = projection.to_screen_x(v);
            if projection.is_x_visible(x, 0.0) {
                ctx.canvas.draw_line((x, chart_frame.top), (x, chart_frame.bottom), &paint);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bullet {
    /// `(timestamp, value)` of the highlighted sample.
    pub coordinate: (f64, f64),
    pub color: skia::Color,
}

/// Ring markers on each line at the selected sample; index-aligned with the lines.
pub struct BulletsRenderer {
    state: RendererState,
    bullets: Vec<Bullet>,
    bullet_alphas: Vec<ValueAnimator<f64>>,
    inner_color: ValueAnimator<skia::Color>,
}

impl Default for BulletsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BulletsRenderer {
    pub fn new() -> Self {
        Self {
            state: RendererState::default(),
            bullets: Vec::new(),
            bullet_alphas: Vec::new(),
            inner_color: ValueAnimator::new(skia::Color::WHITE),
        }
    }

    pub fn set_bullets(&mut self, bullets: Vec<Bullet>) {
        self.bullet_alphas.resize_with(bullets.len(), || ValueAnimator::new(1.0));
        self.bullets = bullets;
    }

    pub fn bullets(&self) -> &[Bullet] { &self.bullets }

    pub fn set_line_visible(&mut self, index: usize, visible: bool, duration: Duration) {
        if index >= self.bullet_alphas.len() {
            self.bullet_alphas.resize_with(index + 1, || ValueAnimator::new(1.0));
        }
        fade_to(&mut self.bullet_alphas[index], visible, duration);
    }

    /// Fill of the ring, normally the chart background.
    pub fn set_inner_color(&mut self, color: skia::Color, duration: Duration) {
        self.inner_color.animate(color, duration);
    }

    pub fn inner_color(&self) -> skia::Color { self.inner_color.current() }
}

impl ChartRenderer for BulletsRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, dt: Duration) -> bool {
        let bullets = self.bullet_alphas.iter_mut().fold(false, |running, a| a.tick(dt) || running);
        let inner = self.inner_color.tick(dt);
        bullets || inner
    }

    fn render(&self, ctx: &DrawContext<'_>, _bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() || chart_frame.is_empty() {
            return;
        }
        let projection = self.state.projection(chart_frame);
        let general = self.state.alpha.current();
        for (bullet, alpha) in self.bullets.iter().zip(&self.bullet_alphas) {
            let alpha = alpha.current() * general;
            if alpha <= 0.0 {
                continue;
            }
            let (t, v) = bullet.coordinate;
            let center = (projection.to_screen_x(t), projection.to_screen_y(v));
            if !projection.is_x_visible(center.0, 0.0) {
                continue;
            }
            ctx.canvas.draw_circle(center, BULLET_RADIUS, &fill_paint(with_alpha(self.inner_color.current(), alpha)));
            ctx.canvas.draw_circle(center, BULLET_RADIUS, &stroke_paint(with_alpha(bullet.color, alpha), BULLET_LINE_WIDTH));
        }
    }
}
