// File: crates/trendline-core/src/render/percent.rs
// Summary: Percentage-stack renderer: per-timestamp shares of visible components as filled bands.

use std::time::Duration;

use skia_safe as skia;

use crate::animation::ValueAnimator;
use crate::geometry::{Rect, ValueRange};
use crate::scale::ScaleTransform;

use super::bars::BarComponent;
use super::{fade_to, fill_paint, series_clip, visible_window, with_alpha, ChartRenderer, DrawContext, RendererState};

/// Shares of `weights` summing to 1, or all zeros when the total is not positive.
pub fn normalized_fractions(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().map(|w| w.max(0.0)).sum();
    if total <= 0.0 {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|w| w.max(0.0) / total).collect()
}

pub struct PercentRenderer {
    state: RendererState,
    locations: Vec<f64>,
    components: Vec<BarComponent>,
    component_alphas: Vec<ValueAnimator<f64>>,
}

impl Default for PercentRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PercentRenderer {
    pub fn new() -> Self {
        let mut state = RendererState::default();
        state.vertical.set_immediate(ValueRange::unit());
        Self { state, locations: Vec::new(), components: Vec::new(), component_alphas: Vec::new() }
    }

    pub fn set_data(&mut self, locations: Vec<f64>, components: Vec<BarComponent>) {
        self.component_alphas.resize_with(components.len(), || ValueAnimator::new(1.0));
        self.locations = locations;
        self.components = components;
    }

    pub fn locations(&self) -> &[f64] { &self.locations }

    pub fn horizontal_range(&self) -> Option<ValueRange> {
        Some(ValueRange::new(*self.locations.first()?, *self.locations.last()?))
    }

    pub fn set_component_visible(&mut self, index: usize, visible: bool, duration: Duration) {
        if let Some(a) = self.component_alphas.get_mut(index) {
            fade_to(a, visible, duration);
        }
    }

    /// Current (fade-weighted) fractions at sample `index`.
    pub fn fractions_at(&self, index: usize) -> Vec<f64> {
        let weights: Vec<f64> = self
            .components
            .iter()
            .zip(&self.component_alphas)
            .map(|(c, a)| c.values.get(index).copied().unwrap_or(0.0) * a.current())
            .collect();
        normalized_fractions(&weights)
    }
}

impl ChartRenderer for PercentRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, dt: Duration) -> bool {
        self.component_alphas.iter_mut().fold(false, |running, a| a.tick(dt) || running)
    }

    fn render(&self, ctx: &DrawContext<'_>, bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() || chart_frame.is_empty() || self.components.is_empty() {
            return;
        }
        let projection = self.state.projection(chart_frame);
        let Some((first, last)) = visible_window(&self.locations, |x| *x, projection.horizontal) else { return };
        if first == last {
            return;
        }
        // cumulative[c][k]: top edge of component c at sample first + k
        let n = self.components.len();
        let mut cumulative = vec![Vec::with_capacity(last - first + 1); n];
        for i in first..=last {
            let mut acc = 0.0;
            for (c, f) in self.fractions_at(i).into_iter().enumerate() {
                acc += f;
                cumulative[c].push(acc);
            }
        }
        let xs: Vec<f32> = (first..=last).map(|i| projection.to_screen_x(self.locations[i])).collect();
        let bottom = projection.to_screen_y(0.0);
        let alpha = self.state.alpha.current();
        let canvas = ctx.canvas;
        canvas.save();
        canvas.clip_rect(series_clip(bounds, chart_frame), None, None);
        // Back to front: each band is the area under its cumulative edge.
        for c in (0..n).rev() {
            let mut path = skia::Path::new();
            path.move_to((xs[0], bottom));
            for (x, top) in xs.iter().zip(&cumulative[c]) {
                path.line_to((*x, projection.to_screen_y(*top)));
            }
            path.line_to((xs[xs.len() - 1], bottom));
            path.close();
            canvas.draw_path(&path, &fill_paint(with_alpha(self.components[c].color, alpha)));
        }
        canvas.restore();
    }
}
