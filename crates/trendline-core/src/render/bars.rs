// File: crates/trendline-core/src/render/bars.rs
// Summary: Stacked bar renderer with per-component fades and single-bar highlight.
// Notes:
// - Bar `i` covers `[location[i] - bar_width, location[i]]` on the time axis.
// - A hidden component keeps its slot but its height fades to zero, so the
//   stack above it settles down smoothly.

use std::time::Duration;

use skia_safe as skia;

use crate::animation::ValueAnimator;
use crate::geometry::{Rect, ValueRange};
use crate::scale::ScaleTransform;

use super::{fade_to, fill_paint, series_clip, visible_window, with_alpha, ChartRenderer, DrawContext, RendererState};

/// How far non-selected bars fade while a bar is highlighted.
const DIMMED_ALPHA: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct BarComponent {
    pub color: skia::Color,
    pub values: Vec<f64>,
}

impl BarComponent {
    pub fn new(color: skia::Color, values: Vec<f64>) -> Self {
        Self { color, values }
    }
}

/// Stacked range `0...max(sum)` of the components flagged visible, over the
/// bars touching `window` (plus one neighbour each side).
pub fn stacked_range(locations: &[f64], components: &[BarComponent], visible: &[bool], window: ValueRange) -> Option<ValueRange> {
    let (first, last) = visible_window(locations, |x| *x, window)?;
    let max = (first..=last)
        .map(|i| {
            components
                .iter()
                .zip(visible)
                .filter(|(_, v)| **v)
                .filter_map(|(c, _)| c.values.get(i))
                .sum::<f64>()
        })
        .fold(f64::NEG_INFINITY, f64::max);
    if max.is_finite() { Some(ValueRange::new(0.0, max.max(0.0))) } else { None }
}

pub struct BarsRenderer {
    state: RendererState,
    locations: Vec<f64>,
    bar_width: f64,
    components: Vec<BarComponent>,
    component_alphas: Vec<ValueAnimator<f64>>,
    selected: Option<usize>,
    selection: ValueAnimator<f64>,
}

impl Default for BarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl BarsRenderer {
    pub fn new() -> Self {
        Self {
            state: RendererState::default(),
            locations: Vec::new(),
            bar_width: 1.0,
            components: Vec::new(),
            component_alphas: Vec::new(),
            selected: None,
            selection: ValueAnimator::new(0.0),
        }
    }

    pub fn set_bars(&mut self, locations: Vec<f64>, bar_width: f64, components: Vec<BarComponent>) {
        self.component_alphas.resize_with(components.len(), || ValueAnimator::new(1.0));
        self.locations = locations;
        self.bar_width = bar_width.max(f64::EPSILON);
        self.components = components;
        self.selected = None;
        self.selection.set_immediate(0.0);
    }

    pub fn locations(&self) -> &[f64] { &self.locations }
    pub fn components(&self) -> &[BarComponent] { &self.components }
    pub fn bar_width(&self) -> f64 { self.bar_width }
    pub fn selected_index(&self) -> Option<usize> { self.selected }

    pub fn set_component_visible(&mut self, index: usize, visible: bool, duration: Duration) {
        if let Some(a) = self.component_alphas.get_mut(index) {
            fade_to(a, visible, duration);
        }
    }

    /// Highlight one bar and dim the rest; `None` fades the highlight out.
    pub fn set_selected_index(&mut self, index: Option<usize>, duration: Duration) {
        match index {
            Some(i) => {
                self.selected = Some(i);
                self.selection.animate(1.0, duration);
            }
            None => self.selection.animate(0.0, duration),
        }
    }

    /// Time span covered by the bars, including the first bar's width.
    pub fn horizontal_range(&self) -> Option<ValueRange> {
        Some(ValueRange::new(self.locations.first()? - self.bar_width, *self.locations.last()?))
    }

    fn bar_alpha(&self, index: usize) -> f64 {
        match self.selected {
            Some(s) if s != index => 1.0 - (1.0 - DIMMED_ALPHA) * self.selection.current(),
            _ => 1.0,
        }
    }
}

impl ChartRenderer for BarsRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, dt: Duration) -> bool {
        let components = self.component_alphas.iter_mut().fold(false, |running, a| a.tick(dt) || running);
        let selection = self.selection.tick(dt);
        if !selection && self.selection.current() == 0.0 {
            self.selected = None;
        }
        components || selection
    }

    fn render(&self, ctx: &DrawContext<'_>, bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() || chart_frame.is_empty() {
            return;
        }
        let projection = self.state.projection(chart_frame);
        let range = projection.horizontal;
        let widened = ValueRange::new(range.lower, range.upper + self.bar_width);
        let Some((first, last)) = visible_window(&self.locations, |x| *x, widened) else { return };
        let general = self.state.alpha.current();
        let canvas = ctx.canvas;
        canvas.save();
        canvas.clip_rect(series_clip(bounds, chart_frame), None, None);
        for i in first..=last {
            let t = self.locations[i];
            let left = projection.to_screen_x(t - self.bar_width);
            let right = projection.to_screen_x(t);
            let alpha = general * self.bar_alpha(i);
            let mut base = 0.0;
            for (component, visibility) in self.components.iter().zip(&self.component_alphas) {
                let height = component.values.get(i).copied().unwrap_or(0.0) * visibility.current();
                if height <= 0.0 {
                    continue;
                }
                let top = base + height;
                let rect = skia::Rect::from_ltrb(left, projection.to_screen_y(top), right, projection.to_screen_y(base));
                canvas.draw_rect(rect, &fill_paint(with_alpha(component.color, alpha)));
                base = top;
            }
        }
        canvas.restore();
    }
}
