// File: crates/trendline-core/src/render/details.rs
// Summary: Tooltip banner for the selected sample: title, per-series rows, drill arrow.
// Notes:
// - `banner_frame` is the pure layout used both for drawing and for hit tests,
//   so the banner a tap lands on is the banner that was drawn from the same state.

use std::time::Duration;

use skia_safe as skia;

use crate::animation::ValueAnimator;
use crate::config::DetailsMetrics;
use crate::geometry::Rect;
use crate::text::{TextAnchor, TextShaper, TextWeight};
use crate::theme::Theme;

use super::{fade_to, fill_paint, stroke_paint, with_alpha, ChartRenderer, DrawContext, RendererState};

/// One series row of the tooltip.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailsRow {
    /// Optional leading column, e.g. the percentage share.
    pub prefix: Option<String>,
    pub title: String,
    pub value: String,
    pub color: skia::Color,
    pub visible: bool,
}

/// Content of the tooltip for one sample.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DetailsViewModel {
    pub title: String,
    /// Drill-in is available from this tooltip.
    pub show_arrow: bool,
    pub show_prefixes: bool,
    pub rows: Vec<DetailsRow>,
    /// Sample the tooltip describes.
    pub timestamp: f64,
    pub index: usize,
}

/// Column widths computed from the text extents.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Columns {
    prefix: f32,
    width: f32,
    height: f32,
}

pub struct DetailsRenderer {
    state: RendererState,
    text: TextShaper,
    metrics: DetailsMetrics,
    model: DetailsViewModel,
    row_alphas: Vec<ValueAnimator<f64>>,
    position: f32,
    background: ValueAnimator<skia::Color>,
    text_color: ValueAnimator<skia::Color>,
    arrow_color: ValueAnimator<skia::Color>,
}

impl DetailsRenderer {
    pub fn new(metrics: DetailsMetrics, theme: &Theme) -> Self {
        let mut state = RendererState::default();
        state.alpha.set_immediate(0.0);
        Self {
            state,
            text: TextShaper::new(),
            metrics,
            model: DetailsViewModel::default(),
            row_alphas: Vec::new(),
            position: 0.0,
            background: ValueAnimator::new(theme.details_background),
            text_color: ValueAnimator::new(theme.details_text),
            arrow_color: ValueAnimator::new(theme.details_arrow),
        }
    }

    /// Replace the content. Row fades restart only when the row count changes.
    pub fn set_view_model(&mut self, model: DetailsViewModel, duration: Duration) {
        if model.rows.len() != self.row_alphas.len() {
            self.row_alphas = model.rows.iter().map(|r| ValueAnimator::new(if r.visible { 1.0 } else { 0.0 })).collect();
        } else {
            for (a, r) in self.row_alphas.iter_mut().zip(&model.rows) {
                fade_to(a, r.visible, duration);
            }
        }
        self.model = model;
    }

    pub fn view_model(&self) -> &DetailsViewModel { &self.model }

    /// Horizontal pixel position of the marker the banner sits next to.
    pub fn set_position(&mut self, x: f32) {
        self.position = x;
    }

    pub fn position(&self) -> f32 { self.position }

    pub fn apply_theme(&mut self, theme: &Theme, duration: Duration) {
        self.background.animate(theme.details_background, duration);
        self.text_color.animate(theme.details_text, duration);
        self.arrow_color.animate(theme.details_arrow, duration);
    }

    fn columns(&self) -> Columns {
        let m = &self.metrics;
        let size = m.font_size;
        let mut prefix: f32 = 0.0;
        let mut label: f32 = 0.0;
        let mut value: f32 = 0.0;
        for row in &self.model.rows {
            if let Some(p) = &row.prefix {
                prefix = prefix.max(self.text.measure_width(p, size, TextWeight::Bold) + m.margins);
            }
            label = label.max(self.text.measure_width(&row.title, size, TextWeight::Regular) + m.margins);
            value = value.max(self.text.measure_width(&row.value, size, TextWeight::Bold));
        }
        let title = self.text.measure_width(&self.model.title, size, TextWeight::Bold);
        let arrow = if self.model.show_arrow { m.arrow_width + m.margins } else { 0.0 };
        let rows: f64 = self.row_alphas.iter().map(|a| a.current()).sum();
        Columns {
            prefix,
            width: (prefix + label + value).max(title + arrow) + m.margins * 2.0,
            height: (rows as f32 + 1.0) * m.row_height + m.margins * 2.0,
        }
    }

    fn place(&self, columns: &Columns, bounds: Rect, chart_frame: Rect) -> Rect {
        let m = &self.metrics;
        let top = m.top_offset + chart_frame.top;
        let left = if columns.width + m.position_offset > self.position {
            (self.position + m.position_offset).min(bounds.right - columns.width).max(bounds.left)
        } else {
            self.position - columns.width - m.position_offset
        };
        Rect::from_xywh(left, top, columns.width, columns.height)
    }

    /// Where the banner is drawn for the current state, `None` while hidden.
    pub fn banner_frame(&self, bounds: Rect, chart_frame: Rect) -> Option<Rect> {
        if !self.state.enabled || self.state.alpha.end() <= 0.0 {
            return None;
        }
        Some(self.place(&self.columns(), bounds, chart_frame))
    }
}

impl ChartRenderer for DetailsRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, dt: Duration) -> bool {
        let rows = self.row_alphas.iter_mut().fold(false, |running, a| a.tick(dt) || running);
        let bg = self.background.tick(dt);
        let text = self.text_color.tick(dt);
        let arrow = self.arrow_color.tick(dt);
        rows || bg || text || arrow
    }

    fn render(&self, ctx: &DrawContext<'_>, bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() {
            return;
        }
        let general = self.state.alpha.current();
        let m = &self.metrics;
        let columns = self.columns();
        let frame = self.place(&columns, bounds, chart_frame);
        let canvas = ctx.canvas;
        let text = &self.text;
        let rrect = skia::RRect::new_rect_xy(frame.to_skia(), m.corner_radius, m.corner_radius);
        canvas.draw_rrect(rrect, &fill_paint(with_alpha(self.background.current(), general)));

        let text_color = self.text_color.current();
        let baseline = |row_top: f32| row_top + (m.row_height + m.font_size * 0.8) / 2.0;
        let mut row_top = frame.top + m.margins;
        text.draw(
            canvas,
            &self.model.title,
            frame.left + m.margins,
            baseline(row_top),
            m.font_size,
            with_alpha(text_color, general),
            TextAnchor::Left,
            TextWeight::Bold,
        );
        if self.model.show_arrow {
            let cx = frame.right - m.margins - m.arrow_width / 2.0;
            let cy = row_top + m.row_height / 2.0;
            let half = m.arrow_width / 4.0;
            let mut path = skia::Path::new();
            path.move_to((cx - half, cy - half * 2.0));
            path.line_to((cx + half, cy));
            path.line_to((cx - half, cy + half * 2.0));
            canvas.draw_path(&path, &stroke_paint(with_alpha(self.arrow_color.current(), general), 2.0));
        }
        row_top += m.row_height;

        for (row, alpha) in self.model.rows.iter().zip(&self.row_alphas) {
            let alpha = alpha.current();
            if alpha <= 0.0 {
                continue;
            }
            let y = baseline(row_top);
            let faded = general * alpha;
            if let Some(prefix) = &row.prefix {
                text.draw(
                    canvas,
                    prefix,
                    frame.left + m.margins + columns.prefix - m.margins,
                    y,
                    m.font_size,
                    with_alpha(text_color, faded),
                    TextAnchor::Right,
                    TextWeight::Bold,
                );
            }
            text.draw(
                canvas,
                &row.title,
                frame.left + m.margins + columns.prefix,
                y,
                m.font_size,
                with_alpha(text_color, faded),
                TextAnchor::Left,
                TextWeight::Regular,
            );
            text.draw(
                canvas,
                &row.value,
                frame.right - m.margins,
                y,
                m.font_size,
                with_alpha(row.color, faded),
                TextAnchor::Right,
                TextWeight::Bold,
            );
            row_top += m.row_height * alpha as f32;
        }
    }
}
