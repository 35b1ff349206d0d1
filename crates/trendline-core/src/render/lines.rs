// File: crates/trendline-core/src/render/lines.rs
// Summary: Polyline renderer with per-line visibility fades and per-column point merging.

use std::time::Duration;

use skia_safe as skia;

use crate::animation::ValueAnimator;
use crate::geometry::{Point, Rect, ValueRange};
use crate::scale::ScaleTransform;

use super::{fade_to, series_clip, stroke_paint, visible_window, with_alpha, ChartRenderer, DrawContext, RendererState};

/// One polyline: `(timestamp, value)` points sorted by timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct LineData {
    pub color: skia::Color,
    pub points: Vec<(f64, f64)>,
}

impl LineData {
    pub fn new(color: skia::Color, points: Vec<(f64, f64)>) -> Self {
        Self { color, points }
    }

    /// First to last timestamp over all lines.
    pub fn horizontal_range<'a>(lines: impl IntoIterator<Item = &'a LineData>) -> Option<ValueRange> {
        lines
            .into_iter()
            .filter_map(|l| Some(ValueRange::new(l.points.first()?.0, l.points.last()?.0)))
            .reduce(|a, b| a.union(b))
    }

    /// Min to max value over all points of all lines.
    pub fn vertical_range<'a>(lines: impl IntoIterator<Item = &'a LineData>) -> Option<ValueRange> {
        Self::fold_values(lines.into_iter().flat_map(|l| l.points.iter().map(|p| p.1)))
    }

    /// Min to max value of the points inside `window`. With `add_bounds` the
    /// neighbouring samples just outside the window count too.
    pub fn vertical_range_in<'a>(
        lines: impl IntoIterator<Item = &'a LineData>,
        window: ValueRange,
        add_bounds: bool,
    ) -> Option<ValueRange> {
        let mut values = Vec::new();
        for line in lines {
            if add_bounds {
                if let Some((first, last)) = visible_window(&line.points, |p| p.0, window) {
                    values.extend(line.points[first..=last].iter().map(|p| p.1));
                }
            } else {
                values.extend(line.points.iter().filter(|p| window.contains(p.0)).map(|p| p.1));
            }
        }
        Self::fold_values(values)
    }

    fn fold_values(values: impl IntoIterator<Item = f64>) -> Option<ValueRange> {
        values.into_iter().fold(None, |acc: Option<ValueRange>, v| match acc {
            Some(r) => Some(ValueRange::new(r.lower.min(v), r.upper.max(v))),
            None => Some(ValueRange::new(v, v)),
        })
    }
}

/// Drop points that cannot be told apart at `level` pixels per column.
/// Each column keeps its first, lowest, highest and last point, in order.
pub fn optimize_polyline(points: &[Point], level: f32) -> Vec<Point> {
    if level <= 0.0 || points.len() <= 2 {
        return points.to_vec();
    }
    let column = |p: &Point| (p.x / level).floor();
    let mut out = Vec::with_capacity(points.len());
    let mut start = 0;
    while start < points.len() {
        let c = column(&points[start]);
        let mut end = start + 1;
        while end < points.len() && column(&points[end]) == c {
            end += 1;
        }
        push_column(&points[start..end], &mut out);
        start = end;
    }
    out
}

fn push_column(bucket: &[Point], out: &mut Vec<Point>) {
    if bucket.len() <= 4 {
        out.extend_from_slice(bucket);
        return;
    }
    let (mut lo, mut hi) = (0, 0);
    for (i, p) in bucket.iter().enumerate() {
        if p.y < bucket[lo].y { lo = i; }
        if p.y > bucket[hi].y { hi = i; }
    }
    let mut picks = [0, lo, hi, bucket.len() - 1];
    picks.sort_unstable();
    let mut previous = None;
    for i in picks {
        if previous != Some(i) {
            out.push(bucket[i]);
            previous = Some(i);
        }
    }
}

pub struct LinesRenderer {
    state: RendererState,
    lines: Vec<LineData>,
    line_alphas: Vec<ValueAnimator<f64>>,
    pub line_width: f32,
    /// Column width in pixels within which points are merged; 0 disables merging.
    pub optimization_level: f32,
}

impl LinesRenderer {
    pub fn new(line_width: f32, optimization_level: f32) -> Self {
        Self {
            state: RendererState::default(),
            lines: Vec::new(),
            line_alphas: Vec::new(),
            line_width,
            optimization_level,
        }
    }

    /// Replace the polylines. Existing per-line visibility is kept by index;
    /// new lines start visible.
    pub fn set_lines(&mut self, lines: Vec<LineData>) {
        self.line_alphas.resize_with(lines.len(), || ValueAnimator::new(1.0));
        self.lines = lines;
    }

    pub fn lines(&self) -> &[LineData] { &self.lines }

    pub fn set_line_visible(&mut self, index: usize, visible: bool, duration: Duration) {
        if let Some(a) = self.line_alphas.get_mut(index) {
            fade_to(a, visible, duration);
        }
    }

    pub fn line_alpha(&self, index: usize) -> f64 {
        self.line_alphas.get(index).map(|a| a.current()).unwrap_or(0.0)
    }
}

impl ChartRenderer for LinesRenderer {
    fn state(&self) -> &RendererState { &self.state }
    fn state_mut(&mut self) -> &mut RendererState { &mut self.state }

    fn tick_content(&mut self, dt: Duration) -> bool {
        self.line_alphas.iter_mut().fold(false, |running, a| a.tick(dt) || running)
    }

    fn render(&self, ctx: &DrawContext<'_>, bounds: Rect, chart_frame: Rect) {
        if !self.state.is_drawable() || chart_frame.is_empty() {
            return;
        }
        let projection = self.state.projection(chart_frame);
        let range = projection.horizontal;
        let canvas = ctx.canvas;
        canvas.save();
        canvas.clip_rect(series_clip(bounds, chart_frame), None, None);
        for (line, alpha) in self.lines.iter().zip(&self.line_alphas) {
            let alpha = alpha.current() * self.state.alpha.current();
            if alpha <= 0.0 {
                continue;
            }
            let Some((first, last)) = visible_window(&line.points, |p| p.0, range) else { continue };
            let screen: Vec<Point> = line.points[first..=last]
                .iter()
                .map(|&(x, y)| Point::new(projection.to_screen_x(x), projection.to_screen_y(y)))
                .collect();
            let screen = optimize_polyline(&screen, self.optimization_level);
            if screen.len() < 2 {
                continue;
            }
            let mut path = skia::Path::new();
            path.move_to((screen[0].x, screen[0].y));
            for p in &screen[1..] {
                path.line_to((p.x, p.y));
            }
            let mut stroke = stroke_paint(with_alpha(line.color, alpha), self.line_width);
            stroke.set_stroke_join(skia::paint::Join::Round);
            canvas.draw_path(&path, &stroke);
        }
        canvas.restore();
    }
}
