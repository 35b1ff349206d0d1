// File: crates/trendline-core/src/controller/lines.rs
// Summary: Lines chart where every series has its own value axis (left, then right).

use std::time::Duration;

use crate::axis::{shared_row_count, AxisRows};
use crate::config::ChartConfig;
use crate::error::Result;
use crate::format::format_decimals;
use crate::geometry::ValueRange;
use crate::render::{
    Bullet, BulletsRenderer, ChartRenderer, HorizontalScalesRenderer, LineData, LinesRenderer, VerticalLineRenderer,
    VerticalScalesRenderer,
};
use crate::series::SeriesCollection;
use crate::theme::Theme;

use super::{ChartComponent, ChartKind, ControllerCore, Layer};

/// Renderers bound to one series and its own vertical axis.
struct AxisGraph {
    main: LinesRenderer,
    preview: LinesRenderer,
    scales: VerticalScalesRenderer,
    bullets: BulletsRenderer,
    line: LineData,
    total_vertical: ValueRange,
}

impl AxisGraph {
    fn new(config: &ChartConfig) -> Self {
        let mut bullets = BulletsRenderer::new();
        bullets.set_enabled(false);
        Self {
            main: LinesRenderer::new(config.main_line_width, config.lines_optimization_level),
            preview: LinesRenderer::new(config.preview_line_width, config.preview_lines_optimization_level),
            scales: VerticalScalesRenderer::new(),
            bullets,
            line: LineData::new(skia_safe::Color::BLACK, Vec::new()),
            total_vertical: ValueRange::unit(),
        }
    }

    fn set_main_vertical(&mut self, range: ValueRange, duration: Duration) {
        self.main.set_vertical_range(range, duration);
        self.scales.set_vertical_range(range, duration);
        self.bullets.set_vertical_range(range, duration);
    }
}

pub struct TwoAxisLinesController {
    core: ControllerCore,
    graphs: Vec<AxisGraph>,
    horizontal_scales: HorizontalScalesRenderer,
    vertical_line: VerticalLineRenderer,
}

impl TwoAxisLinesController {
    pub fn new(collection: SeriesCollection, config: ChartConfig, theme: Theme) -> Result<Self> {
        let core = ControllerCore::new(collection, config, theme)?;
        let mut controller = Self {
            graphs: Vec::new(),
            horizontal_scales: HorizontalScalesRenderer::new(),
            vertical_line: VerticalLineRenderer::new(),
            core,
        };
        controller.initialize();
        Ok(controller)
    }

    fn set_main_horizontal(&mut self, range: ValueRange, duration: Duration) {
        for g in &mut self.graphs {
            g.main.set_horizontal_range(range, duration);
            g.scales.set_horizontal_range(range, duration);
            g.bullets.set_horizontal_range(range, duration);
        }
        self.horizontal_scales.set_horizontal_range(range, duration);
        self.vertical_line.set_horizontal_range(range, duration);
    }

    fn update_horizontal_labels(&mut self, range: ValueRange, force: bool, animated: bool) {
        if let Some(labels) = self.core.horizontal_labels(range, force) {
            let duration = self.core.duration(animated);
            self.horizontal_scales.set_labels(labels, duration);
        }
    }

    /// Per-axis nice steps reconciled to one row count so gridlines line up.
    fn update_vertical(&mut self, range: ValueRange, animated: bool) {
        let height = self.core.chart_frame.height();
        let min_distance = self.core.config.min_axis_y_label_distance;
        let rows: Vec<Option<AxisRows>> = self
            .graphs
            .iter()
            .zip(&self.core.visibility)
            .map(|(g, visible)| {
                let vertical = LineData::vertical_range_in([&g.line], range, true).unwrap_or(g.total_vertical);
                AxisRows::compute(vertical, height, min_distance, *visible)
            })
            .collect();
        let total = shared_row_count(&rows);
        if total == 0 {
            return;
        }
        let duration = self.core.duration(animated);
        for (g, rows) in self.graphs.iter_mut().zip(rows) {
            let Some(rows) = rows else { continue };
            let updated = rows.expanded_range(total);
            if g.scales.state().vertical.end() != updated {
                g.scales.set_labels(rows.labels(total, format_decimals), duration);
                g.set_main_vertical(updated, duration);
            }
        }
    }
}

impl ChartComponent for TwoAxisLinesController {
    fn core(&self) -> &ControllerCore { &self.core }
    fn core_mut(&mut self) -> &mut ControllerCore { &mut self.core }

    fn kind(&self) -> ChartKind { ChartKind::TwoAxisLines }

    fn setup_collection(&mut self, animated: bool) {
        let duration = self.core.duration(animated);
        let collection = &self.core.collection;
        if self.graphs.len() != collection.series_count() {
            let config = &self.core.config;
            self.graphs = (0..collection.series_count()).map(|_| AxisGraph::new(config)).collect();
        }
        let total = collection.horizontal_range();
        let first_visible = self.core.visibility.iter().position(|v| *v);
        for (i, (g, series)) in self.graphs.iter_mut().zip(collection.series()).enumerate() {
            let line = LineData::new(series.color, collection.points(i));
            g.total_vertical = LineData::vertical_range([&line]).unwrap_or_default();
            g.scales.labels_color = series.color;
            g.scales.right_aligned = i != 0;
            g.scales.set_horizontal_lines_visible(first_visible == Some(i), duration);
            g.bullets.set_bullets(vec![Bullet { coordinate: line.points[0], color: series.color }]);
            g.preview.set_horizontal_range(total, duration);
            g.preview.set_vertical_range(g.total_vertical, duration);
            g.main.set_lines(vec![line.clone()]);
            g.preview.set_lines(vec![line.clone()]);
            g.line = line;
        }
        self.core.total_horizontal = total;
        self.core.labeler.reset();
        let range = self.core.active_range();
        self.update_horizontal_labels(range, true, animated);
        self.set_main_horizontal(range, duration);
        self.update_vertical(range, animated);
    }

    fn update_main_range(&mut self, range: ValueRange, animated: bool) {
        self.set_main_horizontal(range, Duration::ZERO);
        self.update_horizontal_labels(range, false, animated);
        self.update_vertical(range, animated);
    }

    fn apply_visibility(&mut self, animated: bool) {
        let duration = self.core.duration(animated);
        let first_visible = self.core.visibility.iter().position(|v| *v);
        for (i, (g, visible)) in self.graphs.iter_mut().zip(&self.core.visibility).enumerate() {
            g.main.set_line_visible(0, *visible, duration);
            g.preview.set_line_visible(0, *visible, duration);
            g.bullets.set_line_visible(0, *visible, duration);
            if g.scales.is_visible() != *visible {
                g.scales.set_visible(*visible, duration);
            }
            if let Some(first) = first_visible {
                g.scales.set_horizontal_lines_visible(i == first, duration);
            }
        }
        let range = self.core.active_range();
        self.update_vertical(range, true);
    }

    fn show_markers(&mut self, index: usize, timestamp: f64) {
        for g in &mut self.graphs {
            if let Some(&coordinate) = g.line.points.get(index) {
                g.bullets.set_bullets(vec![Bullet { coordinate, color: g.line.color }]);
            }
            g.bullets.set_enabled(true);
        }
        self.vertical_line.set_values(vec![timestamp]);
    }

    fn hide_markers(&mut self, _animated: bool) {
        for g in &mut self.graphs {
            g.bullets.set_enabled(false);
        }
        self.vertical_line.set_values(Vec::new());
    }

    fn apply_theme_to_renderers(&mut self, theme: &Theme, duration: Duration) {
        self.horizontal_scales.labels_color = theme.labels;
        self.vertical_line.line_color = theme.strong_lines;
        for g in &mut self.graphs {
            g.scales.horizontal_lines_color = theme.helper_lines;
            g.scales.axis_color = theme.strong_lines;
            g.bullets.set_inner_color(theme.background, duration);
        }
    }

    fn renderers(&self, layer: Layer) -> Vec<&dyn ChartRenderer> {
        let mut out: Vec<&dyn ChartRenderer> = Vec::new();
        match layer {
            Layer::Main => {
                out.extend(self.graphs.iter().map(|g| &g.main as &dyn ChartRenderer));
                out.extend(self.graphs.iter().map(|g| &g.scales as &dyn ChartRenderer));
                out.push(&self.horizontal_scales);
                out.push(&self.vertical_line);
                out.extend(self.graphs.iter().map(|g| &g.bullets as &dyn ChartRenderer));
                out.push(&self.core.details);
            }
            Layer::Preview => out.extend(self.graphs.iter().map(|g| &g.preview as &dyn ChartRenderer)),
        }
        out
    }

    fn renderers_mut(&mut self, layer: Layer) -> Vec<&mut dyn ChartRenderer> {
        let mut out: Vec<&mut dyn ChartRenderer> = Vec::new();
        match layer {
            Layer::Main => {
                for g in &mut self.graphs {
                    out.push(&mut g.main);
                    out.push(&mut g.scales);
                    out.push(&mut g.bullets);
                }
                out.push(&mut self.horizontal_scales);
                out.push(&mut self.vertical_line);
                out.push(&mut self.core.details);
            }
            Layer::Preview => {
                for g in &mut self.graphs {
                    out.push(&mut g.preview);
                }
            }
        }
        out
    }
}
