// File: crates/trendline-core/src/controller/bars.rs
// Summary: Stacked bars in overview; drilling in switches to lines over the finer data.

use std::time::Duration;

use crate::axis::vertical_labels;
use crate::config::ChartConfig;
use crate::error::Result;
use crate::geometry::ValueRange;
use crate::render::bars::stacked_range;
use crate::render::{
    BarComponent, BarsRenderer, Bullet, BulletsRenderer, ChartRenderer, HorizontalScalesRenderer, LineData, LinesRenderer,
    VerticalLineRenderer, VerticalScalesRenderer,
};
use crate::series::SeriesCollection;
use crate::theme::Theme;

use super::{ChartComponent, ChartKind, ControllerCore, Layer};

/// Preview lines are thinned harder than the main lines.
const PREVIEW_LINES_OPTIMIZATION_FACTOR: f32 = 1.5;

pub struct StackedBarsController {
    core: ControllerCore,
    bars: BarsRenderer,
    preview_bars: BarsRenderer,
    zoomed_lines: LinesRenderer,
    zoomed_preview_lines: LinesRenderer,
    horizontal_scales: HorizontalScalesRenderer,
    vertical_scales: VerticalScalesRenderer,
    vertical_line: VerticalLineRenderer,
    bullets: BulletsRenderer,
    lines: Vec<LineData>,
}

impl StackedBarsController {
    pub fn new(collection: SeriesCollection, config: ChartConfig, theme: Theme) -> Result<Self> {
        let core = ControllerCore::new(collection, config, theme)?;
        let mut zoomed_lines = LinesRenderer::new(core.config.main_line_width, core.config.lines_optimization_level);
        let mut zoomed_preview_lines = LinesRenderer::new(
            core.config.preview_line_width,
            core.config.preview_lines_optimization_level * PREVIEW_LINES_OPTIMIZATION_FACTOR,
        );
        zoomed_lines.set_visible(false, Duration::ZERO);
        zoomed_preview_lines.set_visible(false, Duration::ZERO);
        let mut bullets = BulletsRenderer::new();
        bullets.set_enabled(false);
        let mut vertical_line = VerticalLineRenderer::new();
        vertical_line.set_enabled(false);
        let mut controller = Self {
            core,
            bars: BarsRenderer::new(),
            preview_bars: BarsRenderer::new(),
            zoomed_lines,
            zoomed_preview_lines,
            horizontal_scales: HorizontalScalesRenderer::new(),
            vertical_scales: VerticalScalesRenderer::new(),
            vertical_line,
            bullets,
            lines: Vec::new(),
        };
        controller.initialize();
        Ok(controller)
    }

    /// Width of one bar in seconds.
    pub fn bar_width(&self) -> f64 {
        self.bars.bar_width()
    }

    fn visible_lines(&self) -> Vec<&LineData> {
        self.lines.iter().zip(&self.core.visibility).filter(|(_, v)| **v).map(|(l, _)| l).collect()
    }

    fn set_main_horizontal(&mut self, range: ValueRange, duration: Duration) {
        self.bars.set_horizontal_range(range, duration);
        self.zoomed_lines.set_horizontal_range(range, duration);
        self.horizontal_scales.set_horizontal_range(range, duration);
        self.vertical_scales.set_horizontal_range(range, duration);
        self.vertical_line.set_horizontal_range(range, duration);
        self.bullets.set_horizontal_range(range, duration);
    }

    fn set_main_vertical(&mut self, range: ValueRange, duration: Duration) {
        if self.core.is_zoomed() {
            self.zoomed_lines.set_vertical_range(range, duration);
            self.vertical_line.set_vertical_range(range, duration);
            self.bullets.set_vertical_range(range, duration);
        } else {
            self.bars.set_vertical_range(range, duration);
        }
        self.horizontal_scales.set_vertical_range(range, duration);
        self.vertical_scales.set_vertical_range(range, duration);
    }

    fn update_horizontal_labels(&mut self, range: ValueRange, force: bool, animated: bool) {
        if let Some(labels) = self.core.horizontal_labels(range, force) {
            let duration = self.core.duration(animated);
            self.horizontal_scales.set_labels(labels, duration);
        }
    }

    fn visible_vertical_range(&self, window: ValueRange) -> Option<ValueRange> {
        if self.core.is_zoomed() {
            LineData::vertical_range_in(self.visible_lines(), window, true)
        } else {
            stacked_range(self.bars.locations(), self.bars.components(), &self.core.visibility, window)
        }
    }

    fn update_vertical(&mut self, range: ValueRange, animated: bool) {
        let Some(vertical) = self.visible_vertical_range(range) else { return };
        let (updated, labels) = vertical_labels(
            vertical,
            self.core.chart_frame.height(),
            self.core.config.min_axis_y_label_distance,
        );
        let duration = self.core.duration(animated);
        if self.vertical_scales.state().vertical.end() != updated {
            self.vertical_scales.set_labels(labels, duration);
        }
        if self.main_vertical_target() != updated {
            self.set_main_vertical(updated, duration);
        }
    }

    /// Vertical range the renderer showing the current data is heading to.
    fn main_vertical_target(&self) -> ValueRange {
        if self.core.is_zoomed() {
            self.zoomed_lines.state().vertical.end()
        } else {
            self.bars.state().vertical.end()
        }
    }

    fn update_preview_vertical(&mut self, animated: bool) {
        let duration = self.core.duration(animated);
        let total = self.core.total_horizontal;
        if let Some(range) = LineData::vertical_range_in(self.visible_lines(), total, true) {
            if self.zoomed_preview_lines.state().vertical.end() != range {
                self.zoomed_preview_lines.set_vertical_range(range, duration);
            }
        }
        if let Some(range) = stacked_range(self.bars.locations(), self.bars.components(), &self.core.visibility, total) {
            if self.preview_bars.state().vertical.end() != range {
                self.preview_bars.set_vertical_range(range, duration);
            }
        }
    }
}

impl ChartComponent for StackedBarsController {
    fn core(&self) -> &ControllerCore { &self.core }
    fn core_mut(&mut self) -> &mut ControllerCore { &mut self.core }

    fn kind(&self) -> ChartKind { ChartKind::StackedBars }

    fn setup_collection(&mut self, animated: bool) {
        let duration = self.core.duration(animated);
        let collection = &self.core.collection;
        let zoomed = self.core.is_zoomed();
        if zoomed {
            self.lines = collection
                .series()
                .iter()
                .enumerate()
                .map(|(i, s)| LineData::new(s.color, collection.points(i)))
                .collect();
            self.zoomed_lines.set_lines(self.lines.clone());
            self.zoomed_preview_lines.set_lines(self.lines.clone());
            self.bullets.set_bullets(self.lines.iter().map(|l| Bullet { coordinate: l.points[0], color: l.color }).collect());
            self.core.total_horizontal = collection.horizontal_range();
        } else {
            let width = collection.native_spacing().unwrap_or_else(|| self.core.date_scale().interval());
            let components: Vec<BarComponent> =
                collection.series().iter().map(|s| BarComponent::new(s.color, s.values.clone())).collect();
            self.bars.set_bars(collection.timestamps().to_vec(), width, components.clone());
            self.preview_bars.set_bars(collection.timestamps().to_vec(), width, components);
            self.core.total_horizontal = self.bars.horizontal_range().unwrap_or_default();
        }
        self.bars.set_visible(!zoomed, duration);
        self.preview_bars.set_visible(!zoomed, duration);
        self.zoomed_lines.set_visible(zoomed, duration);
        self.zoomed_preview_lines.set_visible(zoomed, duration);

        let total = self.core.total_horizontal;
        self.preview_bars.set_horizontal_range(total, duration);
        self.zoomed_preview_lines.set_horizontal_range(total, duration);
        self.update_preview_vertical(animated);

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
        for (i, visible) in self.core.visibility.iter().copied().enumerate() {
            self.bars.set_component_visible(i, visible, duration);
            self.preview_bars.set_component_visible(i, visible, duration);
            self.zoomed_lines.set_line_visible(i, visible, duration);
            self.zoomed_preview_lines.set_line_visible(i, visible, duration);
            self.bullets.set_line_visible(i, visible, duration);
        }
        let range = self.core.active_range();
        self.update_vertical(range, true);
        self.update_preview_vertical(true);
    }

    fn details_anchor_offset(&self) -> f64 {
        if self.core.is_zoomed() { 0.0 } else { self.bars.bar_width() / 2.0 }
    }

    fn show_markers(&mut self, index: usize, timestamp: f64) {
        if self.core.is_zoomed() {
            let bullets = self
                .lines
                .iter()
                .filter_map(|l| l.points.get(index).map(|&coordinate| Bullet { coordinate, color: l.color }))
                .collect();
            self.bullets.set_bullets(bullets);
            self.bullets.set_enabled(true);
            self.vertical_line.set_enabled(true);
            self.vertical_line.set_values(vec![timestamp]);
        } else {
            let duration = self.core.duration(true);
            self.bars.set_selected_index(Some(index), duration);
        }
    }

    fn hide_markers(&mut self, animated: bool) {
        let duration = self.core.duration(animated);
        self.bars.set_selected_index(None, duration);
        self.bullets.set_enabled(false);
        self.vertical_line.set_enabled(false);
        self.vertical_line.set_values(Vec::new());
    }

    fn apply_theme_to_renderers(&mut self, theme: &Theme, duration: Duration) {
        self.horizontal_scales.labels_color = theme.labels;
        self.vertical_scales.labels_color = theme.labels;
        self.vertical_scales.axis_color = theme.strong_lines;
        self.vertical_scales.horizontal_lines_color = theme.helper_lines;
        self.vertical_line.line_color = theme.strong_lines;
        self.bullets.set_inner_color(theme.background, duration);
    }

    fn renderers(&self, layer: Layer) -> Vec<&dyn ChartRenderer> {
        match layer {
            Layer::Main => vec![
                &self.bars as &dyn ChartRenderer,
                &self.zoomed_lines as &dyn ChartRenderer,
                &self.horizontal_scales as &dyn ChartRenderer,
                &self.vertical_scales as &dyn ChartRenderer,
                &self.vertical_line as &dyn ChartRenderer,
                &self.bullets as &dyn ChartRenderer,
                &self.core.details as &dyn ChartRenderer,
            ],
            Layer::Preview => vec![&self.preview_bars as &dyn ChartRenderer, &self.zoomed_preview_lines as &dyn ChartRenderer],
        }
    }

    fn renderers_mut(&mut self, layer: Layer) -> Vec<&mut dyn ChartRenderer> {
        match layer {
            Layer::Main => vec![
                &mut self.bars as &mut dyn ChartRenderer,
                &mut self.zoomed_lines as &mut dyn ChartRenderer,
                &mut self.horizontal_scales as &mut dyn ChartRenderer,
                &mut self.vertical_scales as &mut dyn ChartRenderer,
                &mut self.vertical_line as &mut dyn ChartRenderer,
                &mut self.bullets as &mut dyn ChartRenderer,
                &mut self.core.details as &mut dyn ChartRenderer,
            ],
            Layer::Preview => vec![&mut self.preview_bars as &mut dyn ChartRenderer, &mut self.zoomed_preview_lines as &mut dyn ChartRenderer],
        }
    }
}
