// File: crates/trendline-core/src/controller/percent.rs
// Summary: Percentage-stack chart: fixed 0-100 % axis, shares in the tooltip.

use std::time::Duration;

use crate::axis::percent_labels;
use crate::config::ChartConfig;
use crate::error::Result;
use crate::geometry::ValueRange;
use crate::render::{
    BarComponent, ChartRenderer, DetailsViewModel, HorizontalScalesRenderer, PercentRenderer, VerticalLineRenderer,
    VerticalScalesRenderer,
};
use crate::series::SeriesCollection;
use crate::theme::Theme;

use super::{default_details_model, percent_shares, ChartComponent, ChartKind, ControllerCore, Layer};

pub struct PercentController {
    core: ControllerCore,
    main: PercentRenderer,
    preview: PercentRenderer,
    horizontal_scales: HorizontalScalesRenderer,
    vertical_scales: VerticalScalesRenderer,
    vertical_line: VerticalLineRenderer,
}

impl PercentController {
    pub fn new(collection: SeriesCollection, config: ChartConfig, theme: Theme) -> Result<Self> {
        let core = ControllerCore::new(collection, config, theme)?;
        let mut controller = Self {
            core,
            main: PercentRenderer::new(),
            preview: PercentRenderer::new(),
            horizontal_scales: HorizontalScalesRenderer::new(),
            vertical_scales: VerticalScalesRenderer::new(),
            vertical_line: VerticalLineRenderer::new(),
        };
        controller.initialize();
        Ok(controller)
    }

    fn set_main_horizontal(&mut self, range: ValueRange, duration: Duration) {
        self.main.set_horizontal_range(range, duration);
        self.horizontal_scales.set_horizontal_range(range, duration);
        self.vertical_scales.set_horizontal_range(range, duration);
        self.vertical_line.set_horizontal_range(range, duration);
    }

    fn set_main_vertical(&mut self, range: ValueRange, duration: Duration) {
        self.main.set_vertical_range(range, duration);
        self.horizontal_scales.set_vertical_range(range, duration);
        self.vertical_scales.set_vertical_range(range, duration);
        self.vertical_line.set_vertical_range(range, duration);
    }

    fn update_horizontal_labels(&mut self, range: ValueRange, force: bool, animated: bool) {
        if let Some(labels) = self.core.horizontal_labels(range, force) {
            let duration = self.core.duration(animated);
            self.horizontal_scales.set_labels(labels, duration);
        }
    }
}

impl ChartComponent for PercentController {
    fn core(&self) -> &ControllerCore { &self.core }
    fn core_mut(&mut self) -> &mut ControllerCore { &mut self.core }

    fn kind(&self) -> ChartKind { ChartKind::Percent }

    fn setup_collection(&mut self, animated: bool) {
        let duration = self.core.duration(animated);
        let collection = &self.core.collection;
        let components: Vec<BarComponent> =
            collection.series().iter().map(|s| BarComponent::new(s.color, s.values.clone())).collect();
        self.main.set_data(collection.timestamps().to_vec(), components.clone());
        self.preview.set_data(collection.timestamps().to_vec(), components);
        let total = self.main.horizontal_range().unwrap_or_default();
        self.core.total_horizontal = total;

        self.vertical_scales.set_labels(percent_labels(), Duration::ZERO);
        self.set_main_vertical(ValueRange::unit(), Duration::ZERO);
        self.preview.set_vertical_range(ValueRange::unit(), Duration::ZERO);
        self.preview.set_horizontal_range(total, duration);

        self.core.labeler.reset();
        let range = self.core.active_range();
        self.update_horizontal_labels(range, true, animated);
        self.set_main_horizontal(range, duration);
    }

    fn update_main_range(&mut self, range: ValueRange, animated: bool) {
        self.set_main_horizontal(range, Duration::ZERO);
        self.update_horizontal_labels(range, false, animated);
    }

    fn apply_visibility(&mut self, animated: bool) {
        let duration = self.core.duration(animated);
        for (i, visible) in self.core.visibility.iter().copied().enumerate() {
            self.main.set_component_visible(i, visible, duration);
            self.preview.set_component_visible(i, visible, duration);
        }
        let any = self.core.visibility.iter().any(|v| *v);
        if self.vertical_scales.is_visible() != any {
            self.vertical_scales.set_visible(any, duration);
        }
    }

    fn details_model(&self, index: usize) -> DetailsViewModel {
        let core = &self.core;
        let values: Vec<f64> = core.collection.series().iter().map(|s| s.values[index]).collect();
        let shares = percent_shares(&values, &core.visibility);
        let mut model = default_details_model(core, index);
        model.show_prefixes = true;
        for (row, share) in model.rows.iter_mut().zip(shares) {
            row.prefix = Some(format!("{share}%"));
        }
        model
    }

    fn show_markers(&mut self, _index: usize, timestamp: f64) {
        self.vertical_line.set_values(vec![timestamp]);
    }

    fn hide_markers(&mut self, _animated: bool) {
        self.vertical_line.set_values(Vec::new());
    }

    fn apply_theme_to_renderers(&mut self, theme: &Theme, _duration: Duration) {
        self.horizontal_scales.labels_color = theme.labels;
        self.vertical_scales.labels_color = theme.labels;
        self.vertical_scales.axis_color = theme.bar_strong_lines;
        self.vertical_scales.horizontal_lines_color = theme.bar_strong_lines;
        self.vertical_line.line_color = theme.strong_lines;
    }

    fn renderers(&self, layer: Layer) -> Vec<&dyn ChartRenderer> {
        match layer {
            Layer::Main => vec![
                &self.main as &dyn ChartRenderer,
                &self.horizontal_scales as &dyn ChartRenderer,
                &self.vertical_scales as &dyn ChartRenderer,
                &self.vertical_line as &dyn ChartRenderer,
                &self.core.details as &dyn ChartRenderer,
            ],
            Layer::Preview => vec![&self.preview as &dyn ChartRenderer],
        }
    }

    fn renderers_mut(&mut self, layer: Layer) -> Vec<&mut dyn ChartRenderer> {
        match layer {
            Layer::Main => vec![
                &mut self.main as &mut dyn ChartRenderer,
                &mut self.horizontal_scales as &mut dyn ChartRenderer,
                &mut self.vertical_scales as &mut dyn ChartRenderer,
                &mut self.vertical_line as &mut dyn ChartRenderer,
                &mut self.core.details as &mut dyn ChartRenderer,
            ],
            Layer::Preview => vec![&mut self.preview as &mut dyn ChartRenderer],
        }
    }
}
