// File: crates/trendline-core/src/controller/mod.rs
// Summary: Chart component contract: overview/zoomed state machine, tooltip, visibility and range plumbing.
// Notes:
// - Controllers never call back into the host. Everything the host must react
//   to is queued as a `ControllerEvent` and drained once per frame.
// - Drill-in is asynchronous: `request_zoom_in` hands out a ticket, the host
//   fetches data and answers with `complete_zoom_in`. Only one request may be
//   pending; others are rejected until it completes.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::axis::{AxisLabel, HorizontalLabeler};
use crate::config::ChartConfig;
use crate::error::{ChartError, Result};
use crate::format::{details_title, format_grouped, range_title, DateScale};
use crate::geometry::{Point, Rect, ValueRange};
use crate::render::{ChartRenderer, DetailsRenderer, DetailsRow, DetailsViewModel};
use crate::series::SeriesCollection;
use crate::theme::Theme;
use crate::types::{Insets, ViewId, HEIGHT, WIDTH};

pub mod bars;
pub mod lines;
pub mod percent;

pub use bars::StackedBarsController;
pub use lines::TwoAxisLinesController;
pub use percent::PercentController;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomState {
    Overview,
    Zoomed,
}

/// Identifies one drill-in request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrillTicket(u64);

impl DrillTicket {
    pub fn id(self) -> u64 { self.0 }
}

/// Notifications for the host, drained with `ChartComponent::drain_events`.
#[derive(Clone, Debug, PartialEq)]
pub enum ControllerEvent {
    /// Selected window as a fraction of the whole domain (drives the range control).
    RangeChanged { fraction: ValueRange, animated: bool },
    TitleChanged { title: String, animated: bool },
    DetailsVisibilityChanged { visible: bool, animated: bool },
    /// Marker position in view pixels.
    DetailsPositionChanged { x: f32 },
    BackButtonVisibilityChanged { visible: bool },
    /// Series toggles must be rebuilt (the series set changed).
    ToolsRefreshRequested,
    /// Fetch detail data around `timestamp` and answer with `complete_zoom_in`.
    ZoomInRequested { ticket: DrillTicket, timestamp: f64 },
    RangePagingChanged { enabled: bool, page_size: f64 },
}

/// Renderer groups a host can draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    /// The main chart, tooltip included.
    Main,
    /// The overview strip under the range control.
    Preview,
}

/// Which concrete controller to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    TwoAxisLines,
    StackedBars,
    Percent,
}

impl ChartKind {
    pub fn build(self, collection: SeriesCollection, config: ChartConfig, theme: Theme) -> Result<Box<dyn ChartComponent>> {
        Ok(match self {
            ChartKind::TwoAxisLines => Box::new(TwoAxisLinesController::new(collection, config, theme)?),
            ChartKind::StackedBars => Box::new(StackedBarsController::new(collection, config, theme)?),
            ChartKind::Percent => Box::new(PercentController::new(collection, config, theme)?),
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            ChartKind::TwoAxisLines => "two-axis-lines",
            ChartKind::StackedBars => "stacked-bars",
            ChartKind::Percent => "percent",
        }
    }
}

/// Integer percentages of the visible `values`, summing to exactly 100.
/// Hidden entries get 0. When rounding misses 100 the first largest visible
/// share absorbs the difference. An all-zero sample is split evenly with the
/// remainder on the first visible entry; with nothing visible all shares are 0.
pub fn percent_shares(values: &[f64], visible: &[bool]) -> Vec<i32> {
    let is_visible = |i: usize| visible.get(i).copied().unwrap_or(false);
    let total: f64 = values.iter().enumerate().filter(|(i, _)| is_visible(*i)).map(|(_, v)| *v).sum();
    let visible_count = (0..values.len()).filter(|i| is_visible(*i)).count() as i32;
    if visible_count == 0 {
        return vec![0; values.len()];
    }
    let mut shares: Vec<i32> = if total > 0.0 {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| if is_visible(i) { ((v / total * 100.0).round() as i32).min(100) } else { 0 })
            .collect()
    } else {
        values.iter().enumerate().map(|(i, _)| if is_visible(i) { 100 / visible_count } else { 0 }).collect()
    };
    let sum: i32 = shares.iter().sum();
    if sum != 100 {
        let max = (0..shares.len()).filter(|i| is_visible(*i)).map(|i| shares[i]).max().unwrap_or(0);
        if let Some(first) = (0..shares.len()).find(|i| is_visible(*i) && shares[*i] == max) {
            shares[first] -= sum - 100;
        }
    }
    shares
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingDrill {
    ticket: DrillTicket,
    timestamp: f64,
}

/// State shared by every chart kind.
pub struct ControllerCore {
    pub config: ChartConfig,
    pub theme: Theme,
    /// Data currently shown (overview or zoomed).
    pub collection: SeriesCollection,
    /// Overview data restored on zoom-out.
    pub initial_collection: SeriesCollection,
    pub visibility: Vec<bool>,
    pub zoom: ZoomState,
    /// Window shown in overview; kept across a zoom round-trip.
    pub overview_range: ValueRange,
    pub zoomed_range: ValueRange,
    /// Whole horizontal domain the range control spans.
    pub total_horizontal: ValueRange,
    pub bounds: Rect,
    pub chart_frame: Rect,
    pub details: DetailsRenderer,
    pub labeler: HorizontalLabeler,
    interaction_point: Option<Point>,
    interacting: bool,
    details_tapped: Option<f64>,
    pending: Option<PendingDrill>,
    next_ticket: u64,
    needs_display: bool,
    events: VecDeque<ControllerEvent>,
}

impl ControllerCore {
    pub fn new(collection: SeriesCollection, config: ChartConfig, theme: Theme) -> Result<Self> {
        if collection.series_count() == 0 {
            return Err(ChartError::NoSeries);
        }
        let bounds = Rect::from_xywh(0.0, 0.0, WIDTH as f32, HEIGHT as f32);
        let insets = Insets::default();
        let chart_frame = Rect::from_ltrb(
            insets.left as f32,
            insets.top as f32,
            bounds.right - insets.right as f32,
            bounds.bottom - insets.bottom as f32,
        );
        let details = DetailsRenderer::new(config.details, &theme);
        Ok(Self {
            visibility: vec![true; collection.series_count()],
            initial_collection: collection.clone(),
            collection,
            theme,
            zoom: ZoomState::Overview,
            overview_range: ValueRange::unit(),
            zoomed_range: ValueRange::unit(),
            total_horizontal: ValueRange::unit(),
            bounds,
            chart_frame,
            details,
            labeler: HorizontalLabeler::new(),
            interaction_point: None,
            interacting: false,
            details_tapped: None,
            pending: None,
            next_ticket: 1,
            needs_display: true,
            events: VecDeque::new(),
            config,
        })
    }

    pub fn is_zoomed(&self) -> bool { self.zoom == ZoomState::Zoomed }

    pub fn duration(&self, animated: bool) -> Duration { self.config.duration(animated) }

    pub fn date_scale(&self) -> DateScale {
        if self.is_zoomed() { DateScale::Hour } else { DateScale::Day }
    }

    /// Window shown for the current zoom state.
    pub fn active_range(&self) -> ValueRange {
        if self.is_zoomed() { self.zoomed_range } else { self.overview_range }
    }

    pub fn set_active_range(&mut self, range: ValueRange) {
        if self.is_zoomed() { self.zoomed_range = range } else { self.overview_range = range }
    }

    /// Active window as a fraction of the whole domain.
    pub fn range_fraction(&self) -> ValueRange {
        self.total_horizontal.fraction_range(self.active_range())
    }

    pub fn title(&self) -> String {
        let r = self.active_range();
        range_title(r.lower, r.upper)
    }

    /// New date labels for `range` when the stride changed (or `force`).
    pub fn horizontal_labels(&mut self, range: ValueRange, force: bool) -> Option<Vec<AxisLabel>> {
        let scale = self.date_scale();
        self.labeler.update(
            self.collection.timestamps(),
            range,
            self.chart_frame.width(),
            self.config.min_axis_x_label_distance,
            scale.interval(),
            force,
            |t| scale.format_label(t),
        )
    }

    pub fn push_event(&mut self, event: ControllerEvent) {
        self.events.push_back(event);
    }

    pub fn set_needs_display(&mut self) {
        self.needs_display = true;
    }

    pub fn is_interaction_begun(&self) -> bool { self.interaction_point.is_some() }
    pub fn is_interacting(&self) -> bool { self.interacting }
    pub fn is_drill_pending(&self) -> bool { self.pending.is_some() }

    fn emit_range(&mut self, animated: bool) {
        let fraction = self.range_fraction();
        self.push_event(ControllerEvent::RangeChanged { fraction, animated });
    }

    fn emit_title(&mut self, animated: bool) {
        let title = self.title();
        self.push_event(ControllerEvent::TitleChanged { title, animated });
    }

    fn emit_paging(&mut self) {
        let enabled = self.config.range_paging_enabled;
        let page_size = self.config.range_page_size;
        self.push_event(ControllerEvent::RangePagingChanged { enabled, page_size });
    }
}

/// Tooltip content shared by every kind: one row per series, grouped values.
pub fn default_details_model(core: &ControllerCore, index: usize) -> DetailsViewModel {
    let c = &core.collection;
    let timestamp = c.timestamps()[index];
    let rows = c
        .series()
        .iter()
        .zip(&core.visibility)
        .map(|(s, visible)| DetailsRow {
            prefix: None,
            title: s.name.clone(),
            value: format_grouped(s.values[index]),
            color: s.color,
            visible: *visible,
        })
        .collect();
    DetailsViewModel {
        title: details_title(timestamp, core.is_zoomed()),
        show_arrow: !core.is_zoomed(),
        show_prefixes: false,
        rows,
        timestamp,
        index,
    }
}

/// One chart kind: owns its renderers and reacts to host input.
///
/// Implementors provide the renderer wiring; the state machine, tooltip and
/// range bookkeeping are shared provided methods.
pub trait ChartComponent {
    fn core(&self) -> &ControllerCore;
    fn core_mut(&mut self) -> &mut ControllerCore;

    /// Rebuild renderer data from `core().collection` for the current zoom
    /// state and move every renderer to `core().active_range()`. Must set
    /// `core().total_horizontal`.
    fn setup_collection(&mut self, animated: bool);

    /// Show `range` in the main chart: horizontal range immediately, labels
    /// and vertical range animated when `animated`.
    fn update_main_range(&mut self, range: ValueRange, animated: bool);

    /// Push `core().visibility` into the renderers.
    fn apply_visibility(&mut self, animated: bool);

    /// Highlight sample `index` (marker line, bullets or bar selection).
    fn show_markers(&mut self, index: usize, timestamp: f64);

    fn hide_markers(&mut self, animated: bool);

    fn apply_theme_to_renderers(&mut self, theme: &Theme, duration: Duration);

    fn renderers(&self, layer: Layer) -> Vec<&dyn ChartRenderer>;
    fn renderers_mut(&mut self, layer: Layer) -> Vec<&mut dyn ChartRenderer>;

    fn kind(&self) -> ChartKind;

    /// Tooltip content for sample `index`.
    fn details_model(&self, index: usize) -> DetailsViewModel {
        default_details_model(self.core(), index)
    }

    /// Time offset between a sample and where its tooltip marker sits.
    fn details_anchor_offset(&self) -> f64 {
        0.0
    }

    // ---- provided -----------------------------------------------------------

    /// Select the initial overview window and build everything without animation.
    fn initialize(&mut self) {
        let core = self.core_mut();
        let domain = core.collection.horizontal_range();
        let lower = domain.lower.max(domain.upper - core.config.initial_range_length);
        core.overview_range = ValueRange::new(lower, domain.upper);
        core.details.set_visible(false, Duration::ZERO);
        self.setup_collection(false);
        let theme = self.core().theme;
        self.apply_theme_to_renderers(&theme, Duration::ZERO);
        let core = self.core_mut();
        core.emit_range(false);
        core.emit_title(false);
        core.emit_paging();
        core.push_event(ControllerEvent::DetailsVisibilityChanged { visible: false, animated: false });
        core.set_needs_display();
    }

    /// Host view geometry changed. Labels and vertical ranges are recomputed.
    fn set_frames(&mut self, bounds: Rect, chart_frame: Rect) {
        let core = self.core_mut();
        if core.bounds == bounds && core.chart_frame == chart_frame {
            return;
        }
        core.bounds = bounds;
        core.chart_frame = chart_frame;
        core.labeler.reset();
        core.set_needs_display();
        let range = core.active_range();
        self.update_main_range(range, false);
    }

    /// The range control moved to `fraction` of the whole domain.
    fn update_chart_range(&mut self, fraction: ValueRange) {
        self.cancel_chart_interaction();
        let core = self.core_mut();
        let range = core.total_horizontal.sub_range(fraction);
        trace!(lower = range.lower, upper = range.upper, "chart range updated");
        core.set_active_range(range);
        core.emit_title(true);
        core.set_needs_display();
        self.update_main_range(range, true);
    }

    /// Replace series visibility; re-issues the tooltip when one is open.
    fn update_charts_visibility(&mut self, visibility: Vec<bool>) -> Result<()> {
        let expected = self.core().collection.series_count();
        if visibility.len() != expected {
            return Err(ChartError::VisibilityMismatch { expected, actual: visibility.len() });
        }
        let core = self.core_mut();
        core.visibility = visibility;
        core.set_needs_display();
        self.apply_visibility(true);
        if let Some(point) = self.core().interaction_point {
            self.chart_interaction_begin(point);
        }
        Ok(())
    }

    /// Pointer down/move over the chart at a fractional position of the content frame.
    fn chart_interaction_begin(&mut self, point: Point) {
        let core = self.core();
        let frame = core.chart_frame;
        if frame.width() <= 0.0 {
            return;
        }
        let range = core.active_range();
        let target = range.value_at(point.x as f64);
        let Some(index) = core.collection.closest_index(target) else { return };
        let timestamp = core.collection.timestamps()[index];

        if !core.is_zoomed() && core.details.is_visible() {
            let pixel = frame.point_at(point);
            if core.details.banner_frame(core.bounds, frame).is_some_and(|b| b.contains(pixel)) {
                let tapped = core.details.view_model().timestamp;
                self.core_mut().details_tapped = Some(tapped);
                return;
            }
        }

        let was_begun = core.is_interaction_begun();
        let model = self.details_model(index);
        let anchor = timestamp - self.details_anchor_offset();
        let core = self.core_mut();
        core.details_tapped = None;
        core.interaction_point = Some(point);
        core.interacting = true;
        let x = frame.left + (range.fraction_of(anchor) as f32) * frame.width();
        let duration = core.duration(was_begun);
        core.details.set_view_model(model, duration);
        core.details.set_position(x);
        let fade = core.duration(true);
        if !core.details.is_visible() {
            core.details.set_visible(true, fade);
        }
        core.push_event(ControllerEvent::DetailsVisibilityChanged { visible: true, animated: true });
        core.push_event(ControllerEvent::DetailsPositionChanged { x });
        core.set_needs_display();
        self.show_markers(index, timestamp);
    }

    /// Pointer released. A release on the tooltip banner drills in.
    fn chart_interaction_end(&mut self) {
        let core = self.core_mut();
        core.interacting = false;
        if let Some(timestamp) = core.details_tapped.take() {
            self.cancel_chart_interaction();
            self.request_zoom_in(timestamp);
        }
    }

    /// Hide the tooltip and markers.
    fn cancel_chart_interaction(&mut self) {
        let core = self.core_mut();
        let was_begun = core.interaction_point.take().is_some();
        core.interacting = false;
        core.details_tapped = None;
        let duration = core.duration(true);
        if core.details.is_visible() {
            core.details.set_visible(false, duration);
        }
        if was_begun {
            core.push_event(ControllerEvent::DetailsVisibilityChanged { visible: false, animated: true });
        }
        core.set_needs_display();
        self.hide_markers(true);
    }

    /// Ask the host for detail data around `timestamp`.
    /// Rejected while zoomed or while another request is pending.
    fn request_zoom_in(&mut self, timestamp: f64) -> Option<DrillTicket> {
        let core = self.core();
        if core.is_zoomed() {
            debug!(timestamp, "zoom-in rejected: already zoomed");
            return None;
        }
        if let Some(pending) = core.pending {
            debug!(timestamp, pending = pending.ticket.id(), "zoom-in rejected: request pending");
            return None;
        }
        self.cancel_chart_interaction();
        let core = self.core_mut();
        let ticket = DrillTicket(core.next_ticket);
        core.next_ticket += 1;
        core.pending = Some(PendingDrill { ticket, timestamp });
        debug!(ticket = ticket.id(), timestamp, "zoom-in requested");
        core.push_event(ControllerEvent::ZoomInRequested { ticket, timestamp });
        Some(ticket)
    }

    /// Answer to a drill-in request. `None` keeps the overview unchanged.
    /// Returns true when the chart switched to the zoomed state.
    fn complete_zoom_in(&mut self, ticket: DrillTicket, data: Option<SeriesCollection>) -> bool {
        let core = self.core_mut();
        let Some(pending) = core.pending.filter(|p| p.ticket == ticket) else {
            warn!(ticket = ticket.id(), "ignoring stale zoom-in completion");
            return false;
        };
        core.pending = None;
        let Some(data) = data else {
            debug!(ticket = ticket.id(), "zoom-in returned no data");
            return false;
        };
        if data.series_count() != core.collection.series_count() {
            core.visibility = vec![true; data.series_count()];
            core.push_event(ControllerEvent::ToolsRefreshRequested);
        }
        let t = pending.timestamp;
        core.zoomed_range = ValueRange::new(t, t + core.config.zoomed_range_length).clamped_to(data.horizontal_range());
        core.collection = data;
        core.zoom = ZoomState::Zoomed;
        core.labeler.reset();
        debug!(ticket = ticket.id(), timestamp = t, samples = core.collection.len(), "zoomed in");
        self.cancel_chart_interaction();
        self.setup_collection(true);
        self.apply_visibility(true);
        let core = self.core_mut();
        core.push_event(ControllerEvent::BackButtonVisibilityChanged { visible: true });
        core.emit_range(true);
        core.emit_title(true);
        core.emit_paging();
        core.set_needs_display();
        true
    }

    /// Return to the overview data and the window shown before zooming in.
    fn zoom_out(&mut self) -> bool {
        if !self.core().is_zoomed() {
            return false;
        }
        self.cancel_chart_interaction();
        let core = self.core_mut();
        let series_changed = core.initial_collection.series_count() != core.collection.series_count();
        core.collection = core.initial_collection.clone();
        if series_changed {
            core.visibility = vec![true; core.collection.series_count()];
            core.push_event(ControllerEvent::ToolsRefreshRequested);
        }
        core.zoom = ZoomState::Overview;
        core.labeler.reset();
        debug!(lower = core.overview_range.lower, upper = core.overview_range.upper, "zoomed out");
        self.setup_collection(true);
        self.apply_visibility(true);
        let core = self.core_mut();
        core.push_event(ControllerEvent::BackButtonVisibilityChanged { visible: false });
        core.emit_range(true);
        core.emit_title(true);
        core.emit_paging();
        core.set_needs_display();
        true
    }

    fn apply_theme(&mut self, theme: Theme, animated: bool) {
        let core = self.core_mut();
        let duration = core.duration(animated);
        core.theme = theme;
        core.details.apply_theme(&theme, duration);
        core.set_needs_display();
        self.apply_theme_to_renderers(&theme, duration);
    }

    /// Attach `view` to every renderer of `layer`.
    fn attach(&mut self, layer: Layer, view: ViewId) {
        for r in self.renderers_mut(layer) {
            r.attach(view);
        }
        self.core_mut().set_needs_display();
    }

    fn detach(&mut self, layer: Layer, view: ViewId) {
        for r in self.renderers_mut(layer) {
            r.detach(view);
        }
    }

    /// Advance every animator once. Returns the views that need a redraw.
    fn tick(&mut self, dt: Duration) -> Vec<ViewId> {
        let everything = std::mem::take(&mut self.core_mut().needs_display);
        let mut views = Vec::new();
        for layer in [Layer::Main, Layer::Preview] {
            for r in self.renderers_mut(layer) {
                let moved = r.tick(dt);
                if moved || everything {
                    views.extend(r.containers().iter());
                }
            }
        }
        views.sort_unstable();
        views.dedup();
        views
    }

    fn drain_events(&mut self) -> Vec<ControllerEvent> {
        self.core_mut().events.drain(..).collect()
    }

    fn zoom_state(&self) -> ZoomState { self.core().zoom }
    fn visibility(&self) -> &[bool] { &self.core().visibility }
    fn range_fraction(&self) -> ValueRange { self.core().range_fraction() }
    fn title(&self) -> String { self.core().title() }

    /// Tooltip content while shown.
    fn details(&self) -> Option<&DetailsViewModel> {
        let core = self.core();
        core.is_interaction_begun().then(|| core.details.view_model())
    }
}
