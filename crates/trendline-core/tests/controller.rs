// File: crates/trendline-core/tests/controller.rs
// Purpose: Controller state machine: tooltip interaction, drill-in tickets, zoom round-trip, visibility.

use std::time::Duration;

use skia_safe::Color;
use trendline_core::render::ChartRenderer;
use trendline_core::types::{DAY, HOUR};
use trendline_core::{
    ChartComponent, ChartConfig, ChartError, ChartKind, ControllerEvent, Layer, Point, Series, SeriesCollection, Theme,
    ValueRange, ViewId, ZoomState,
};

/// 2019-04-06 00:00:00 UTC, a Saturday.
const BASE: f64 = 1_554_508_800.0;

fn overview() -> SeriesCollection {
    let ts: Vec<f64> = (0..4).map(|i| BASE + i as f64 * DAY).collect();
    SeriesCollection::new(
        ts,
        vec![
            Series::new("A", Color::from_rgb(0x3c, 0xc2, 0x3f), vec![1.0, 2.0, 3.0, 4.0]),
            Series::new("B", Color::from_rgb(0xf3, 0x4c, 0x44), vec![4.0, 3.0, 2.0, 1.0]),
        ],
    )
    .expect("valid collection")
}

fn hourly(day: f64, series: usize) -> SeriesCollection {
    let ts: Vec<f64> = (0..24).map(|h| day + h as f64 * HOUR).collect();
    let series = (0..series)
        .map(|s| Series::new(format!("S{s}"), Color::BLACK, (0..24).map(|h| (h * (s + 1)) as f64).collect()))
        .collect();
    SeriesCollection::new(ts, series).expect("valid collection")
}

fn build(kind: ChartKind) -> Box<dyn ChartComponent> {
    kind.build(overview(), ChartConfig::default(), Theme::day()).expect("controller")
}

fn assert_range_eq(a: ValueRange, b: ValueRange) {
    assert!((a.lower - b.lower).abs() < 1e-9 && (a.upper - b.upper).abs() < 1e-9, "{a:?} != {b:?}");
}

#[test]
fn initialization_announces_state() {
    let mut c = build(ChartKind::TwoAxisLines);
    assert_eq!(c.zoom_state(), ZoomState::Overview);
    assert_eq!(c.visibility(), &[true, true]);
    assert_range_eq(c.range_fraction(), ValueRange::unit());
    assert_eq!(c.title(), "6 Apr 2019 - 9 Apr 2019");
    let events = c.drain_events();
    assert!(events.contains(&ControllerEvent::RangeChanged { fraction: ValueRange::unit(), animated: false }));
    assert!(events.iter().any(|e| matches!(e, ControllerEvent::RangePagingChanged { enabled: false, .. })));
    assert!(c.drain_events().is_empty());
}

#[test]
fn interaction_picks_nearest_sample() {
    let mut c = build(ChartKind::TwoAxisLines);
    c.drain_events();
    c.chart_interaction_begin(Point::new(0.5, 0.5));
    let details = c.details().expect("tooltip shown");
    assert_eq!(details.index, 1, "ties go to the earlier sample");
    assert_eq!(details.title, "Sun, 7 Apr");
    assert!(details.show_arrow);
    let values: Vec<&str> = details.rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(values, ["2", "3"]);
    let events = c.drain_events();
    assert!(events.contains(&ControllerEvent::DetailsVisibilityChanged { visible: true, animated: true }));
    assert!(events.iter().any(|e| matches!(e, ControllerEvent::DetailsPositionChanged { .. })));

    c.chart_interaction_begin(Point::new(0.98, 0.5));
    assert_eq!(c.details().map(|d| d.index), Some(3));

    c.cancel_chart_interaction();
    assert!(c.details().is_none());
}

#[test]
fn percent_tooltip_shows_shares() {
    let mut c = build(ChartKind::Percent);
    c.chart_interaction_begin(Point::new(0.5, 0.5));
    let details = c.details().expect("tooltip shown");
    assert!(details.show_prefixes);
    let prefixes: Vec<Option<&str>> = details.rows.iter().map(|r| r.prefix.as_deref()).collect();
    assert_eq!(prefixes, [Some("40%"), Some("60%")]);

    c.update_charts_visibility(vec![true, false]).expect("visibility");
    let details = c.details().expect("tooltip re-issued");
    assert_eq!(details.rows[0].prefix.as_deref(), Some("100%"));
    assert_eq!(details.rows[1].prefix.as_deref(), Some("0%"));
    assert!(!details.rows[1].visible);
}

#[test]
fn visibility_length_is_checked() {
    let mut c = build(ChartKind::StackedBars);
    let err = c.update_charts_visibility(vec![true]).unwrap_err();
    assert_eq!(err, ChartError::VisibilityMismatch { expected: 2, actual: 1 });
    assert_eq!(c.visibility(), &[true, true]);
}

#[test]
fn chart_without_series_is_rejected() {
    let empty = SeriesCollection::new(vec![BASE], Vec::new()).expect("axis only");
    for kind in [ChartKind::TwoAxisLines, ChartKind::StackedBars, ChartKind::Percent] {
        let result = kind.build(empty.clone(), ChartConfig::default(), Theme::day());
        assert!(matches!(result.err(), Some(ChartError::NoSeries)), "{}", kind.name());
    }
}

#[test]
fn zoom_round_trip_restores_overview_window() {
    for kind in [ChartKind::TwoAxisLines, ChartKind::StackedBars, ChartKind::Percent] {
        let mut c = build(kind);
        c.update_chart_range(ValueRange::new(0.25, 0.75));
        let before = c.range_fraction();
        c.drain_events();

        let ticket = c.request_zoom_in(BASE + DAY).expect("ticket");
        assert!(c.drain_events().contains(&ControllerEvent::ZoomInRequested { ticket, timestamp: BASE + DAY }));
        assert!(c.complete_zoom_in(ticket, Some(hourly(BASE + DAY, 2))));
        assert_eq!(c.zoom_state(), ZoomState::Zoomed, "{}", kind.name());
        let events = c.drain_events();
        assert!(events.contains(&ControllerEvent::BackButtonVisibilityChanged { visible: true }));
        assert!(!events.contains(&ControllerEvent::ToolsRefreshRequested));
        assert!(c.request_zoom_in(BASE + DAY).is_none(), "no drill-in while zoomed");

        assert!(c.zoom_out());
        assert_eq!(c.zoom_state(), ZoomState::Overview);
        assert_range_eq(c.range_fraction(), before);
        assert!(c.drain_events().contains(&ControllerEvent::BackButtonVisibilityChanged { visible: false }));
        assert!(!c.zoom_out(), "already in overview");
    }
}

#[test]
fn zoomed_window_is_one_day_clamped_to_data() {
    let mut c = build(ChartKind::TwoAxisLines);
    let ticket = c.request_zoom_in(BASE + DAY).expect("ticket");
    assert!(c.complete_zoom_in(ticket, Some(hourly(BASE + DAY, 2))));
    assert_range_eq(c.core().zoomed_range, ValueRange::new(BASE + DAY, BASE + DAY + 23.0 * HOUR));
    assert_range_eq(c.range_fraction(), ValueRange::unit());
    assert_eq!(c.title(), "Sunday, 7 Apr 2019");
}

#[test]
fn drill_requests_are_serialized() {
    let mut c = build(ChartKind::TwoAxisLines);
    let first = c.request_zoom_in(BASE).expect("ticket");
    assert!(c.request_zoom_in(BASE + DAY).is_none(), "one request at a time");

    assert!(!c.complete_zoom_in(first, None), "no data keeps the overview");
    assert_eq!(c.zoom_state(), ZoomState::Overview);
    assert!(!c.complete_zoom_in(first, Some(hourly(BASE, 2))), "stale ticket is ignored");
    assert_eq!(c.zoom_state(), ZoomState::Overview);

    let second = c.request_zoom_in(BASE + DAY).expect("ticket after completion");
    assert_ne!(first, second);
}

#[test]
fn different_series_set_requests_tool_refresh() {
    let mut c = build(ChartKind::StackedBars);
    let ticket = c.request_zoom_in(BASE).expect("ticket");
    c.drain_events();
    assert!(c.complete_zoom_in(ticket, Some(hourly(BASE, 3))));
    assert_eq!(c.visibility(), &[true, true, true]);
    assert!(c.drain_events().contains(&ControllerEvent::ToolsRefreshRequested));
    assert!(c.zoom_out());
    assert_eq!(c.visibility(), &[true, true]);
}

#[test]
fn tapping_the_banner_drills_in() {
    let mut c = build(ChartKind::TwoAxisLines);
    c.chart_interaction_begin(Point::new(0.5, 0.5));
    let (bounds, frame) = (c.core().bounds, c.core().chart_frame);
    let banner = c.core().details.banner_frame(bounds, frame).expect("banner laid out");
    let cx = (banner.left + banner.right) / 2.0;
    let cy = (banner.top + banner.bottom) / 2.0;
    let tap = Point::new((cx - frame.left) / frame.width(), (cy - frame.top) / frame.height());
    c.drain_events();

    c.chart_interaction_begin(tap);
    c.chart_interaction_end();
    let events = c.drain_events();
    assert!(
        events.iter().any(|e| matches!(e, ControllerEvent::ZoomInRequested { timestamp, .. } if *timestamp == BASE + DAY)),
        "{events:?}"
    );
    assert!(c.details().is_none());
}

#[test]
fn completed_drill_hides_tooltip_begun_while_pending() {
    let mut c = build(ChartKind::TwoAxisLines);
    let ticket = c.request_zoom_in(BASE + DAY).expect("drill accepted");
    c.chart_interaction_begin(Point::new(0.5, 0.5));
    assert!(c.details().is_some());
    c.drain_events();

    assert!(c.complete_zoom_in(ticket, Some(hourly(BASE + DAY, 2))));
    assert_eq!(c.zoom_state(), ZoomState::Zoomed);
    assert!(c.details().is_none());
    assert!(!c.core().details.is_visible());
    let events = c.drain_events();
    assert!(
        events.iter().any(|e| matches!(e, ControllerEvent::DetailsVisibilityChanged { visible: false, .. })),
        "{events:?}"
    );
}

#[test]
fn tick_reports_attached_views() {
    let mut c = build(ChartKind::TwoAxisLines);
    c.attach(Layer::Main, ViewId(1));
    c.attach(Layer::Preview, ViewId(2));
    assert_eq!(c.tick(Duration::ZERO), vec![ViewId(1), ViewId(2)]);

    c.update_charts_visibility(vec![false, true]).expect("visibility");
    c.tick(Duration::from_secs(5));
    assert!(c.tick(Duration::from_millis(16)).is_empty(), "settled");

    c.update_chart_range(ValueRange::new(0.0, 0.5));
    let views = c.tick(Duration::from_millis(16));
    assert!(views.contains(&ViewId(1)));

    c.detach(Layer::Main, ViewId(1));
    c.update_chart_range(ValueRange::new(0.5, 1.0));
    assert!(!c.tick(Duration::from_millis(16)).contains(&ViewId(1)));
}

#[test]
fn theme_switch_is_animated() {
    let mut c = build(ChartKind::StackedBars);
    c.attach(Layer::Main, ViewId(7));
    c.tick(Duration::from_secs(1));
    c.apply_theme(Theme::night(), true);
    assert_eq!(c.core().theme, Theme::night());
    assert_eq!(c.tick(Duration::from_millis(16)), vec![ViewId(7)]);
}
