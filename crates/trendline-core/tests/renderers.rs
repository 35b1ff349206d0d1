// File: crates/trendline-core/tests/renderers.rs
// Purpose: Renderer state outside drawing: fades, label crossfades, bar selection, range helpers.

use std::time::Duration;

use skia_safe::Color;
use trendline_core::axis::AxisLabel;
use trendline_core::render::bars::stacked_range;
use trendline_core::render::lines::optimize_polyline;
use trendline_core::render::{
    AnimatedLabels, BarComponent, BarsRenderer, Bullet, BulletsRenderer, ChartRenderer, LineData, LinesRenderer,
    VerticalLineRenderer, VerticalScalesRenderer,
};
use trendline_core::{Point, ValueRange, ViewId};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn label_sets_crossfade_then_collapse() {
    let mut labels = AnimatedLabels::default();
    labels.set(vec![AxisLabel::new(0.0, "a")], Duration::ZERO);
    assert_eq!(labels.set_count(), 1);

    labels.set(vec![AxisLabel::new(1.0, "b")], ms(300));
    assert_eq!(labels.set_count(), 2);
    assert_eq!(labels.current()[0].text, "b");

    assert!(labels.tick(ms(300)));
    assert_eq!(labels.set_count(), 1);
    assert_eq!(labels.current()[0].text, "b");
}

#[test]
fn bar_selection_clears_after_fade_out() {
    let mut bars = BarsRenderer::new();
    bars.set_bars(vec![10.0, 20.0, 30.0], 10.0, vec![BarComponent::new(Color::RED, vec![1.0, 2.0, 3.0])]);
    assert_eq!(bars.horizontal_range(), Some(ValueRange::new(0.0, 30.0)));

    bars.set_selected_index(Some(1), ms(300));
    assert_eq!(bars.selected_index(), Some(1));
    bars.tick(ms(150));
    assert_eq!(bars.selected_index(), Some(1));

    bars.set_selected_index(None, ms(300));
    bars.tick(ms(300));
    bars.tick(ms(16));
    assert_eq!(bars.selected_index(), None);
}

#[test]
fn stacked_range_counts_visible_components_only() {
    let locations = [10.0, 20.0, 30.0];
    let components = [
        BarComponent::new(Color::RED, vec![1.0, 2.0, 3.0]),
        BarComponent::new(Color::BLUE, vec![4.0, 5.0, 6.0]),
    ];
    let window = ValueRange::new(15.0, 25.0);
    assert_eq!(stacked_range(&locations, &components, &[true, false], window), Some(ValueRange::new(0.0, 3.0)));
    assert_eq!(stacked_range(&locations, &components, &[true, true], window), Some(ValueRange::new(0.0, 9.0)));
    assert_eq!(stacked_range(&[], &components, &[true, true], window), None);
}

#[test]
fn line_fades_per_index() {
    let mut lines = LinesRenderer::new(2.0, 1.0);
    lines.set_lines(vec![
        LineData::new(Color::RED, vec![(0.0, 1.0), (1.0, 2.0)]),
        LineData::new(Color::BLUE, vec![(0.0, 3.0), (1.0, 4.0)]),
    ]);
    assert_eq!(lines.lines().len(), 2);
    assert_eq!(lines.line_alpha(1), 1.0);
    assert_eq!(lines.line_alpha(5), 0.0);

    lines.set_line_visible(1, false, ms(100));
    lines.tick(ms(50));
    let mid = lines.line_alpha(1);
    assert!(mid > 0.0 && mid < 1.0, "mid-fade alpha {mid}");
    lines.tick(ms(50));
    assert_eq!(lines.line_alpha(1), 0.0);
    assert_eq!(lines.line_alpha(0), 1.0);
}

#[test]
fn vertical_range_in_window_can_include_neighbours() {
    let line = LineData::new(Color::RED, vec![(0.0, 1.0), (1.0, 5.0), (2.0, 2.0), (3.0, 9.0)]);
    let window = ValueRange::new(1.2, 1.8);
    assert_eq!(LineData::vertical_range_in([&line], window, false), None);
    assert_eq!(LineData::vertical_range_in([&line], window, true), Some(ValueRange::new(2.0, 5.0)));
    assert_eq!(LineData::horizontal_range([&line]), Some(ValueRange::new(0.0, 3.0)));
}

#[test]
fn polyline_column_keeps_extremes_and_ends() {
    let points: Vec<Point> = (0..100).map(|i| Point::new(i as f32 * 0.05, ((i * 37) % 11) as f32)).collect();
    let reduced = optimize_polyline(&points, 10.0);
    assert!(reduced.len() <= 4);
    assert_eq!(reduced.first(), points.first());
    assert_eq!(reduced.last(), points.last());
    let min = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    assert!(reduced.iter().any(|p| p.y == min));
    assert!(reduced.iter().any(|p| p.y == max));
    assert_eq!(optimize_polyline(&points, 0.0).len(), points.len());
}

#[test]
fn bullets_and_marker_hold_their_data() {
    let mut bullets = BulletsRenderer::new();
    bullets.set_bullets(vec![Bullet { coordinate: (1.0, 2.0), color: Color::RED }]);
    assert_eq!(bullets.bullets().len(), 1);
    assert_eq!(bullets.inner_color(), Color::WHITE);
    bullets.set_inner_color(Color::BLACK, ms(100));
    bullets.tick(ms(100));
    assert_eq!(bullets.inner_color(), Color::BLACK);

    let mut marker = VerticalLineRenderer::new();
    marker.set_values(vec![42.0]);
    assert_eq!(marker.values(), &[42.0]);
}

#[test]
fn visibility_targets_switch_immediately() {
    let mut scales = VerticalScalesRenderer::new();
    assert!(scales.horizontal_lines_visible());
    scales.set_horizontal_lines_visible(false, ms(300));
    assert!(!scales.horizontal_lines_visible());

    assert!(scales.is_visible());
    scales.set_visible(false, ms(300));
    assert!(!scales.is_visible());
    assert!(scales.tick(ms(300)));
    assert!(!scales.tick(ms(16)));
}

#[test]
fn attachments_are_a_set() {
    let mut lines = LinesRenderer::new(1.0, 0.0);
    lines.attach(ViewId(3));
    lines.attach(ViewId(3));
    lines.attach(ViewId(1));
    assert_eq!(lines.containers().iter().collect::<Vec<_>>(), vec![ViewId(3), ViewId(1)]);
    lines.detach(ViewId(3));
    assert!(lines.containers().contains(ViewId(1)));
    assert!(!lines.containers().contains(ViewId(3)));
}
