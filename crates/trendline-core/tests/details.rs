// File: crates/trendline-core/tests/details.rs
// Purpose: Tooltip banner layout: side selection, clamping, row fades and hidden state.

use std::time::Duration;

use skia_safe::Color;
use trendline_core::render::{ChartRenderer, DetailsRenderer, DetailsRow, DetailsViewModel};
use trendline_core::{DetailsMetrics, Rect, Theme};

fn row(title: &str, value: &str, visible: bool) -> DetailsRow {
    DetailsRow { prefix: None, title: title.into(), value: value.into(), color: Color::BLACK, visible }
}

fn renderer(rows: Vec<DetailsRow>) -> DetailsRenderer {
    let mut r = DetailsRenderer::new(DetailsMetrics::default(), &Theme::day());
    r.set_view_model(
        DetailsViewModel { title: "Sat, 6 Apr".into(), show_arrow: true, rows, ..Default::default() },
        Duration::ZERO,
    );
    r.set_visible(true, Duration::ZERO);
    r
}

fn bounds() -> Rect {
    Rect::from_xywh(0.0, 0.0, 720.0, 420.0)
}

fn frame() -> Rect {
    Rect::from_ltrb(16.0, 40.0, 704.0, 385.0)
}

#[test]
fn hidden_banner_has_no_frame() {
    let r = DetailsRenderer::new(DetailsMetrics::default(), &Theme::day());
    assert!(r.banner_frame(bounds(), frame()).is_none());
}

#[test]
fn banner_sits_left_of_marker_when_it_fits() {
    let mut r = renderer(vec![row("Joined", "1 200", true), row("Left", "35", true)]);
    r.set_position(600.0);
    let b = r.banner_frame(bounds(), frame()).expect("banner");
    let m = DetailsMetrics::default();
    assert!((b.right - (600.0 - m.position_offset)).abs() < 1e-3);
    assert_eq!(b.top, frame().top + m.top_offset);
    assert_eq!(b.height(), 3.0 * m.row_height + 2.0 * m.margins);
}

#[test]
fn banner_flips_right_near_left_edge() {
    let mut r = renderer(vec![row("Joined", "1 200", true)]);
    r.set_position(20.0);
    let b = r.banner_frame(bounds(), frame()).expect("banner");
    assert_eq!(b.left, 20.0 + DetailsMetrics::default().position_offset);
}

#[test]
fn banner_is_clamped_inside_bounds() {
    let mut r = renderer(vec![row("Joined", "1 200", true)]);
    r.set_position(0.0);
    let width = r.banner_frame(bounds(), frame()).expect("banner").width();
    // Narrow view: the banner does not fit left of the marker and would overflow on the right.
    let narrow = Rect::from_xywh(0.0, 0.0, width + 15.0, 200.0);
    r.set_position(width - 5.0);
    let b = r.banner_frame(narrow, narrow).expect("banner");
    assert!((b.right - narrow.right).abs() < 1e-3, "{b:?} in {narrow:?}");
}

#[test]
fn hidden_rows_do_not_take_space() {
    let m = DetailsMetrics::default();
    let mut r = renderer(vec![row("Joined", "1", true), row("Left", "2", false)]);
    r.set_position(600.0);
    assert_eq!(r.banner_frame(bounds(), frame()).map(|b| b.height()), Some(2.0 * m.row_height + 2.0 * m.margins));

    // Same row count: the second row fades in.
    r.set_view_model(
        DetailsViewModel { rows: vec![row("Joined", "1", true), row("Left", "2", true)], ..Default::default() },
        Duration::from_millis(200),
    );
    r.tick(Duration::from_millis(500));
    assert_eq!(r.banner_frame(bounds(), frame()).map(|b| b.height()), Some(3.0 * m.row_height + 2.0 * m.margins));
}

#[test]
fn fading_out_drops_the_frame() {
    let mut r = renderer(vec![row("Joined", "1", true)]);
    r.set_visible(false, Duration::from_millis(200));
    assert!(r.banner_frame(bounds(), frame()).is_none(), "hit tests stop as soon as the fade starts");
    r.set_visible(true, Duration::ZERO);
    r.set_enabled(false);
    assert!(r.banner_frame(bounds(), frame()).is_none());
}
