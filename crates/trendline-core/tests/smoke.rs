// File: crates/trendline-core/tests/smoke.rs
// Purpose: End-to-end render smoke tests writing PNGs for every chart kind and the overview strip.

use std::time::Duration;

use skia_safe::Color;
use trendline_core::types::DAY;
use trendline_core::{
    ChartComponent, ChartConfig, ChartKind, ChartView, Layer, Point, RangeSelection, RangeSelectionConfig,
    RangeSelectionView, Rect, Series, SeriesCollection, Theme, ValueRange, ViewId, ViewOptions,
};

fn collection() -> SeriesCollection {
    let ts: Vec<f64> = (0..40).map(|i| 1_554_508_800.0 + i as f64 * DAY).collect();
    let a = (0..40).map(|i| 50.0 + 30.0 * (i as f64 / 5.0).sin()).collect();
    let b = (0..40).map(|i| 20.0 + i as f64).collect();
    SeriesCollection::new(
        ts,
        vec![
            Series::new("Joined", Color::from_rgb(0x3c, 0xc2, 0x3f), a),
            Series::new("Left", Color::from_rgb(0xf3, 0x4c, 0x44), b),
        ],
    )
    .expect("valid collection")
}

#[test]
fn render_smoke_png() {
    for kind in [ChartKind::TwoAxisLines, ChartKind::StackedBars, ChartKind::Percent] {
        let mut controller = kind.build(collection(), ChartConfig::default(), Theme::day()).expect("controller");
        let mut view = ChartView::new(ViewId(1), ViewOptions::default());
        view.attach(controller.as_mut(), Layer::Main);
        view.set_title(Some(controller.title()));
        controller.chart_interaction_begin(Point::new(0.6, 0.5));
        controller.tick(Duration::from_secs(1));

        let out = std::path::PathBuf::from(format!("target/test_out/smoke_{}.png", kind.name()));
        view.render_to_png(controller.as_ref(), &out).expect("render should succeed");
        let meta = std::fs::metadata(&out).expect("output exists");
        assert!(meta.len() > 0, "png should be non-empty");

        let bytes = view.png_bytes(controller.as_ref()).expect("render bytes");
        assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    }
}

#[test]
fn render_range_strip_png() {
    let mut controller = ChartKind::TwoAxisLines.build(collection(), ChartConfig::default(), Theme::night()).expect("controller");
    let options = ViewOptions { width: 720, height: 60, ..ViewOptions::default() }.with_theme(&Theme::night());
    let control = RangeSelection::new(RangeSelectionConfig::default(), Rect::from_xywh(0.0, 0.0, 720.0, 60.0), &Theme::night());
    let mut strip = RangeSelectionView::new(ViewId(2), options, control);
    strip.attach(controller.as_mut());
    controller.update_chart_range(ValueRangeExt::half());
    strip.control_mut().set_range(controller.range_fraction(), Duration::ZERO);

    let bytes = strip.png_bytes(controller.as_ref()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
    assert!(controller.tick(Duration::ZERO).contains(&ViewId(2)));
}
