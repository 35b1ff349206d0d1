// File: crates/trendline-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use skia_safe::Color;
use trendline_core::{
    ChartConfig, ChartKind, ChartView, Layer, Series, SeriesCollection, Theme, ViewId, ViewOptions,
};

fn controller(theme: Theme) -> Box<dyn trendline_core::ChartComponent> {
    let ts = vec![0.0, 86_400.0, 172_800.0, 259_200.0];
    let collection = SeriesCollection::new(
        ts,
        vec![
            Series::new("A", Color::from_rgb(0, 0, 255), vec![1.0, 2.0, 3.0, 4.0]),
            Series::new("B", Color::from_rgb(255, 0, 0), vec![4.0, 3.0, 2.0, 1.0]),
        ],
    )
    .expect("collection");
    ChartKind::Percent.build(collection, ChartConfig::default(), theme).expect("controller")
}

#[test]
fn render_rgba8_buffer() {
    let mut c = controller(Theme::day());
    let view = ChartView::new(ViewId(1), ViewOptions { width: 200, height: 120, ..ViewOptions::default() });
    view.attach(c.as_mut(), Layer::Main);
    let (px, w, h, stride) = view.render_to_rgba8(c.as_ref()).expect("rgba render");
    assert_eq!((w, h), (200, 120));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Top-left pixel is background (RGBA)
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
}

#[test]
fn night_background_and_band_pixels() {
    let night = Theme::night();
    let mut c = controller(night);
    let options = ViewOptions::default().with_theme(&night);
    let view = ChartView::new(ViewId(1), options);
    view.attach(c.as_mut(), Layer::Main);
    let (px, w, _, stride) = view.render_to_rgba8(c.as_ref()).expect("rgba render");
    let at = |x: usize, y: usize| &px[y * stride + x * 4..y * stride + x * 4 + 4];
    let bg = night.background;
    assert_eq!(at(0, 0), &[bg.r(), bg.g(), bg.b(), 255]);

    // Just above the baseline, one third into the frame: inside the bottom band (series A drawn first).
    let frame = view.chart_frame();
    let x = (frame.left + frame.width() / 3.0) as usize;
    let y = (frame.bottom - 3.0) as usize;
    assert!(x < w as usize);
    assert_eq!(at(x, y)[3], 255, "bands are opaque");
    assert_ne!(at(x, y)[0..3], [bg.r(), bg.g(), bg.b()], "band covers the background");
}
