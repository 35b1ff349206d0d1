// File: crates/trendline-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders deterministic charts to PNG bytes with every text color transparent.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot files.
// - Else, if a snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and skips the pixel comparison.
// - In every case the decoded image must show each series color.

use std::time::Duration;

use skia_safe::Color;
use trendline_core::{
    ChartComponent, ChartConfig, ChartKind, ChartView, Layer, Series, SeriesCollection, Theme, ValueRange, ViewId,
    ViewOptions,
};

/// Day theme with text switched off (avoids font differences across platforms).
fn quiet_theme() -> Theme {
    let mut theme = Theme::day();
    theme.labels = Color::TRANSPARENT;
    theme.title = Color::TRANSPARENT;
    theme
}

const SERIES_A: Color = Color::from_rgb(0x3c, 0xc2, 0x3f);
const SERIES_B: Color = Color::from_rgb(0xf3, 0x4c, 0x44);

fn render_bytes(kind: ChartKind) -> Vec<u8> {
    let ts: Vec<f64> = (0..12).map(|i| 1_554_508_800.0 + i as f64 * 86_400.0).collect();
    let collection = SeriesCollection::new(
        ts,
        vec![
            Series::new("A", SERIES_A, vec![3.0, 5.0, 4.0, 6.0, 8.0, 7.0, 9.0, 6.0, 5.0, 7.0, 8.0, 10.0]),
            Series::new("B", SERIES_B, vec![6.0, 4.0, 5.0, 3.0, 2.0, 4.0, 3.0, 5.0, 6.0, 4.0, 3.0, 2.0]),
        ],
    )
    .expect("collection");
    let theme = quiet_theme();
    let mut c: Box<dyn ChartComponent> = kind.build(collection, ChartConfig::default(), theme).expect("controller");
    let view = ChartView::new(ViewId(1), ViewOptions { width: 320, height: 200, ..ViewOptions::default() }.with_theme(&theme));
    view.attach(c.as_mut(), Layer::Main);
    c.update_chart_range(ValueRange::new(0.2, 1.0));
    c.tick(Duration::from_secs(1));
    view.png_bytes(c.as_ref()).expect("render png")
}

/// Pixels within a small per-channel distance of `color`.
fn count_near(img: &image::RgbaImage, color: Color) -> usize {
    let near = |a: u8, b: u8| (a as i32 - b as i32).abs() <= 40;
    img.pixels()
        .filter(|p| p[3] == 255 && near(p[0], color.r()) && near(p[1], color.g()) && near(p[2], color.b()))
        .count()
}

fn check_plotted(name: &str, bytes: &[u8]) {
    let img = image::load_from_memory(bytes).expect("decode png").to_rgba8();
    assert_eq!(img.dimensions(), (320, 200), "{name}");
    assert!(count_near(&img, SERIES_A) > 0, "{name}: series A not drawn");
    assert!(count_near(&img, SERIES_B) > 0, "{name}: series B not drawn");
}

fn check_snapshot(name: &str, bytes: &[u8]) {
    check_plotted(name, bytes);
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join(format!("{name}.png"));

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.dimensions(), want_img.dimensions());
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}

#[test]
fn golden_two_axis_lines() {
    check_snapshot("two_axis_lines", &render_bytes(ChartKind::TwoAxisLines));
}

#[test]
fn golden_stacked_bars() {
    check_snapshot("stacked_bars", &render_bytes(ChartKind::StackedBars));
}

#[test]
fn golden_percent() {
    check_snapshot("percent", &render_bytes(ChartKind::Percent));
}

#[test]
fn rendering_is_deterministic() {
    let a = image::load_from_memory(&render_bytes(ChartKind::TwoAxisLines)).expect("decode").to_rgba8();
    let b = image::load_from_memory(&render_bytes(ChartKind::TwoAxisLines)).expect("decode").to_rgba8();
    assert_eq!(a.as_raw(), b.as_raw());
}
