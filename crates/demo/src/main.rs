// File: crates/demo/src/main.rs
// Summary: Demo loads a daily CSV (or synthesizes one) and plays a scripted session on every chart kind, writing PNG frames.
// Notes:
// - Drill-in requests are answered with hourly data derived from the selected day,
//   standing in for the per-day detail files a real host would fetch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use skia_safe::Color;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trendline_core::types::{DAY, HOUR};
use trendline_core::{
    ChartComponent, ChartConfig, ChartKind, ChartView, ControllerEvent, Layer, Point, RangeEvent, RangeSelection,
    RangeSelectionConfig, RangeSelectionView, Rect, Series, SeriesCollection, Theme, ViewId, ViewOptions,
};

fn palette(k: usize) -> Color {
    const RGB: [(u8, u8, u8); 6] =
        [(0x3c, 0xc2, 0x3f), (0xf3, 0x4c, 0x44), (0x3e, 0x65, 0xcf), (0xf5, 0xbd, 0x25), (0x64, 0xad, 0xed), (0x9b, 0x59, 0xb6)];
    let (r, g, b) = RGB[k % RGB.len()];
    Color::from_rgb(r, g, b)
}

const STRIP_HEIGHT: i32 = 60;
const CHART_VIEW: ViewId = ViewId(1);
const STRIP_VIEW: ViewId = ViewId(2);

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let collection = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(raw);
            load_daily_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => {
            info!("no input file given, synthesizing 120 days of data");
            synthesize_daily(120)?
        }
    };
    info!(samples = collection.len(), series = collection.series_count(), "loaded collection");

    let out_dir = PathBuf::from("target/out");
    for kind in [ChartKind::TwoAxisLines, ChartKind::StackedBars, ChartKind::Percent] {
        let mut session = Session::new(kind, collection.clone(), &out_dir)?;
        session.play().with_context(|| format!("session '{}' failed", kind.name()))?;
    }
    Ok(())
}

/// One chart with its overview strip, driven like a host would.
struct Session {
    kind: ChartKind,
    controller: Box<dyn ChartComponent>,
    view: ChartView,
    strip: RangeSelectionView,
    out_dir: PathBuf,
    frame: usize,
}

impl Session {
    fn new(kind: ChartKind, collection: SeriesCollection, out_dir: &Path) -> Result<Self> {
        let theme = Theme::day();
        let mut controller = kind.build(collection, ChartConfig::default(), theme)?;
        let options = ViewOptions::default().with_theme(&theme);
        let view = ChartView::new(CHART_VIEW, options);
        let strip_options = ViewOptions { height: STRIP_HEIGHT, ..options };
        let control = RangeSelection::new(
            RangeSelectionConfig::default(),
            Rect::from_xywh(0.0, 0.0, options.width as f32, STRIP_HEIGHT as f32),
            &theme,
        );
        let strip = RangeSelectionView::new(STRIP_VIEW, strip_options, control);
        view.attach(controller.as_mut(), Layer::Main);
        strip.attach(controller.as_mut());
        let mut session = Self { kind, controller, view, strip, out_dir: out_dir.to_path_buf(), frame: 0 };
        session.pump();
        Ok(session)
    }

    fn play(&mut self) -> Result<()> {
        info!(kind = self.kind.name(), "starting session");
        self.settle();
        self.snapshot("overview")?;

        // Drag the lower thumb to the middle of the strip.
        let content = self.strip.control().content_frame();
        let lower_x = content.left + content.width() * self.strip.control().range().lower as f32;
        if self.strip.control_mut().pointer_down(lower_x + 2.0) {
            for step in 1..=5 {
                let x = lower_x + (content.width() * 0.5 - lower_x + content.left) * step as f32 / 5.0;
                let event = self.strip.control_mut().pointer_move(x);
                self.handle_range_event(event);
            }
            let event = self.strip.control_mut().pointer_up(content.left + content.width() * 0.5);
            self.handle_range_event(event);
        }
        self.settle();
        self.snapshot("range")?;

        self.controller.chart_interaction_begin(Point::new(0.6, 0.5));
        self.settle();
        self.snapshot("tooltip")?;

        // Tap the banner to drill in.
        let core = self.controller.core();
        if let Some(banner) = core.details.banner_frame(core.bounds, core.chart_frame) {
            let frame = core.chart_frame;
            let tap = Point::new(
                ((banner.left + banner.right) / 2.0 - frame.left) / frame.width(),
                ((banner.top + banner.bottom) / 2.0 - frame.top) / frame.height(),
            );
            self.controller.chart_interaction_begin(tap);
            self.controller.chart_interaction_end();
        }
        self.pump();
        self.settle();
        self.snapshot("zoomed")?;

        let mut visibility = self.controller.visibility().to_vec();
        if let Some(first) = visibility.first_mut() {
            *first = false;
        }
        self.controller.update_charts_visibility(visibility)?;
        self.settle();
        self.snapshot("toggled")?;

        self.apply_theme(Theme::night());
        self.settle();
        self.snapshot("night")?;

        self.controller.zoom_out();
        self.pump();
        self.settle();
        self.snapshot("overview_night")?;
        Ok(())
    }

    fn handle_range_event(&mut self, event: Option<RangeEvent>) {
        match event {
            Some(RangeEvent::Changed { range, .. }) => self.controller.update_chart_range(range),
            Some(RangeEvent::TouchedOutside) => self.controller.cancel_chart_interaction(),
            None => {}
        }
        self.pump();
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.controller.apply_theme(theme, true);
        self.view.set_options(self.view.options().with_theme(&theme));
        self.strip.set_background(theme.background);
        self.strip.control_mut().apply_theme(&theme, Duration::from_millis(300));
    }

    /// React to controller events the way a host UI would.
    fn pump(&mut self) {
        for event in self.controller.drain_events() {
            match event {
                ControllerEvent::RangeChanged { fraction, animated } => {
                    let duration = if animated { Duration::from_millis(300) } else { Duration::ZERO };
                    self.strip.control_mut().set_range(fraction, duration);
                }
                ControllerEvent::TitleChanged { title, .. } => self.view.set_title(Some(title)),
                ControllerEvent::RangePagingChanged { enabled, page_size } => {
                    self.strip.control_mut().set_paging(enabled, page_size);
                }
                ControllerEvent::ZoomInRequested { ticket, timestamp } => {
                    let detail = match hourly_detail(self.controller.core().collection.clone(), timestamp) {
                        Ok(detail) => Some(detail),
                        Err(err) => {
                            warn!(%err, "could not build detail data");
                            None
                        }
                    };
                    self.controller.complete_zoom_in(ticket, detail);
                }
                ControllerEvent::BackButtonVisibilityChanged { visible } => info!(visible, "back button"),
                ControllerEvent::ToolsRefreshRequested => info!("series toggles rebuilt"),
                _ => {}
            }
        }
    }

    /// Run frames until every animation has finished.
    fn settle(&mut self) {
        let dt = Duration::from_millis(16);
        for _ in 0..120 {
            let views = self.controller.tick(dt);
            let strip = self.strip.control_mut().tick(dt);
            self.pump();
            if views.is_empty() && !strip {
                break;
            }
        }
    }

    fn snapshot(&mut self, label: &str) -> Result<()> {
        self.frame += 1;
        let name = format!("{}_{:02}_{}", self.kind.name(), self.frame, label);
        let chart_path = self.out_dir.join(format!("{name}.png"));
        let strip_path = self.out_dir.join(format!("{name}_strip.png"));
        self.view.render_to_png(self.controller.as_ref(), &chart_path)?;
        self.strip.render_to_png(self.controller.as_ref(), &strip_path)?;
        info!(path = %chart_path.display(), "wrote frame");
        Ok(())
    }
}

/// Hourly samples for the day starting at `timestamp`, interpolated from the daily data.
fn hourly_detail(daily: SeriesCollection, timestamp: f64) -> Result<SeriesCollection> {
    let ts: Vec<f64> = (0..24).map(|h| timestamp + h as f64 * HOUR).collect();
    let index = daily.closest_index(timestamp).unwrap_or(0);
    let next = (index + 1).min(daily.len() - 1);
    let series = daily
        .series()
        .iter()
        .map(|s| {
            let (a, b) = (s.values[index], s.values[next]);
            let values = (0..24)
                .map(|h| {
                    let t = h as f64 / 24.0;
                    let wave = 1.0 + 0.15 * (t * std::f64::consts::TAU).sin();
                    ((a + (b - a) * t) / 24.0 * wave).max(0.0)
                })
                .collect();
            Series::new(s.name.clone(), s.color, values)
        })
        .collect();
    Ok(SeriesCollection::new(ts, series)?)
}

fn synthesize_daily(days: usize) -> Result<SeriesCollection> {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .context("invalid start date")?
        .and_utc()
        .timestamp() as f64;
    let ts: Vec<f64> = (0..days).map(|d| start + d as f64 * DAY).collect();
    let joined = (0..days).map(|d| 1200.0 + 400.0 * (d as f64 / 9.0).sin() + 3.0 * d as f64).collect();
    let left = (0..days).map(|d| 300.0 + 120.0 * (d as f64 / 5.0).cos()).collect();
    Ok(SeriesCollection::new(
        ts,
        vec![Series::new("Joined", palette(0), joined), Series::new("Left", palette(1), left)],
    )?)
}

/// Load a CSV with a date/timestamp column and one numeric column per series.
fn load_daily_csv(path: &Path) -> Result<SeriesCollection> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let time_names = ["time", "timestamp", "date", "datetime", "x"];
    let i_time = headers
        .iter()
        .position(|h| time_names.contains(&h.to_lowercase().as_str()))
        .context("no time column (time/timestamp/date/datetime/x)")?;
    let value_columns: Vec<usize> = (0..headers.len()).filter(|i| *i != i_time).collect();
    if value_columns.is_empty() {
        anyhow::bail!("no value columns next to '{}'", headers[i_time]);
    }

    let mut ts = Vec::new();
    let mut values = vec![Vec::new(); value_columns.len()];
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let Some(t) = rec.get(i_time).and_then(parse_time) else {
            warn!(row, "skipping row with unreadable time");
            continue;
        };
        let parsed: Option<Vec<f64>> =
            value_columns.iter().map(|&i| rec.get(i).and_then(|s| s.trim().parse::<f64>().ok())).collect();
        let Some(parsed) = parsed else {
            warn!(row, "skipping row with unreadable values");
            continue;
        };
        ts.push(t);
        for (column, v) in values.iter_mut().zip(parsed) {
            column.push(v);
        }
    }

    let series = value_columns
        .iter()
        .zip(values)
        .enumerate()
        .map(|(k, (&i, v))| Series::new(headers[i].clone(), palette(k), v))
        .collect();
    Ok(SeriesCollection::new(ts, series)?)
}

/// Epoch seconds or milliseconds, or an ISO date.
fn parse_time(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(n) = s.parse::<i64>() {
        if n > 10_i64.pow(12) {
            return Some(n as f64 / 1000.0);
        } // epoch ms -> sec
        return Some(n as f64);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64)
}
