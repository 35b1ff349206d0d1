// File: crates/window-demo/src/main.rs
// Summary: Windowed demo wiring real pointer input into the chart and the range control; RGBA blit (CPU) using winit + softbuffer.
// Notes:
// - Keys: 1/2/3 switch chart kind, N toggles night mode, V toggles the first
//   series, Backspace zooms out.
// - The top of the window is the chart, the bottom strip is the range control.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use skia_safe::Color;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use trendline_core::theme;
use trendline_core::types::{DAY, HOUR};
use trendline_core::{
    ChartComponent, ChartConfig, ChartKind, ChartView, ControllerEvent, FrameClock, Layer, RangeEvent, RangeSelection,
    RangeSelectionConfig, RangeSelectionView, Rect, Series, SeriesCollection, Theme, ViewId, ViewOptions,
};
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const STRIP_HEIGHT: u32 = 64;
const ANIMATION: Duration = Duration::from_millis(300);

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Trendline - Window Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(960.0, 600.0))
        .build(&event_loop)
        .context("build window")?;

    let context = unsafe { softbuffer::Context::new(&window) }.map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    let size = window.inner_size();
    let mut host = Host::new(ChartKind::TwoAxisLines, size.width, size.height)?;
    let mut clock = FrameClock::new();
    let mut cursor = (0.0f32, 0.0f32);
    let mut pressed: Option<Target> = None;

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *cf = ControlFlow::Exit,
                WindowEvent::Resized(new_size) => {
                    host.resize(new_size.width, new_size.height);
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    cursor = (position.x as f32, position.y as f32);
                    match pressed {
                        Some(Target::Chart) => host.chart_pointer(cursor),
                        Some(Target::Strip) => {
                            let event = host.strip.control_mut().pointer_move(cursor.0);
                            host.range_event(event);
                        }
                        None => {}
                    }
                    window.request_redraw();
                }
                WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                    match state {
                        ElementState::Pressed => {
                            let target = host.target_at(cursor.1);
                            match target {
                                Target::Chart => host.chart_pointer(cursor),
                                Target::Strip => {
                                    host.strip.control_mut().pointer_down(cursor.0);
                                }
                            }
                            pressed = Some(target);
                        }
                        ElementState::Released => {
                            match pressed.take() {
                                Some(Target::Chart) => host.controller.chart_interaction_end(),
                                Some(Target::Strip) => {
                                    let event = host.strip.control_mut().pointer_up(cursor.0);
                                    host.range_event(event);
                                }
                                None => {}
                            }
                            host.pump();
                        }
                    }
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput {
                    input: KeyboardInput { state: ElementState::Pressed, virtual_keycode: Some(key), .. },
                    ..
                } => {
                    if let Err(err) = host.key(key) {
                        tracing::warn!(%err, "key handling failed");
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                let dt = clock.tick();
                if host.tick(dt) {
                    window.request_redraw();
                    *cf = ControlFlow::Poll;
                }
            }
            Event::RedrawRequested(_) => {
                if let Err(err) = host.present(&mut surface) {
                    tracing::error!(%err, "present failed");
                }
            }
            _ => {}
        }
    });
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Chart,
    Strip,
}

struct Host {
    controller: Box<dyn ChartComponent>,
    view: ChartView,
    strip: RangeSelectionView,
    theme: Theme,
    width: u32,
    height: u32,
}

impl Host {
    fn new(kind: ChartKind, width: u32, height: u32) -> Result<Self> {
        let theme = Theme::day();
        let controller = kind.build(sample_data()?, ChartConfig::default(), theme)?;
        let (view, strip) = Self::views(width, height, &theme);
        let mut host = Self { controller, view, strip, theme, width, height };
        host.attach();
        Ok(host)
    }

    fn views(width: u32, height: u32, theme: &Theme) -> (ChartView, RangeSelectionView) {
        let w = width.max(1) as i32;
        let chart_h = height.saturating_sub(STRIP_HEIGHT).max(1) as i32;
        let options = ViewOptions { width: w, height: chart_h, ..ViewOptions::default() }.with_theme(theme);
        let strip_options = ViewOptions { width: w, height: STRIP_HEIGHT as i32, ..options };
        let control = RangeSelection::new(
            RangeSelectionConfig::default(),
            Rect::from_xywh(0.0, 0.0, w as f32, STRIP_HEIGHT as f32),
            theme,
        );
        (ChartView::new(ViewId(1), options), RangeSelectionView::new(ViewId(2), strip_options, control))
    }

    fn attach(&mut self) {
        self.view.attach(self.controller.as_mut(), Layer::Main);
        self.strip.attach(self.controller.as_mut());
        self.pump();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        let range = self.strip.control().range();
        let paging = (self.strip.control().is_paging_enabled(), self.strip.control().min_distance());
        let (view, mut strip) = Self::views(width, height, &self.theme);
        strip.control_mut().set_range(range, Duration::ZERO);
        if paging.0 {
            strip.control_mut().set_paging(true, paging.1);
        }
        self.view = view;
        self.strip = strip;
        self.controller.set_frames(self.view.bounds(), self.view.chart_frame());
    }

    fn chart_height(&self) -> f32 {
        self.view.options().height as f32
    }

    fn target_at(&self, y: f32) -> Target {
        if y < self.chart_height() { Target::Chart } else { Target::Strip }
    }

    fn chart_pointer(&mut self, (x, y): (f32, f32)) {
        let point = self.view.pointer_fraction(x, y);
        self.controller.chart_interaction_begin(point);
        self.pump();
    }

    fn range_event(&mut self, event: Option<RangeEvent>) {
        match event {
            Some(RangeEvent::Changed { range, finished }) => {
                debug!(lower = range.lower, upper = range.upper, finished, "range control moved");
                self.controller.update_chart_range(range);
            }
            Some(RangeEvent::TouchedOutside) => self.controller.cancel_chart_interaction(),
            None => {}
        }
        self.pump();
    }

    fn key(&mut self, key: VirtualKeyCode) -> Result<()> {
        match key {
            VirtualKeyCode::Key1 => self.switch(ChartKind::TwoAxisLines)?,
            VirtualKeyCode::Key2 => self.switch(ChartKind::StackedBars)?,
            VirtualKeyCode::Key3 => self.switch(ChartKind::Percent)?,
            VirtualKeyCode::N => {
                self.theme = theme::find(if self.theme.name == "day" { "night" } else { "day" });
                let theme = self.theme;
                self.controller.apply_theme(theme, true);
                self.view.set_options(self.view.options().with_theme(&theme));
                self.strip.set_background(theme.background);
                self.strip.control_mut().apply_theme(&theme, ANIMATION);
            }
            VirtualKeyCode::V => {
                let mut visibility = self.controller.visibility().to_vec();
                if let Some(first) = visibility.first_mut() {
                    *first = !*first;
                }
                self.controller.update_charts_visibility(visibility)?;
            }
            VirtualKeyCode::Back => {
                self.controller.zoom_out();
            }
            _ => {}
        }
        self.pump();
        Ok(())
    }

    fn switch(&mut self, kind: ChartKind) -> Result<()> {
        info!(kind = kind.name(), "switching chart");
        self.controller = kind.build(sample_data()?, ChartConfig::default(), self.theme)?;
        let (view, strip) = Self::views(self.width, self.height, &self.theme);
        self.view = view;
        self.strip = strip;
        self.attach();
        Ok(())
    }

    /// Apply controller events to the host widgets.
    fn pump(&mut self) {
        for event in self.controller.drain_events() {
            match event {
                ControllerEvent::RangeChanged { fraction, animated } => {
                    let duration = if animated { ANIMATION } else { Duration::ZERO };
                    self.strip.control_mut().set_range(fraction, duration);
                }
                ControllerEvent::TitleChanged { title, .. } => self.view.set_title(Some(title)),
                ControllerEvent::RangePagingChanged { enabled, page_size } => {
                    self.strip.control_mut().set_paging(enabled, page_size);
                }
                ControllerEvent::ZoomInRequested { ticket, timestamp } => {
                    let detail = hourly_detail(&self.controller.core().collection, timestamp).ok();
                    self.controller.complete_zoom_in(ticket, detail);
                }
                other => debug!(?other, "controller event"),
            }
        }
    }

    /// Advance animations; true when something must be redrawn.
    fn tick(&mut self, dt: Duration) -> bool {
        let views = self.controller.tick(dt);
        let strip = self.strip.control_mut().tick(dt);
        self.pump();
        !views.is_empty() || strip
    }

    fn present(&self, surface: &mut softbuffer::Surface) -> Result<()> {
        let (w, h) = (self.width.max(1), self.height.max(1));
        let (nw, nh) = (NonZeroU32::new(w).context("zero width")?, NonZeroU32::new(h).context("zero height")?);
        surface.resize(nw, nh).map_err(|e| anyhow::anyhow!("resize: {e}"))?;

        let (chart, cw, ch, chart_stride) = self.view.render_to_rgba8(self.controller.as_ref())?;
        let (strip, sw, sh, strip_stride) = self.strip.render_to_rgba8(self.controller.as_ref())?;
        let mut frame = surface.buffer_mut().map_err(|e| anyhow::anyhow!("buffer: {e}"))?;
        blit(&mut frame, w as usize, h as usize, &chart, chart_stride, cw, ch, 0);
        blit(&mut frame, w as usize, h as usize, &strip, strip_stride, sw, sh, ch as usize);
        frame.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
        Ok(())
    }
}

/// Copy an RGBA8 image into the 0RGB window buffer starting at row `top`.
#[allow(clippy::too_many_arguments)]
fn blit(frame: &mut [u32], width: usize, height: usize, rgba: &[u8], stride: usize, rw: u32, rh: u32, top: usize) {
    for y in 0..rh as usize {
        let row = top + y;
        if row >= height {
            break;
        }
        for x in 0..(rw as usize).min(width) {
            let px = &rgba[y * stride + x * 4..y * stride + x * 4 + 4];
            frame[row * width + x] = ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32;
        }
    }
}

fn sample_data() -> Result<SeriesCollection> {
    // 2019-01-01 00:00 UTC
    let start = 1_546_300_800.0;
    let days = 180;
    let ts: Vec<f64> = (0..days).map(|d| start + d as f64 * DAY).collect();
    let joined = (0..days).map(|d| 1200.0 + 400.0 * (d as f64 / 9.0).sin() + 3.0 * d as f64).collect();
    let left = (0..days).map(|d| 300.0 + 120.0 * (d as f64 / 5.0).cos()).collect();
    Ok(SeriesCollection::new(
        ts,
        vec![
            Series::new("Joined", Color::from_rgb(0x3c, 0xc2, 0x3f), joined),
            Series::new("Left", Color::from_rgb(0xf3, 0x4c, 0x44), left),
        ],
    )?)
}

/// Hourly detail for the day at `timestamp`, interpolated from the daily samples.
fn hourly_detail(daily: &SeriesCollection, timestamp: f64) -> Result<SeriesCollection> {
    let index = daily.closest_index(timestamp).context("empty collection")?;
    let next = (index + 1).min(daily.len() - 1);
    let ts: Vec<f64> = (0..24).map(|h| timestamp + h as f64 * HOUR).collect();
    let series = daily
        .series()
        .iter()
        .map(|s| {
            let (a, b) = (s.values[index], s.values[next]);
            let values = (0..24).map(|h| ((a + (b - a) * h as f64 / 24.0) / 24.0).max(0.0)).collect();
            Series::new(s.name.clone(), s.color, values)
        })
        .collect();
    Ok(SeriesCollection::new(ts, series)?)
}
