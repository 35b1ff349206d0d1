// File: crates/trendline-core/src/chart.rs
// Summary: Canvas hosts: chart view and range selection view, with headless PNG/RGBA output via Skia raster surfaces.

use anyhow::Result;
use skia_safe as skia;

use crate::controller::{ChartComponent, Layer};
use crate::geometry::{Point, Rect};
use crate::range_selection::RangeSelection;
use crate::render::{ChartRenderer, DrawContext};
use crate::text::{TextAnchor, TextShaper, TextWeight};
use crate::theme::Theme;
use crate::types::{Insets, ViewId, HEIGHT, WIDTH};

const TITLE_FONT_SIZE: f32 = 15.0;

/// Size, margins and colors of one canvas host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub background: skia::Color,
    pub title_color: skia::Color,
}

impl Default for ViewOptions {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            background: theme.background,
            title_color: theme.title,
        }
    }
}

impl ViewOptions {
    pub fn with_theme(mut self, theme: &Theme) -> Self {
        self.background = theme.background;
        self.title_color = theme.title;
        self
    }
}

/// Main chart host. Owns no chart state; it draws the renderers it is handed.
pub struct ChartView {
    id: ViewId,
    options: ViewOptions,
    title: Option<String>,
    text: TextShaper,
}

impl ChartView {
    pub fn new(id: ViewId, options: ViewOptions) -> Self {
        Self { id, options, title: None, text: TextShaper::new() }
    }

    pub fn id(&self) -> ViewId { self.id }
    pub fn options(&self) -> &ViewOptions { &self.options }

    pub fn set_options(&mut self, options: ViewOptions) {
        self.options = options;
    }

    /// Title drawn in the top inset.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(0.0, 0.0, self.options.width as f32, self.options.height as f32)
    }

    /// Bounds minus insets, never smaller than one pixel.
    pub fn chart_frame(&self) -> Rect {
        content_frame(self.bounds(), self.options.insets)
    }

    /// Pixel position to a fraction of the chart frame, clamped to `[0, 1]`.
    pub fn pointer_fraction(&self, x: f32, y: f32) -> Point {
        let f = self.chart_frame();
        Point::new(((x - f.left) / f.width()).clamp(0.0, 1.0), ((y - f.top) / f.height()).clamp(0.0, 1.0))
    }

    /// Register this view with `layer` of `controller` and hand it the view geometry.
    pub fn attach(&self, controller: &mut dyn ChartComponent, layer: Layer) {
        controller.attach(layer, self.id);
        if layer == Layer::Main {
            controller.set_frames(self.bounds(), self.chart_frame());
        }
    }

    pub fn detach(&self, controller: &mut dyn ChartComponent, layer: Layer) {
        controller.detach(layer, self.id);
    }

    /// Clear, then draw `renderers` in order.
    pub fn draw(&self, canvas: &skia::Canvas, renderers: &[&dyn ChartRenderer]) {
        canvas.clear(self.options.background);
        let bounds = self.bounds();
        let frame = self.chart_frame();
        let ctx = DrawContext { canvas, text: &self.text };
        for r in renderers {
            r.render(&ctx, bounds, frame);
        }
        if let Some(title) = self.title.as_deref() {
            let baseline = (self.options.insets.top as f32 * 0.6).max(TITLE_FONT_SIZE);
            self.text.draw(
                canvas,
                title,
                bounds.width() / 2.0,
                baseline,
                TITLE_FONT_SIZE,
                self.options.title_color,
                TextAnchor::Center,
                TextWeight::Bold,
            );
        }
    }

    /// Render the main layer of `controller` to a PNG at `output_png_path`.
    pub fn render_to_png(&self, controller: &dyn ChartComponent, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let data = self.png_bytes(controller)?;
        write_png(output_png_path, &data)
    }

    pub fn png_bytes(&self, controller: &dyn ChartComponent) -> Result<Vec<u8>> {
        let renderers = controller.renderers(Layer::Main);
        let mut surface = raster_surface(self.options.width, self.options.height)?;
        self.draw(surface.canvas(), &renderers);
        encode_png(&mut surface)
    }

    /// RGBA8 pixels, width, height and row stride in bytes.
    pub fn render_to_rgba8(&self, controller: &dyn ChartComponent) -> Result<(Vec<u8>, u32, u32, usize)> {
        let renderers = controller.renderers(Layer::Main);
        let mut surface = raster_surface(self.options.width, self.options.height)?;
        self.draw(surface.canvas(), &renderers);
        read_rgba8(&mut surface)
    }
}

/// Overview strip host: preview renderers under the range selection overlay.
pub struct RangeSelectionView {
    id: ViewId,
    options: ViewOptions,
    control: RangeSelection,
    text: TextShaper,
}

impl RangeSelectionView {
    /// `options.insets` are ignored; the control lays out its own content frame.
    pub fn new(id: ViewId, options: ViewOptions, control: RangeSelection) -> Self {
        let mut control = control;
        control.set_bounds(Rect::from_xywh(0.0, 0.0, options.width as f32, options.height as f32));
        Self { id, options, control, text: TextShaper::new() }
    }

    pub fn id(&self) -> ViewId { self.id }
    pub fn options(&self) -> &ViewOptions { &self.options }
    pub fn control(&self) -> &RangeSelection { &self.control }
    pub fn control_mut(&mut self) -> &mut RangeSelection { &mut self.control }

    pub fn set_background(&mut self, background: skia::Color) {
        self.options.background = background;
    }

    pub fn bounds(&self) -> Rect {
        self.control.bounds()
    }

    pub fn attach(&self, controller: &mut dyn ChartComponent) {
        controller.attach(Layer::Preview, self.id);
    }

    pub fn draw(&self, canvas: &skia::Canvas, renderers: &[&dyn ChartRenderer]) {
        canvas.clear(self.options.background);
        let content = self.control.content_frame();
        let ctx = DrawContext { canvas, text: &self.text };
        canvas.save();
        canvas.clip_rect(content.to_skia(), None, None);
        for r in renderers {
            r.render(&ctx, content, content);
        }
        canvas.restore();
        self.control.render_overlay(canvas);
    }

    pub fn png_bytes(&self, controller: &dyn ChartComponent) -> Result<Vec<u8>> {
        let renderers = controller.renderers(Layer::Preview);
        let mut surface = raster_surface(self.options.width, self.options.height)?;
        self.draw(surface.canvas(), &renderers);
        encode_png(&mut surface)
    }

    pub fn render_to_png(&self, controller: &dyn ChartComponent, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let data = self.png_bytes(controller)?;
        write_png(output_png_path, &data)
    }

    pub fn render_to_rgba8(&self, controller: &dyn ChartComponent) -> Result<(Vec<u8>, u32, u32, usize)> {
        let renderers = controller.renderers(Layer::Preview);
        let mut surface = raster_surface(self.options.width, self.options.height)?;
        self.draw(surface.canvas(), &renderers);
        read_rgba8(&mut surface)
    }
}

// ---- helpers ----------------------------------------------------------------

fn content_frame(bounds: Rect, insets: Insets) -> Rect {
    let left = bounds.left + insets.left as f32;
    let top = bounds.top + insets.top as f32;
    let right = (bounds.right - insets.right as f32).max(left + 1.0);
    let bottom = (bounds.bottom - insets.bottom as f32).max(top + 1.0);
    Rect::from_ltrb(left, top, right, bottom)
}

fn raster_surface(width: i32, height: i32) -> Result<skia::Surface> {
    skia::surfaces::raster_n32_premul((width.max(1), height.max(1)))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))
}

fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

fn read_rgba8(surface: &mut skia::Surface) -> Result<(Vec<u8>, u32, u32, usize)> {
    let (w, h) = (surface.width(), surface.height());
    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        anyhow::bail!("failed to read back surface pixels");
    }
    Ok((pixels, w as u32, h as u32, row_bytes))
}

fn write_png(path: impl AsRef<std::path::Path>, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}
