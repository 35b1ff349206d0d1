// File: crates/trendline-core/src/render/mod.rs
// Summary: Renderer capability trait, shared animated renderer state and drawing helpers.
// Notes:
// - `render` is a pure read of the animated state; every mutation happens in
//   setters or in `tick`, which the owning controller calls once per frame.
// - A renderer knows which views it is attached to only so the owner can tell
//   hosts what to redraw; drawing works the same with zero attachments.

use std::time::Duration;

use skia_safe as skia;

use crate::animation::ValueAnimator;
use crate::geometry::{Rect, ValueRange};
use crate::scale::Projection;
use crate::text::TextShaper;
use crate::types::{ContainerSet, ViewId};

pub mod bars;
pub mod details;
pub mod lines;
pub mod markers;
pub mod percent;
pub mod scales;

pub use bars::{BarComponent, BarsRenderer};
pub use details::{DetailsRenderer, DetailsRow, DetailsViewModel};
pub use lines::{LineData, LinesRenderer};
pub use markers::{Bullet, BulletsRenderer, VerticalLineRenderer};
pub use percent::PercentRenderer;
pub use scales::{AnimatedLabels, HorizontalScalesRenderer, VerticalScalesRenderer};

/// Everything a renderer needs to draw one frame.
pub struct DrawContext<'a> {
    pub canvas: &'a skia::Canvas,
    pub text: &'a TextShaper,
}

/// Animated ranges, overall visibility and attachments common to all renderers.
#[derive(Clone, Debug)]
pub struct RendererState {
    pub horizontal: ValueAnimator<ValueRange>,
    pub vertical: ValueAnimator<ValueRange>,
    pub alpha: ValueAnimator<f64>,
    /// Disabled renderers skip drawing without fading.
    pub enabled: bool,
    pub containers: ContainerSet,
}

impl Default for RendererState {
    fn default() -> Self {
        Self {
            horizontal: ValueAnimator::new(ValueRange::unit()),
            vertical: ValueAnimator::new(ValueRange::unit()),
            alpha: ValueAnimator::new(1.0),
            enabled: true,
            containers: ContainerSet::default(),
        }
    }
}

impl RendererState {
    /// Projection of the current animated ranges onto `frame`.
    pub fn projection(&self, frame: Rect) -> Projection {
        Projection::new(frame, self.horizontal.current(), self.vertical.current())
    }

    /// Whether drawing would produce anything at all.
    pub fn is_drawable(&self) -> bool {
        self.enabled && self.alpha.current() > 0.0
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        let h = self.horizontal.tick(dt);
        let v = self.vertical.tick(dt);
        let a = self.alpha.tick(dt);
        h || v || a
    }
}

/// Drawable chart layer driven by animated ranges.
pub trait ChartRenderer {
    fn state(&self) -> &RendererState;
    fn state_mut(&mut self) -> &mut RendererState;

    /// Advance renderer-specific animators. Returns true when any value moved.
    fn tick_content(&mut self, dt: Duration) -> bool;

    /// Draw into `bounds` (whole view) with data mapped into `chart_frame`.
    fn render(&self, ctx: &DrawContext<'_>, bounds: Rect, chart_frame: Rect);

    /// Advance every animator this renderer owns exactly once.
    fn tick(&mut self, dt: Duration) -> bool {
        let common = self.state_mut().tick(dt);
        let content = self.tick_content(dt);
        common || content
    }

    fn set_horizontal_range(&mut self, range: ValueRange, duration: Duration) {
        self.state_mut().horizontal.animate(range, duration);
    }

    fn set_vertical_range(&mut self, range: ValueRange, duration: Duration) {
        self.state_mut().vertical.animate(range, duration);
    }

    /// Fade the whole renderer in or out.
    fn set_visible(&mut self, visible: bool, duration: Duration) {
        self.state_mut().alpha.animate(if visible { 1.0 } else { 0.0 }, duration);
    }

    /// Target visibility (not the faded amount).
    fn is_visible(&self) -> bool {
        self.state().alpha.end() > 0.0
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.state_mut().enabled = enabled;
    }

    fn attach(&mut self, view: ViewId) {
        self.state_mut().containers.attach(view);
    }

    fn detach(&mut self, view: ViewId) {
        self.state_mut().containers.detach(view);
    }

    fn containers(&self) -> &ContainerSet {
        &self.state().containers
    }
}

// ---- helpers ----------------------------------------------------------------

/// Fade `alpha` toward shown or hidden; a fade already heading there is left alone.
pub(crate) fn fade_to(alpha: &mut ValueAnimator<f64>, visible: bool, duration: Duration) {
    let target = if visible { 1.0 } else { 0.0 };
    if alpha.end() != target {
        alpha.animate(target, duration);
    }
}

/// `color` with its alpha multiplied by `factor` (clamped to `[0, 1]`).
pub fn with_alpha(color: skia::Color, factor: f64) -> skia::Color {
    let a = (color.a() as f64 * factor.clamp(0.0, 1.0)).round() as u8;
    color.with_a(a)
}

pub fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

pub fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

/// Index window `[first, last]` of items sorted by `key` covering `range`,
/// widened by one item on each side so segments crossing the frame edge are kept.
pub fn visible_window<T>(items: &[T], key: impl Fn(&T) -> f64, range: ValueRange) -> Option<(usize, usize)> {
    if items.is_empty() {
        return None;
    }
    let first = items.partition_point(|i| key(i) < range.lower).saturating_sub(1);
    let last = items.partition_point(|i| key(i) <= range.upper).min(items.len() - 1);
    if first > last { None } else { Some((first, last)) }
}

/// Clip region for series drawing: the frame columns over the full view height.
pub(crate) fn series_clip(bounds: Rect, chart_frame: Rect) -> skia::Rect {
    skia::Rect::from_ltrb(chart_frame.left, bounds.top, chart_frame.right, bounds.bottom)
}
