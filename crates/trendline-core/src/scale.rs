// File: crates/trendline-core/src/scale.rs
// Summary: Linear projection between (time, value) ranges and content-frame pixels.

use crate::geometry::{Rect, ValueRange};

/// Logical X coordinate (unix seconds).
pub type Logical = f64;
/// Value Y coordinate.
pub type Value = f64;

/// Mapping between data space and screen space for one axis pair.
pub trait ScaleTransform {
    fn to_screen_x(&self, x: Logical) -> f32;
    fn to_screen_y(&self, y: Value) -> f32;
}

/// Horizontal range maps onto `frame.left..frame.right`, vertical range onto
/// `frame.bottom..frame.top` (values grow upwards).
/// Degenerate ranges are widened to `MIN_SPAN` before dividing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub frame: Rect,
    pub horizontal: ValueRange,
    pub vertical: ValueRange,
}

impl Projection {
    pub fn new(frame: Rect, horizontal: ValueRange, vertical: ValueRange) -> Self {
        Self { frame, horizontal, vertical }
    }

    /// Whether `px` lies within the frame columns, widened by `slack` on both sides.
    pub fn is_x_visible(&self, px: f32, slack: f32) -> bool {
        px >= self.frame.left - slack && px <= self.frame.right + slack
    }
}

impl ScaleTransform for Projection {
    #[inline]
    fn to_screen_x(&self, x: Logical) -> f32 {
        self.frame.left + self.horizontal.fraction_of(x) as f32 * self.frame.width()
    }
    #[inline]
    fn to_screen_y(&self, y: Value) -> f32 {
        self.frame.bottom - self.vertical.fraction_of(y) as f32 * self.frame.height()
    }
}
