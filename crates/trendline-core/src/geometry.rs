// File: crates/trendline-core/src/geometry.rs
// Summary: Lightweight geometry helpers for pixel math and closed value ranges.

use skia_safe as skia;

/// Smallest span a range is widened to before it is used as a divisor.
pub const MIN_SPAN: f64 = 1e-9;

/// Closed interval over a time or value domain.
/// Contract: `lower <= upper` (constructors reorder swapped bounds).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub lower: f64,
    pub upper: f64,
}

impl ValueRange {
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b { Self { lower: a, upper: b } } else { Self { lower: b, upper: a } }
    }

    /// The unit range `0...1`, used as the fallback for empty data.
    pub const fn unit() -> Self {
        Self { lower: 0.0, upper: 1.0 }
    }

    #[inline]
    pub fn distance(&self) -> f64 {
        self.upper - self.lower
    }

    /// Distance clamped to `MIN_SPAN`, safe to divide by.
    #[inline]
    pub fn span(&self) -> f64 {
        self.distance().max(MIN_SPAN)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.lower && v <= self.upper
    }

    /// Position of `v` inside the range as a fraction (not clamped).
    #[inline]
    pub fn fraction_of(&self, v: f64) -> f64 {
        (v - self.lower) / self.span()
    }

    /// Absolute value at `fraction` of the range.
    #[inline]
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.lower + fraction * self.distance()
    }

    /// Sub-range described by fractional bounds of this range.
    pub fn sub_range(&self, fraction: ValueRange) -> ValueRange {
        ValueRange::new(self.value_at(fraction.lower), self.value_at(fraction.upper))
    }

    /// `other` expressed as fractions of this range.
    pub fn fraction_range(&self, other: ValueRange) -> ValueRange {
        ValueRange::new(self.fraction_of(other.lower), self.fraction_of(other.upper))
    }

    /// Intersect with `bounds`; falls back to `bounds` when they do not overlap.
    pub fn clamped_to(&self, bounds: ValueRange) -> ValueRange {
        let lower = self.lower.max(bounds.lower);
        let upper = self.upper.min(bounds.upper);
        if lower <= upper { ValueRange { lower, upper } } else { bounds }
    }

    /// Smallest range covering both.
    pub fn union(&self, other: ValueRange) -> ValueRange {
        ValueRange { lower: self.lower.min(other.lower), upper: self.upper.max(other.upper) }
    }
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::unit()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in pixels (origin top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { left: x, top: y, right: x + width, bottom: y + height }
    }
    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
    pub fn is_empty(&self) -> bool { self.width() <= 0.0 || self.height() <= 0.0 }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Point at fractional coordinates inside the rect.
    pub fn point_at(&self, fraction: Point) -> Point {
        Point::new(self.left + fraction.x * self.width(), self.top + fraction.y * self.height())
    }

    pub fn to_skia(self) -> skia::Rect {
        skia::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}
