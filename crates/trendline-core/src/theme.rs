// File: crates/trendline-core/src/theme.rs
// Summary: Day/Night color themes applied to renderers and the range control.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    /// Horizontal gridlines of line charts.
    pub helper_lines: skia::Color,
    /// Frame baseline and the vertical marker.
    pub strong_lines: skia::Color,
    /// Gridlines drawn over bars and percentage bands.
    pub bar_strong_lines: skia::Color,
    pub labels: skia::Color,
    pub title: skia::Color,
    pub details_background: skia::Color,
    pub details_text: skia::Color,
    pub details_arrow: skia::Color,
    /// Tint over the part of the overview strip outside the selection.
    pub range_tint: skia::Color,
    pub range_frame: skia::Color,
    pub range_thumb_arrow: skia::Color,
}

impl Theme {
    pub fn day() -> Self {
        Self {
            name: "day",
            background: skia::Color::from_argb(255, 255, 255, 255),
            helper_lines: skia::Color::from_argb(26, 24, 45, 59),
            strong_lines: skia::Color::from_argb(50, 24, 45, 59),
            bar_strong_lines: skia::Color::from_argb(128, 255, 255, 255),
            labels: skia::Color::from_argb(255, 142, 142, 147),
            title: skia::Color::from_argb(255, 0, 0, 0),
            details_background: skia::Color::from_argb(255, 244, 244, 249),
            details_text: skia::Color::from_argb(255, 109, 109, 114),
            details_arrow: skia::Color::from_argb(255, 197, 199, 205),
            range_tint: skia::Color::from_argb(153, 226, 238, 249),
            range_frame: skia::Color::from_argb(255, 192, 209, 225),
            range_thumb_arrow: skia::Color::from_argb(255, 255, 255, 255),
        }
    }

    pub fn night() -> Self {
        Self {
            name: "night",
            background: skia::Color::from_argb(255, 36, 47, 62),
            helper_lines: skia::Color::from_argb(26, 255, 255, 255),
            strong_lines: skia::Color::from_argb(50, 255, 255, 255),
            bar_strong_lines: skia::Color::from_argb(128, 36, 47, 62),
            labels: skia::Color::from_argb(153, 186, 204, 225),
            title: skia::Color::from_argb(255, 255, 255, 255),
            details_background: skia::Color::from_argb(255, 25, 33, 45),
            details_text: skia::Color::from_argb(255, 255, 255, 255),
            details_arrow: skia::Color::from_argb(255, 216, 216, 216),
            range_tint: skia::Color::from_argb(153, 48, 66, 89),
            range_frame: skia::Color::from_argb(255, 86, 98, 109),
            range_thumb_arrow: skia::Color::from_argb(255, 255, 255, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::day()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::day(), Theme::night()]
}

/// Find a theme by its `name`, falling back to day.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::day()
}
