// File: crates/trendline-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, time units, view ids).

/// Default surface width in pixels.
pub const WIDTH: i32 = 720;
/// Default surface height in pixels.
pub const HEIGHT: i32 = 420;

/// Seconds per hour / day on the timestamp axis (unix seconds).
pub const HOUR: f64 = 3_600.0;
pub const DAY: f64 = 86_400.0;

/// Screen margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    /// Room for the title strip on top and the date labels below.
    fn default() -> Self {
        Self::new(16, 16, 40, 35)
    }
}

/// Identity of a canvas host a renderer can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

/// Set of views a renderer is currently attached to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerSet {
    views: Vec<ViewId>,
}

impl ContainerSet {
    pub fn attach(&mut self, id: ViewId) {
        if !self.views.contains(&id) {
            self.views.push(id);
        }
    }
    pub fn detach(&mut self, id: ViewId) {
        self.views.retain(|v| *v != id);
    }
    pub fn contains(&self, id: ViewId) -> bool { self.views.contains(&id) }
    pub fn is_empty(&self) -> bool { self.views.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = ViewId> + '_ { self.views.iter().copied() }
}
