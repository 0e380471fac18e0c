// File: crates/heatmap-core/src/types.rs
// Summary: Shared types and constants (container sizes, points, value ranges).

/// Default container width in pixels for headless rendering.
pub const WIDTH: u32 = 640;
/// Default container height in pixels for headless rendering.
pub const HEIGHT: u32 = 480;
/// Height of the legend strip below the heat map.
pub const LEGEND_HEIGHT: u32 = 20;
/// Horizontal inset of the first and last legend label.
pub const LEGEND_MARGIN: f32 = 40.0;

/// Pixel size of the panel hosting the heat map.
/// Read fresh on every pass since the panel may be resized between messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Weighted point in container pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub value: f64,
    pub label: Option<String>,
}

/// Value range handed to the density renderer and the legend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
    pub fn span(&self) -> f64 { self.max - self.min }

    /// Position of `v` inside the range, clamped to [0, 1].
    pub fn normalize(&self, v: f64) -> f64 {
        let span = self.span();
        if span.abs() < 1e-12 || span.is_nan() {
            return if v >= self.max { 1.0 } else { 0.0 };
        }
        ((v - self.min) / span).clamp(0.0, 1.0)
    }
}
