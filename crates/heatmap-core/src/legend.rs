// File: crates/heatmap-core/src/legend.rs
// Summary: Legend strip interpolation: evenly spaced values, blue-to-red colors and x positions.

use crate::color::Rgb;
use crate::types::ValueRange;

/// Smallest legend sample count; lower requests fall back to it.
pub const MIN_LEGEND_COUNT: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendEntry {
    /// Position in [0, 1] along the strip.
    pub fraction: f64,
    pub value: f64,
    pub color: Rgb,
    pub x: f32,
}

/// Entries for a legend strip of `canvas_width` display pixels.
pub fn build_legend(range: ValueRange, count: usize, canvas_width: f32, margin: f32) -> Vec<LegendEntry> {
    build_legend_scaled(range, count, canvas_width, margin, 1.0)
}

/// Same as [`build_legend`], with x multiplied by `pixel_ratio` for a canvas
/// whose backing store differs from its display size.
pub fn build_legend_scaled(
    range: ValueRange,
    count: usize,
    canvas_width: f32,
    margin: f32,
    pixel_ratio: f32,
) -> Vec<LegendEntry> {
    let count = count.max(MIN_LEGEND_COUNT);
    let last = (count - 1) as f64;
    (0..count)
        .map(|j| {
            let fraction = j as f64 / last;
            let value = range.min + fraction * (range.max - range.min);
            let x = (margin + fraction as f32 * (canvas_width - 2.0 * margin)) * pixel_ratio;
            LegendEntry { fraction, value, color: legend_color(fraction), x }
        })
        .collect()
}

/// Blue `(0,0,255)` at 0 to red `(255,0,0)` at 1.
pub fn legend_color(fraction: f64) -> Rgb {
    Rgb::lerp(Rgb::BLUE, Rgb::RED, fraction)
}

/// Backing-store pixels per display pixel; 1 when nothing is displayed yet.
pub fn pixel_ratio(backing_width: u32, display_width: u32) -> f32 {
    if display_width > 0 { backing_width as f32 / display_width as f32 } else { 1.0 }
}

/// Fixed-point text with `decimals` digits, ties rounded away from zero.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let scale = 10f64.powi(decimals.min(20) as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return format!("{:.*}", decimals, value);
    }
    format!("{:.*}", decimals, scaled.round() / scale)
}
