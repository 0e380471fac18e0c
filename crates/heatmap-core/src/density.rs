// File: crates/heatmap-core/src/density.rs
// Summary: Narrow interface to the density-map renderer that turns weighted points into a color field.

use crate::color::Rgb;
use crate::config::RendererKind;
use crate::error::Result;
use crate::surface::DrawingSurface;
use crate::types::{Point, ValueRange};

/// Lowest shadow alpha a point is drawn with, so minimum values stay visible.
pub const MIN_SHADOW_ALPHA: f32 = 0.01;

#[derive(Clone, Debug, PartialEq)]
pub struct DensityConfig {
    pub width: u32,
    pub height: u32,
    pub radius: u32,
    /// Alpha of every colored pixel, 0..=1.
    pub opacity: f32,
    /// 0 gives hard-edged blobs, 1 fades from the center.
    pub blur: f32,
    /// `None` leaves the surface transparent.
    pub background: Option<Rgb>,
    pub renderer: RendererKind,
}

#[derive(Clone, Copy, Debug)]
pub struct DensityData<'a> {
    pub min: f64,
    pub max: f64,
    pub data: &'a [Point],
}

impl<'a> DensityData<'a> {
    pub fn new(range: ValueRange, data: &'a [Point]) -> Self {
        Self { min: range.min, max: range.max, data }
    }
    pub fn range(&self) -> ValueRange { ValueRange::new(self.min, self.max) }
}

/// Factory for renderer instances.
pub trait DensityRenderer {
    type Instance: DensityInstance;

    /// Fails with `MissingHostCapability` when the requested renderer is unavailable.
    /// A zero-sized config is allowed; the instance then reports a zero surface size.
    fn create(&self, config: &DensityConfig) -> Result<Self::Instance>;
}

pub trait DensityInstance {
    /// Re-apply configuration, resizing the drawing surface.
    fn configure(&mut self, config: &DensityConfig);
    fn surface_size(&self) -> (u32, u32);
    /// Replace the drawn points. Fails with `SurfaceNotReady` on a zero-sized surface.
    fn set_data(&mut self, data: &DensityData<'_>) -> Result<()>;
    /// Encoded image drawn beneath the density field; `None` removes it.
    fn set_background_image(&mut self, encoded: Option<&[u8]>) -> Result<()>;
    /// Surface holding the last drawn frame, for overlays.
    fn surface(&mut self) -> Option<&mut dyn DrawingSurface>;
}

/// Shadow alpha of a point: its position in the range, floored at [`MIN_SHADOW_ALPHA`].
pub fn shadow_alpha(value: f64, range: ValueRange) -> f32 {
    (range.normalize(value) as f32).max(MIN_SHADOW_ALPHA)
}
