// File: crates/heatmap-core/src/raster.rs
// Summary: Skia CPU raster backend: drawing surface plus a radial-splat density renderer.

use skia_safe as skia;
use tracing::debug;

use crate::color::{Gradient, Rgb};
use crate::config::RendererKind;
use crate::density::{shadow_alpha, DensityConfig, DensityData, DensityInstance, DensityRenderer};
use crate::error::{HeatMapError, Result};
use crate::surface::{DrawingSurface, TextAlign, TextBaseline, TextState};
use crate::text::TextShaper;

/// Raster surface with canvas-context style text state.
pub struct SkiaSurface {
    surface: skia::Surface,
    width: u32,
    height: u32,
    shaper: TextShaper,
    state: TextState,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let surface = raster_surface(width, height)?;
        Ok(Self {
            surface,
            width,
            height,
            shaper: TextShaper::new(),
            state: TextState::default(),
        })
    }

    pub fn canvas(&mut self) -> &skia::Canvas {
        self.surface.canvas()
    }

    /// Fill with `color`, or make fully transparent.
    pub fn clear(&mut self, color: Option<Rgb>) {
        let c = color.map(Rgb::to_skia).unwrap_or(skia::Color::TRANSPARENT);
        self.surface.canvas().clear(c);
    }

    pub fn image_snapshot(&mut self) -> skia::Image {
        self.surface.image_snapshot()
    }

    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| HeatMapError::Render("encode PNG failed".into()))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Unpremultiplied RGBA8 pixels as `(pixels, width, height, stride)`.
    pub fn to_rgba8(&mut self) -> Result<(Vec<u8>, u32, u32, usize)> {
        let px = read_rgba(&mut self.surface, self.width, self.height)?;
        Ok((px, self.width, self.height, self.width as usize * 4))
    }
}

impl DrawingSurface for SkiaSurface {
    fn set_font(&mut self, size_px: f32, family: &str) {
        self.state.font_px = size_px;
        self.state.family = family.to_string();
    }
    fn set_text_align(&mut self, align: TextAlign) { self.state.align = align; }
    fn set_text_baseline(&mut self, baseline: TextBaseline) { self.state.baseline = baseline; }
    fn set_fill_color(&mut self, color: Rgb) { self.state.fill = color; }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let st = &self.state;
        let canvas = self.surface.canvas();
        self.shaper.draw_anchored(canvas, text, x, y, st.font_px, st.fill.to_skia(), &st.family, st.align, st.baseline);
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let mut paint = skia::Paint::default();
        paint.set_blend_mode(skia::BlendMode::Clear);
        self.surface.canvas().draw_rect(skia::Rect::from_xywh(x, y, width, height), &paint);
    }

    fn backing_size(&self) -> (u32, u32) { (self.width, self.height) }
}

/// Creates [`SkiaDensityInstance`]s; only the `canvas2d` renderer kind is available.
#[derive(Clone, Debug)]
pub struct SkiaDensityRenderer {
    gradient: Gradient,
}

impl Default for SkiaDensityRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkiaDensityRenderer {
    pub fn new() -> Self {
        Self { gradient: Gradient::density() }
    }
}

impl DensityRenderer for SkiaDensityRenderer {
    type Instance = SkiaDensityInstance;

    fn create(&self, config: &DensityConfig) -> Result<SkiaDensityInstance> {
        if let RendererKind::Other(kind) = &config.renderer {
            return Err(HeatMapError::MissingHostCapability(format!("renderer '{kind}' is not available")));
        }
        let mut instance = SkiaDensityInstance {
            config: config.clone(),
            shadow: None,
            output: None,
            background_image: None,
            palette: self.gradient.palette(),
        };
        instance.configure(config);
        Ok(instance)
    }
}

/// Two surfaces: an alpha "shadow" accumulating radial splats, and the
/// colorized output that overlays are drawn on.
pub struct SkiaDensityInstance {
    config: DensityConfig,
    shadow: Option<skia::Surface>,
    output: Option<SkiaSurface>,
    background_image: Option<skia::Image>,
    palette: [Rgb; 256],
}

impl SkiaDensityInstance {
    pub fn output(&mut self) -> Option<&mut SkiaSurface> {
        self.output.as_mut()
    }

    fn paint_background(&mut self) {
        let Some(out) = self.output.as_mut() else { return };
        out.clear(self.config.background);
        if let Some(img) = &self.background_image {
            let dst = skia::Rect::from_wh(out.width as f32, out.height as f32);
            out.canvas().draw_image_rect(img, None, dst, &skia::Paint::default());
        }
    }
}

impl DensityInstance for SkiaDensityInstance {
    fn configure(&mut self, config: &DensityConfig) {
        let resized = (config.width, config.height) != self.surface_size() || self.output.is_none();
        self.config = config.clone();
        if resized {
            // zero-sized configs leave both surfaces unallocated
            self.shadow = raster_surface(config.width, config.height).ok();
            self.output = SkiaSurface::new(config.width, config.height).ok();
            debug!(width = config.width, height = config.height, ready = self.output.is_some(), "density surfaces allocated");
        }
        self.paint_background();
    }

    fn surface_size(&self) -> (u32, u32) {
        match &self.output {
            Some(out) => (out.width, out.height),
            None => (0, 0),
        }
    }

    fn set_data(&mut self, data: &DensityData<'_>) -> Result<()> {
        let (w, h) = (self.config.width, self.config.height);
        let Some(shadow) = self.shadow.as_mut() else {
            return Err(HeatMapError::SurfaceNotReady { width: w, height: h });
        };

        let range = data.range();
        let radius = self.config.radius.max(1) as f32;
        let inner = (1.0 - self.config.blur).clamp(0.0, 0.999);
        let colors = [skia::Color::from_argb(255, 0, 0, 0), skia::Color::from_argb(0, 0, 0, 0)];
        let stops = [inner, 1.0];

        let canvas = shadow.canvas();
        canvas.clear(skia::Color::TRANSPARENT);
        for p in data.data {
            let Some(shader) = skia::Shader::radial_gradient(
                (p.x, p.y),
                radius,
                &colors[..],
                Some(&stops[..]),
                skia::TileMode::Clamp,
                None,
                None,
            ) else {
                continue;
            };
            let mut paint = skia::Paint::default();
            paint.set_anti_alias(true);
            paint.set_shader(shader);
            paint.set_alpha_f(shadow_alpha(p.value, range));
            canvas.draw_circle((p.x, p.y), radius, &paint);
        }

        let shadow_px = read_rgba(shadow, w, h)?;
        let fixed_alpha = (self.config.opacity * 255.0).round() as u8;
        let mut colored = vec![0u8; shadow_px.len()];
        for (src, dst) in shadow_px.chunks_exact(4).zip(colored.chunks_exact_mut(4)) {
            let a = src[3];
            if a == 0 {
                continue;
            }
            let c = self.palette[a as usize];
            dst.copy_from_slice(&[c.r, c.g, c.b, if fixed_alpha > 0 { fixed_alpha } else { a }]);
        }

        let stride = w as usize * 4;
        let image = skia::images::raster_from_data(&rgba_info(w, h), skia::Data::new_copy(&colored), stride)
            .ok_or_else(|| HeatMapError::Render("density image creation failed".into()))?;

        self.paint_background();
        if let Some(out) = self.output.as_mut() {
            out.canvas().draw_image(&image, (0.0, 0.0), None);
        }
        debug!(points = data.data.len(), min = data.min, max = data.max, "density field drawn");
        Ok(())
    }

    fn set_background_image(&mut self, encoded: Option<&[u8]>) -> Result<()> {
        self.background_image = match encoded {
            Some(bytes) => Some(
                skia::Image::from_encoded(skia::Data::new_copy(bytes))
                    .ok_or_else(|| HeatMapError::Image("unsupported or corrupt image data".into()))?,
            ),
            None => None,
        };
        Ok(())
    }

    fn surface(&mut self) -> Option<&mut dyn DrawingSurface> {
        self.output.as_mut().map(|s| s as &mut dyn DrawingSurface)
    }
}

// ---- helpers ----------------------------------------------------------------

fn raster_surface(width: u32, height: u32) -> Result<skia::Surface> {
    if width == 0 || height == 0 {
        return Err(HeatMapError::SurfaceNotReady { width, height });
    }
    skia::surfaces::raster_n32_premul((width as i32, height as i32))
        .ok_or_else(|| HeatMapError::Render(format!("failed to create {width}x{height} raster surface")))
}

fn rgba_info(width: u32, height: u32) -> skia::ImageInfo {
    skia::ImageInfo::new(
        (width as i32, height as i32),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    )
}

fn read_rgba(surface: &mut skia::Surface, width: u32, height: u32) -> Result<Vec<u8>> {
    let stride = width as usize * 4;
    let mut px = vec![0u8; stride * height as usize];
    if !surface.read_pixels(&rgba_info(width, height), &mut px, stride, (0, 0)) {
        return Err(HeatMapError::Render("read_pixels failed".into()));
    }
    Ok(px)
}
