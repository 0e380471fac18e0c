// File: crates/heatmap-core/src/chart.rs
// Summary: Headless rendering pipeline: one message to PNG/RGBA via the Skia density renderer.

use anyhow::{Context, Result};

use crate::color::Rgb;
use crate::config::{LegendKind, WidgetConfig};
use crate::message::InputMessage;
use crate::raster::{SkiaDensityRenderer, SkiaSurface};
use crate::surface::DrawingSurface;
use crate::types::{ContainerSize, HEIGHT, LEGEND_HEIGHT, WIDTH};
use crate::widget::{Frame, HeatMapWidget, PassOutcome};

pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub legend_height: u32,
    /// Page color behind the heat map and legend strip.
    pub background: Rgb,
    /// Off for pixel snapshots: skips the value overlay and legend text.
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            legend_height: LEGEND_HEIGHT,
            background: Rgb::WHITE,
            draw_labels: true,
        }
    }
}

pub struct HeatMapChart {
    pub config: WidgetConfig,
}

impl HeatMapChart {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config }
    }

    /// Render the message into a surface of `width x (height + legend strip)`.
    pub fn render_surface(&self, msg: &InputMessage, opts: &RenderOptions) -> Result<(SkiaSurface, Frame)> {
        let mut config = self.config.clone();
        if !opts.draw_labels {
            config.grid_type = Some("none".into());
            config.show_values = None;
            config.legend_type = Some("none".into());
            config.show_legend = None;
        }
        let with_legend = config.legend_kind() == LegendKind::Vals && opts.legend_height > 0;

        let mut legend = if with_legend { Some(SkiaSurface::new(opts.width, opts.legend_height)?) } else { None };
        let mut widget = HeatMapWidget::new(SkiaDensityRenderer::new());
        let container = ContainerSize::new(opts.width, opts.height);
        let outcome = widget
            .on_data(&config, msg, container, legend.as_mut().map(|s| s as &mut dyn DrawingSurface))
            .context("heat map pass failed")?;
        let frame = match outcome {
            PassOutcome::Rendered(frame) => frame,
            PassOutcome::Skipped { width, height } => anyhow::bail!("heat map skipped: surface is {width}x{height}"),
        };

        let heat = widget
            .instance_mut()
            .and_then(|i| i.output())
            .map(|s| s.image_snapshot())
            .ok_or_else(|| anyhow::anyhow!("renderer produced no surface"))?;

        let legend_h = if with_legend { opts.legend_height } else { 0 };
        let mut out = SkiaSurface::new(opts.width, opts.height + legend_h)?;
        out.clear(Some(opts.background));
        out.canvas().draw_image(&heat, (0.0, 0.0), None);
        if let Some(l) = legend.as_mut() {
            let img = l.image_snapshot();
            out.canvas().draw_image(&img, (0.0, opts.height as f32), None);
        }
        tracing::debug!(points = frame.points.len(), legend = frame.legend.len(), "chart composed");
        Ok((out, frame))
    }

    pub fn render_to_png_bytes(&self, msg: &InputMessage, opts: &RenderOptions) -> Result<Vec<u8>> {
        let (mut surface, _) = self.render_surface(msg, opts)?;
        Ok(surface.encode_png()?)
    }

    /// Render the heat map to a PNG at `output_png_path`.
    pub fn render_to_png(
        &self,
        msg: &InputMessage,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(msg, opts)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Returns `(pixels, width, height, stride)` in unpremultiplied RGBA8.
    pub fn render_to_rgba8(&self, msg: &InputMessage, opts: &RenderOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let (mut surface, _) = self.render_surface(msg, opts)?;
        Ok(surface.to_rgba8()?)
    }
}
