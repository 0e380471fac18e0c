// File: crates/heatmap-core/src/widget.rs
// Summary: Per-message handler: validate, map, render density, then draw value overlay and legend.
// Notes:
// - The only state kept between messages is the density instance, created
//   lazily on the first message. Configuration and container size are passed
//   in fresh on every call.

use tracing::{debug, error, warn};

use crate::config::{BackgroundKind, LegendKind, OverlayKind, WidgetConfig};
use crate::density::{DensityData, DensityInstance, DensityRenderer};
use crate::error::{HeatMapError, Result};
use crate::grid::map_grid_seeded;
use crate::legend::LegendEntry;
use crate::message::InputMessage;
use crate::overlay;
use crate::surface::DrawingSurface;
use crate::types::{ContainerSize, Point, ValueRange};

/// What one message produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub rows: usize,
    pub columns: usize,
    pub points: Vec<Point>,
    pub range: ValueRange,
    /// Empty when the legend is off or no legend surface was given.
    pub legend: Vec<LegendEntry>,
    pub labels_drawn: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PassOutcome {
    Rendered(Frame),
    /// Surface still had zero size after reconfiguration; retried on the next message.
    Skipped { width: u32, height: u32 },
}

pub struct HeatMapWidget<R: DensityRenderer> {
    renderer: R,
    instance: Option<R::Instance>,
    disabled: Option<HeatMapError>,
}

impl<R: DensityRenderer> HeatMapWidget<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer, instance: None, disabled: None }
    }

    pub fn instance(&self) -> Option<&R::Instance> {
        self.instance.as_ref()
    }

    pub fn instance_mut(&mut self) -> Option<&mut R::Instance> {
        self.instance.as_mut()
    }

    /// Set when the renderer could not be created; every later message is refused.
    pub fn disabled_reason(&self) -> Option<&HeatMapError> {
        self.disabled.as_ref()
    }

    /// Handle one inbound message. Validation errors drop the message and are returned.
    pub fn on_data(
        &mut self,
        config: &WidgetConfig,
        msg: &InputMessage,
        container: ContainerSize,
        legend_surface: Option<&mut dyn DrawingSurface>,
    ) -> Result<PassOutcome> {
        if let Some(reason) = &self.disabled {
            return Err(reason.clone());
        }

        let (rows, columns) = msg.resolve_dimensions(config).inspect_err(|e| error!(error = %e, "message dropped"))?;
        let map = map_grid_seeded(
            &msg.payload,
            rows,
            columns,
            container.width,
            container.height,
            config.fixed_range(),
            config.range_seed(),
        )
        .inspect_err(|e| error!(error = %e, "message dropped"))?;

        let density_config = config.density_config(container);
        if self.instance.is_none() {
            match self.renderer.create(&density_config) {
                Ok(created) => self.instance = Some(created),
                Err(e) => {
                    error!(error = %e, "heat map renderer unavailable, widget disabled");
                    self.disabled = Some(e.clone());
                    return Err(e);
                }
            }
        }
        let Some(instance) = self.instance.as_mut() else {
            return Err(HeatMapError::MissingHostCapability("renderer instance missing".into()));
        };

        let (sw, sh) = instance.surface_size();
        if sw == 0 || sh == 0 {
            instance.configure(&density_config);
            warn!(width = container.width, height = container.height, "heat map surface size corrected");
        } else if (sw, sh) != (container.width, container.height) {
            instance.configure(&density_config);
            debug!(from = ?(sw, sh), to = ?(container.width, container.height), "heat map surface resized");
        }

        let background = match config.background_kind() {
            BackgroundKind::Image => msg.decode_image().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring background image");
                None
            }),
            BackgroundKind::None | BackgroundKind::Color => None,
        };
        if let Err(e) = instance.set_background_image(background.as_deref()) {
            warn!(error = %e, "ignoring background image");
            instance.set_background_image(None)?;
        }

        let (sw, sh) = instance.surface_size();
        if sw == 0 || sh == 0 {
            warn!(width = sw, height = sh, "heat map skipped due to invalid canvas size");
            return Ok(PassOutcome::Skipped { width: sw, height: sh });
        }

        match instance.set_data(&DensityData::new(map.range, &map.points)) {
            Ok(()) => {}
            Err(HeatMapError::SurfaceNotReady { width, height }) => {
                warn!(width, height, "heat map skipped due to invalid canvas size");
                return Ok(PassOutcome::Skipped { width, height });
            }
            Err(e) => return Err(e),
        }

        let overlay_kind = config.overlay_kind();
        let labels_drawn = match (overlay_kind, instance.surface()) {
            (OverlayKind::None, _) | (_, None) => 0,
            (kind, Some(surface)) => overlay::draw_values(surface, &map.points, kind, config.values_decimals()),
        };

        let legend = match (config.legend_kind(), legend_surface) {
            (LegendKind::Vals, Some(surface)) => {
                overlay::draw_legend(surface, map.range, config.legend_count(), config.legend_decimals())
            }
            _ => Vec::new(),
        };

        debug!(rows, columns, min = map.range.min, max = map.range.max, labels_drawn, "heat map drawn");
        Ok(PassOutcome::Rendered(Frame { rows, columns, points: map.points, range: map.range, legend, labels_drawn }))
    }
}
