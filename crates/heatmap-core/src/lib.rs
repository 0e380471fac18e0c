// File: crates/heatmap-core/src/lib.rs
// Summary: Core library entry point; exports grid mapping, legend interpolation and heat map rendering.

pub mod chart;
pub mod color;
pub mod config;
pub mod density;
pub mod error;
pub mod grid;
pub mod legend;
pub mod message;
pub mod overlay;
pub mod raster;
pub mod surface;
pub mod text;
pub mod types;
pub mod value;
pub mod widget;

pub use chart::{HeatMapChart, RenderOptions};
pub use color::{Gradient, Rgb};
pub use config::{BackgroundKind, LegendKind, OverlayKind, RendererKind, WidgetConfig};
pub use density::{DensityConfig, DensityData, DensityInstance, DensityRenderer};
pub use error::{HeatMapError, Result};
pub use grid::{map_grid, map_grid_seeded, GridMap, RangeSeed};
pub use legend::{build_legend, build_legend_scaled, LegendEntry};
pub use message::InputMessage;
pub use raster::{SkiaDensityRenderer, SkiaSurface};
pub use surface::{DrawingSurface, RecordingSurface, TextAlign, TextBaseline};
pub use text::TextShaper;
pub use types::{ContainerSize, Point, ValueRange};
pub use value::GridValue;
pub use widget::{Frame, HeatMapWidget, PassOutcome};
