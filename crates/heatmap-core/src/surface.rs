// File: crates/heatmap-core/src/surface.rs
// Summary: Immediate-mode 2-D drawing surface used by the value overlay and the legend strip.

use crate::color::Rgb;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
}

/// Current text state of a surface, canvas-context style.
#[derive(Clone, Debug, PartialEq)]
pub struct TextState {
    pub font_px: f32,
    pub family: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub fill: Rgb,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_px: 10.0,
            family: "sans-serif".to_string(),
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            fill: Rgb::BLACK,
        }
    }
}

pub trait DrawingSurface {
    fn set_font(&mut self, size_px: f32, family: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn set_fill_color(&mut self, color: Rgb);
    /// Draw `text` anchored at (x, y) per the current alignment and baseline.
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    /// Size of the pixel buffer.
    fn backing_size(&self) -> (u32, u32);
    /// Size the surface is shown at; differs from the backing size on scaled displays.
    fn display_size(&self) -> (u32, u32) {
        self.backing_size()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text { text: String, x: f32, y: f32, state: TextState },
    Clear { x: f32, y: f32, width: f32, height: f32 },
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub backing: (u32, u32),
    pub display: (u32, u32),
    pub state: TextState,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { backing: (width, height), display: (width, height), ..Default::default() }
    }

    pub fn with_display(mut self, width: u32, height: u32) -> Self {
        self.display = (width, height);
        self
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            DrawOp::Clear { .. } => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_font(&mut self, size_px: f32, family: &str) {
        self.state.font_px = size_px;
        self.state.family = family.to_string();
    }
    fn set_text_align(&mut self, align: TextAlign) { self.state.align = align; }
    fn set_text_baseline(&mut self, baseline: TextBaseline) { self.state.baseline = baseline; }
    fn set_fill_color(&mut self, color: Rgb) { self.state.fill = color; }
    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.ops.push(DrawOp::Text { text: text.to_string(), x, y, state: self.state.clone() });
    }
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Clear { x, y, width, height });
    }
    fn backing_size(&self) -> (u32, u32) { self.backing }
    fn display_size(&self) -> (u32, u32) { self.display }
}
