// File: crates/heatmap-core/src/text.rs
// Summary: Text shaper/renderer using Skia textlayout; anchors paragraphs by alignment and baseline.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use crate::surface::{TextAlign, TextBaseline};

const FALLBACK_FAMILIES: [&str; 5] = ["Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color, family: &str) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        let mut families = vec![family];
        families.extend(FALLBACK_FAMILIES.iter().copied().filter(|f| !f.eq_ignore_ascii_case(family)));
        ts.set_font_families(&families);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color, family: &str) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color, family);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint `text` so that (x, y) is the anchor given by `align` and `baseline`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_anchored(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: skia::Color,
        family: &str,
        align: TextAlign,
        baseline: TextBaseline,
    ) {
        let mut p = self.layout(text, size, color, family);
        let width = p.longest_line();
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width * 0.5,
            TextAlign::Right => x - width,
        };
        // Paragraph draws from top-left
        let top = match baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - p.height() * 0.5,
            TextBaseline::Alphabetic => y - p.alphabetic_baseline(),
        };
        p.paint(canvas, (left, top));
    }
}
