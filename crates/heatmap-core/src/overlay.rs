// File: crates/heatmap-core/src/overlay.rs
// Summary: Text passes drawn after the density field: per-cell values/keys and the legend strip.

use crate::config::OverlayKind;
use crate::legend::{build_legend_scaled, format_fixed, pixel_ratio, LegendEntry};
use crate::surface::{DrawingSurface, TextAlign, TextBaseline};
use crate::types::{Point, ValueRange, LEGEND_MARGIN};
use crate::color::Rgb;

pub const FONT_FAMILY: &str = "Arial";
pub const VALUE_FONT_PX: f32 = 10.0;
pub const LEGEND_FONT_PX: f32 = 18.0;
/// Top of the legend labels inside the strip.
pub const LEGEND_TEXT_Y: f32 = 5.0;

/// Draw each point's value (or label) centered on the point. Returns the number of labels drawn.
pub fn draw_values(surface: &mut dyn DrawingSurface, points: &[Point], kind: OverlayKind, decimals: usize) -> usize {
    if kind == OverlayKind::None {
        return 0;
    }
    surface.set_font(VALUE_FONT_PX, FONT_FAMILY);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
    surface.set_fill_color(Rgb::BLACK);

    let text_of = |p: &Point| -> Option<String> {
        match kind {
            OverlayKind::Vals => Some(format_fixed(p.value, decimals)),
            // untagged cells have no key to show
            OverlayKind::Keys => p.label.clone(),
            OverlayKind::None => None,
        }
    };

    let mut drawn = 0;
    for p in points {
        if let Some(text) = text_of(p) {
            surface.fill_text(&text, p.x, p.y);
            drawn += 1;
        }
    }
    drawn
}

/// Clear the legend surface and draw `count` values between `range.min` and `range.max`.
pub fn draw_legend(
    surface: &mut dyn DrawingSurface,
    range: ValueRange,
    count: usize,
    decimals: usize,
) -> Vec<LegendEntry> {
    let (backing_w, _) = surface.backing_size();
    let (display_w, display_h) = surface.display_size();
    let ratio = pixel_ratio(backing_w, display_w);

    surface.clear_rect(0.0, 0.0, display_w as f32, display_h as f32);
    surface.set_font(LEGEND_FONT_PX, FONT_FAMILY);
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Top);

    let entries = build_legend_scaled(range, count, display_w as f32, LEGEND_MARGIN, ratio);
    for e in &entries {
        surface.set_fill_color(e.color);
        surface.fill_text(&format_fixed(e.value, decimals), e.x, LEGEND_TEXT_Y);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, RecordingSurface, TextState};

    fn point(x: f32, y: f32, value: f64, label: Option<&str>) -> Point {
        Point { x, y, value, label: label.map(str::to_owned) }
    }

    #[test]
    fn values_are_centered_and_rounded() {
        let mut s = RecordingSurface::new(100, 100);
        let pts = [point(10.0, 20.0, 1.26, None), point(30.0, 40.0, 7.0, Some("k"))];
        assert_eq!(draw_values(&mut s, &pts, OverlayKind::Vals, 1), 2);
        let texts: Vec<_> = s.texts().collect();
        assert_eq!(texts, vec![("1.3", 10.0, 20.0), ("7.0", 30.0, 40.0)]);
        assert_eq!(s.state.align, TextAlign::Center);
        assert_eq!(s.state.baseline, TextBaseline::Middle);
        assert_eq!(s.state.font_px, VALUE_FONT_PX);
    }

    #[test]
    fn keys_skip_untagged_points() {
        let mut s = RecordingSurface::new(100, 100);
        let pts = [point(1.0, 1.0, 1.0, None), point(2.0, 2.0, 2.0, Some("B"))];
        assert_eq!(draw_values(&mut s, &pts, OverlayKind::Keys, 0), 1);
        assert_eq!(s.texts().next(), Some(("B", 2.0, 2.0)));
        assert_eq!(draw_values(&mut s, &pts, OverlayKind::None, 0), 0);
    }

    #[test]
    fn no_overlay_leaves_surface_untouched() {
        let mut s = RecordingSurface::new(100, 100);
        let pts = [point(1.0, 1.0, 1.0, Some("A")), point(2.0, 2.0, 2.0, None)];
        assert_eq!(draw_values(&mut s, &pts, OverlayKind::None, 2), 0);
        assert!(s.ops.is_empty());
        assert_eq!(s.state, TextState::default());
    }

    #[test]
    fn legend_clears_then_draws_colored_labels() {
        let mut s = RecordingSurface::new(100, 20);
        let entries = draw_legend(&mut s, ValueRange::new(0.0, 10.0), 3, 0);
        assert_eq!(entries.len(), 3);
        assert_eq!(s.ops[0], DrawOp::Clear { x: 0.0, y: 0.0, width: 100.0, height: 20.0 });
        let texts: Vec<_> = s.texts().collect();
        assert_eq!(texts, vec![("0", 40.0, 5.0), ("5", 50.0, 5.0), ("10", 60.0, 5.0)]);
        match &s.ops[3] {
            DrawOp::Text { state, .. } => assert_eq!(state.fill, Rgb::RED),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn legend_positions_follow_pixel_ratio() {
        let mut s = RecordingSurface::new(200, 40).with_display(100, 20);
        let entries = draw_legend(&mut s, ValueRange::new(0.0, 1.0), 2, 0);
        assert_eq!(entries[0].x, 80.0);
        assert_eq!(entries[1].x, 120.0);
    }
}
