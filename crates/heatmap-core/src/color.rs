// File: crates/heatmap-core/src/color.rs
// Summary: RGB colors, CSS color parsing and the density gradient palette.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1].
    pub fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b))
    }

    pub fn to_skia(self) -> skia::Color {
        skia::Color::from_argb(255, self.r, self.g, self.b)
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r,g,b)` or a handful of named colors.
    pub fn parse(s: &str) -> Option<Rgb> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower.strip_prefix("rgb(").and_then(|b| b.strip_suffix(')')) {
            let parts: Vec<u8> = body
                .split(',')
                .map(|p| p.trim().parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8))
                .collect::<Option<Vec<_>>>()?;
            return match parts.as_slice() {
                [r, g, b] => Some(Rgb::new(*r, *g, *b)),
                _ => None,
            };
        }
        match lower.as_str() {
            "white" => Some(Rgb::WHITE),
            "black" => Some(Rgb::BLACK),
            "red" => Some(Rgb::RED),
            "blue" => Some(Rgb::BLUE),
            "green" => Some(Rgb::new(0, 128, 0)),
            "lime" => Some(Rgb::new(0, 255, 0)),
            "yellow" => Some(Rgb::new(255, 255, 0)),
            _ => None,
        }
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let nib = |c: u8| (c as char).to_digit(16).map(|d| d as u8);
    let b = hex.as_bytes();
    match b.len() {
        3 => Some(Rgb::new(nib(b[0])? * 17, nib(b[1])? * 17, nib(b[2])? * 17)),
        6 => Some(Rgb::new(
            nib(b[0])? << 4 | nib(b[1])?,
            nib(b[2])? << 4 | nib(b[3])?,
            nib(b[4])? << 4 | nib(b[5])?,
        )),
        _ => None,
    }
}

/// Color stops over [0, 1], sorted by offset.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradient {
    stops: Vec<(f64, Rgb)>,
}

impl Gradient {
    pub fn new(mut stops: Vec<(f64, Rgb)>) -> Self {
        stops.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { stops }
    }

    /// Blue at 0.25, lime at 0.55, yellow at 0.85, red at 1.0.
    pub fn density() -> Self {
        Self::new(vec![
            (0.25, Rgb::BLUE),
            (0.55, Rgb::new(0, 255, 0)),
            (0.85, Rgb::new(255, 255, 0)),
            (1.0, Rgb::RED),
        ])
    }

    pub fn sample(&self, t: f64) -> Rgb {
        let Some(first) = self.stops.first() else { return Rgb::BLACK };
        if t <= first.0 { return first.1; }
        for w in self.stops.windows(2) {
            let (a, b) = (w[0], w[1]);
            if t <= b.0 {
                let span = (b.0 - a.0).max(1e-12);
                return Rgb::lerp(a.1, b.1, (t - a.0) / span);
            }
        }
        self.stops[self.stops.len() - 1].1
    }

    /// 256-entry lookup table indexed by alpha.
    pub fn palette(&self) -> [Rgb; 256] {
        let mut lut = [Rgb::BLACK; 256];
        for (i, c) in lut.iter_mut().enumerate() {
            *c = self.sample(i as f64 / 255.0);
        }
        lut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_css_forms() {
        assert_eq!(Rgb::parse("#ffffff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse("#f00"), Some(Rgb::RED));
        assert_eq!(Rgb::parse("rgb(0, 0, 255)"), Some(Rgb::BLUE));
        assert_eq!(Rgb::parse("Yellow"), Some(Rgb::new(255, 255, 0)));
        assert_eq!(Rgb::parse("#12"), None);
        assert_eq!(Rgb::parse("rgb(1,2)"), None);
        assert_eq!(Rgb::parse("chartreuse-ish"), None);
    }

    #[test]
    fn density_gradient_stops() {
        let g = Gradient::density();
        assert_eq!(g.sample(0.0), Rgb::BLUE);
        assert_eq!(g.sample(0.25), Rgb::BLUE);
        assert_eq!(g.sample(0.55), Rgb::new(0, 255, 0));
        assert_eq!(g.sample(1.0), Rgb::RED);
        let lut = g.palette();
        assert_eq!(lut[255], Rgb::RED);
    }

    #[test]
    fn lerp_midpoint() {
        assert_eq!(Rgb::lerp(Rgb::BLUE, Rgb::RED, 0.5), Rgb::new(128, 0, 128));
    }
}
