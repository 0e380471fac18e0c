// File: crates/heatmap-core/src/config.rs
// Summary: Widget configuration as supplied by the host, with defensive defaults for every option.
// Notes:
// - Hosts tend to store numbers as strings ("40", "0.6"), so numeric and
//   boolean options accept either form. Anything unparsable falls back to
//   the default instead of failing the whole configuration.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::color::Rgb;
use crate::density::DensityConfig;
use crate::grid::RangeSeed;
use crate::types::{ContainerSize, ValueRange};

pub const DEFAULT_RADIUS: u32 = 40;
pub const DEFAULT_OPACITY: f32 = 0.6;
pub const DEFAULT_BLUR: f32 = 0.85;
pub const DEFAULT_BACKGROUND: Rgb = Rgb::WHITE;
pub const DEFAULT_LEGEND_COUNT: usize = 2;
const MAX_DECIMALS: usize = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendKind {
    #[default]
    None,
    /// Numeric values between min and max.
    Vals,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverlayKind {
    #[default]
    None,
    /// Cell values, rounded to `valuesDecimals`.
    Vals,
    /// Cell labels of tagged values.
    Keys,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackgroundKind {
    None,
    #[default]
    Color,
    /// Base64 image carried by the message.
    Image,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RendererKind {
    #[default]
    Canvas2d,
    Other(String),
}

impl RendererKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "canvas2d" | "canvas" => Self::Canvas2d,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Raw option object. Use the accessor methods to read resolved values.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub radius: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub background_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub opacity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub blur: Option<f64>,
    #[serde(default, alias = "defaultRenderer", deserialize_with = "lenient_string")]
    pub renderer_kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub rows: Option<usize>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub columns: Option<usize>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub min_max: Option<bool>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub minimum_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub maximum_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub show_legend: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub legend_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub show_values: Option<bool>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub grid_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub values_decimals: Option<usize>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub legend_decimals: Option<usize>,
    #[serde(default, deserialize_with = "lenient_usize")]
    pub legend_count: Option<usize>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub background_type: Option<String>,
    /// Seed the automatic range with `-inf` instead of 0 for the maximum.
    #[serde(default, deserialize_with = "lenient_bool")]
    pub exact_auto_range: Option<bool>,
}

impl WidgetConfig {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn from_value(v: Value) -> serde_json::Result<Self> {
        serde_json::from_value(v)
    }

    pub fn radius(&self) -> u32 {
        self.radius.filter(|r| *r >= 1.0).map(|r| r as u32).unwrap_or(DEFAULT_RADIUS)
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.filter(|o| (0.0..=1.0).contains(o)).map(|o| o as f32).unwrap_or(DEFAULT_OPACITY)
    }

    pub fn blur(&self) -> f32 {
        self.blur.filter(|b| (0.0..=1.0).contains(b)).map(|b| b as f32).unwrap_or(DEFAULT_BLUR)
    }

    pub fn background_color(&self) -> Rgb {
        self.background_color.as_deref().and_then(Rgb::parse).unwrap_or(DEFAULT_BACKGROUND)
    }

    pub fn renderer_kind(&self) -> RendererKind {
        self.renderer_kind.as_deref().map(RendererKind::parse).unwrap_or_default()
    }

    /// Configured `(rows, columns)`; zero counts as unset.
    pub fn dimensions(&self) -> (Option<usize>, Option<usize>) {
        (self.rows.filter(|r| *r > 0), self.columns.filter(|c| *c > 0))
    }

    /// Fixed range when `minMax` is on and both bounds parse.
    pub fn fixed_range(&self) -> Option<ValueRange> {
        if self.min_max != Some(true) {
            return None;
        }
        match (self.minimum_value, self.maximum_value) {
            (Some(min), Some(max)) => Some(ValueRange::new(min, max)),
            _ => {
                tracing::warn!("minMax enabled without numeric minimumValue/maximumValue, using automatic range");
                None
            }
        }
    }

    pub fn range_seed(&self) -> RangeSeed {
        if self.exact_auto_range == Some(true) { RangeSeed::Exact } else { RangeSeed::ZeroMax }
    }

    pub fn legend_kind(&self) -> LegendKind {
        match self.legend_type.as_deref().map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("vals") => LegendKind::Vals,
            Some(t) if t.eq_ignore_ascii_case("none") => LegendKind::None,
            _ if self.show_legend == Some(true) => LegendKind::Vals,
            _ => LegendKind::None,
        }
    }

    pub fn overlay_kind(&self) -> OverlayKind {
        match self.grid_type.as_deref().map(str::trim) {
            Some(t) if t.eq_ignore_ascii_case("vals") => OverlayKind::Vals,
            Some(t) if t.eq_ignore_ascii_case("keys") => OverlayKind::Keys,
            Some(t) if t.eq_ignore_ascii_case("none") => OverlayKind::None,
            _ if self.show_values == Some(true) => OverlayKind::Vals,
            _ => OverlayKind::None,
        }
    }

    pub fn background_kind(&self) -> BackgroundKind {
        match self.background_type.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
            Some(t) if t == "none" => BackgroundKind::None,
            Some(t) if t == "image" => BackgroundKind::Image,
            _ => BackgroundKind::Color,
        }
    }

    pub fn values_decimals(&self) -> usize {
        self.values_decimals.unwrap_or(0).min(MAX_DECIMALS)
    }

    pub fn legend_decimals(&self) -> usize {
        self.legend_decimals.unwrap_or(0).min(MAX_DECIMALS)
    }

    pub fn legend_count(&self) -> usize {
        self.legend_count.filter(|c| *c >= 2).unwrap_or(DEFAULT_LEGEND_COUNT)
    }

    /// Renderer configuration for a container of the given size.
    pub fn density_config(&self, container: ContainerSize) -> DensityConfig {
        DensityConfig {
            width: container.width,
            height: container.height,
            radius: self.radius(),
            opacity: self.opacity(),
            blur: self.blur(),
            background: match self.background_kind() {
                BackgroundKind::Color => Some(self.background_color()),
                BackgroundKind::None | BackgroundKind::Image => None,
            },
            renderer: self.renderer_kind(),
        }
    }
}

// ---- lenient field parsing ---------------------------------------------------

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(value_as_f64))
}

fn lenient_usize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<usize>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?
        .as_ref()
        .and_then(value_as_f64)
        .filter(|v| *v >= 0.0)
        .map(|v| v.trunc() as usize))
}

fn lenient_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Number, or a string starting with a number (`"12px"` reads as 12).
fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => leading_number(s),
        _ => None,
    }
}

fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let end = s
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0))
        .map(|(i, c)| i + c.len_utf8())
        .last()?;
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
