// File: crates/heatmap-core/src/message.rs
// Summary: Inbound data message: payload cells, optional dimension overrides and background image.

use base64::Engine as _;
use serde_json::Value;

use crate::config::WidgetConfig;
use crate::error::{HeatMapError, Result};
use crate::value::{parse_payload, GridValue};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputMessage {
    pub payload: Vec<GridValue>,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    /// Base64 encoded image, optionally as a `data:` URL.
    pub image: Option<String>,
}

impl InputMessage {
    pub fn new(payload: Vec<GridValue>) -> Self {
        Self { payload, ..Default::default() }
    }

    pub fn with_dimensions(mut self, rows: usize, columns: usize) -> Self {
        self.rows = Some(rows);
        self.columns = Some(columns);
        self
    }

    pub fn with_image(mut self, base64: impl Into<String>) -> Self {
        self.image = Some(base64.into());
        self
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let v: Value = serde_json::from_str(s).map_err(|e| HeatMapError::InvalidMessage(e.to_string()))?;
        Self::from_value(&v)
    }

    /// Validate a JSON message. Every cell is checked before anything is mapped.
    pub fn from_value(v: &Value) -> Result<Self> {
        let obj = v
            .as_object()
            .ok_or_else(|| HeatMapError::InvalidMessage("message must be an object".into()))?;
        let cells = match obj.get("payload") {
            Some(Value::Array(cells)) => cells,
            Some(_) => return Err(HeatMapError::InvalidMessage("payload must be an array".into())),
            None => return Err(HeatMapError::InvalidMessage("missing payload".into())),
        };
        let payload = parse_payload(cells)?;
        let rows = dimension(obj.get("rows"), "rows")?;
        let columns = dimension(obj.get("columns"), "columns")?;
        let image = match obj.get("image") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => return Err(HeatMapError::InvalidMessage("image must be a base64 string".into())),
        };
        Ok(Self { payload, rows, columns, image })
    }

    /// Message dimensions override the configured ones.
    pub fn resolve_dimensions(&self, config: &WidgetConfig) -> Result<(usize, usize)> {
        let (cfg_rows, cfg_columns) = config.dimensions();
        let rows = self.rows.or(cfg_rows).ok_or_else(|| HeatMapError::InvalidDimension {
            field: "rows",
            reason: "not configured and not in message".into(),
        })?;
        let columns = self.columns.or(cfg_columns).ok_or_else(|| HeatMapError::InvalidDimension {
            field: "columns",
            reason: "not configured and not in message".into(),
        })?;
        Ok((rows, columns))
    }

    /// Decoded background image bytes, if the message carries one.
    pub fn decode_image(&self) -> Result<Option<Vec<u8>>> {
        let Some(raw) = self.image.as_deref() else { return Ok(None) };
        let data = match raw.split_once(";base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => raw,
        };
        base64::engine::general_purpose::STANDARD
            .decode(data.trim())
            .map(Some)
            .map_err(|e| HeatMapError::Image(e.to_string()))
    }
}

/// Positive integer, as a JSON integer or an integer string.
fn dimension(v: Option<&Value>, field: &'static str) -> Result<Option<usize>> {
    let invalid = |reason: String| HeatMapError::InvalidDimension { field, reason };
    let n = match v {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_u64().ok_or_else(|| invalid(format!("{n} is not a positive integer")))?,
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| invalid(format!("'{s}' is not an integer")))?,
        Some(other) => return Err(invalid(format!("unexpected value {other}"))),
    };
    if n == 0 {
        return Err(invalid("must be at least 1".into()));
    }
    usize::try_from(n).map(Some).map_err(|_| invalid(format!("{n} is too large")))
}
