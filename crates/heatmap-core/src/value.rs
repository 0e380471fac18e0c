// File: crates/heatmap-core/src/value.rs
// Summary: Grid cell values (bare or label-tagged numbers) and payload pre-validation.

use serde_json::Value;

use crate::error::{HeatMapError, Result};

/// One cell of the grid.
#[derive(Clone, Debug, PartialEq)]
pub enum GridValue {
    Number(f64),
    /// Single-key mapping `{label: number}`.
    Tagged { label: String, value: f64 },
}

impl GridValue {
    pub fn tagged(label: impl Into<String>, value: f64) -> Self {
        Self::Tagged { label: label.into(), value }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Tagged { value, .. } => *value,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Number(_) => None,
            Self::Tagged { label, .. } => Some(label),
        }
    }

    /// Parse the cell at `index` of a JSON payload.
    pub fn from_json(index: usize, cell: &Value) -> Result<Self> {
        let invalid = |reason: String| HeatMapError::InvalidCellValue { index, reason };
        match cell {
            Value::Number(n) => n
                .as_f64()
                .map(Self::Number)
                .ok_or_else(|| invalid(format!("{n} is not representable as f64"))),
            Value::Object(map) => {
                if map.len() != 1 {
                    return Err(invalid(format!("tagged cell must have exactly one entry, found {}", map.len())));
                }
                // len == 1 checked above
                let (label, inner) = map.iter().next().ok_or_else(|| invalid("empty mapping".into()))?;
                match inner.as_f64() {
                    Some(v) => Ok(Self::tagged(label.clone(), v)),
                    None => Err(invalid(format!("value of '{label}' is not a number"))),
                }
            }
            other => Err(invalid(format!("expected number or {{label: number}}, found {}", json_kind(other)))),
        }
    }
}

impl From<f64> for GridValue {
    fn from(v: f64) -> Self { Self::Number(v) }
}

/// Validate every cell of a payload before mapping.
pub fn parse_payload(cells: &[Value]) -> Result<Vec<GridValue>> {
    cells.iter().enumerate().map(|(i, c)| GridValue::from_json(i, c)).collect()
}

/// Wrap plain numbers, e.g. rows read from a CSV file.
pub fn from_numbers(values: &[f64]) -> Vec<GridValue> {
    values.iter().copied().map(GridValue::Number).collect()
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tagged_cell_yields_label_and_value() {
        let v = GridValue::from_json(0, &json!({"A": 5})).unwrap();
        assert_eq!(v.value(), 5.0);
        assert_eq!(v.label(), Some("A"));
    }

    #[test]
    fn two_key_cell_is_rejected() {
        let err = GridValue::from_json(3, &json!({"A": 1, "B": 2})).unwrap_err();
        assert!(matches!(err, HeatMapError::InvalidCellValue { index: 3, .. }));
    }

    #[test]
    fn non_numeric_tag_and_strings_are_rejected() {
        assert!(GridValue::from_json(0, &json!({"A": "x"})).is_err());
        assert!(GridValue::from_json(0, &json!({})).is_err());
        assert!(GridValue::from_json(0, &json!("5")).is_err());
        assert!(GridValue::from_json(0, &json!(null)).is_err());
    }

    #[test]
    fn payload_reports_first_bad_index() {
        let cells = vec![json!(1), json!(2.5), json!([1]), json!(true)];
        match parse_payload(&cells) {
            Err(HeatMapError::InvalidCellValue { index, .. }) => assert_eq!(index, 2),
            other => panic!("unexpected {other:?}"),
        }
    }
}
