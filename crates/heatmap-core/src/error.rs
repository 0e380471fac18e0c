// File: crates/heatmap-core/src/error.rs
// Summary: Error taxonomy shared by validation, mapping and rendering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeatMapError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HeatMapError {
    /// Payload length does not equal `rows * columns`, or a dimension is zero.
    #[error("payload has {len} values, expected rows ({rows}) x columns ({columns})")]
    InvalidGridShape { len: usize, rows: usize, columns: usize },

    /// A cell is neither a number nor a single-entry `{label: number}` mapping.
    #[error("invalid cell value at index {index}: {reason}")]
    InvalidCellValue { index: usize, reason: String },

    /// `rows`/`columns` override that is not a positive integer.
    #[error("invalid {field}: {reason}")]
    InvalidDimension { field: &'static str, reason: String },

    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Drawing surface has zero width or height.
    #[error("drawing surface not ready ({width}x{height})")]
    SurfaceNotReady { width: u32, height: u32 },

    /// Renderer could not be set up; the widget instance stays disabled.
    #[error("missing host capability: {0}")]
    MissingHostCapability(String),

    #[error("background image: {0}")]
    Image(String),

    #[error("render failed: {0}")]
    Render(String),
}

impl HeatMapError {
    /// Validation failures drop the message instead of rendering it partially.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidGridShape { .. }
                | Self::InvalidCellValue { .. }
                | Self::InvalidDimension { .. }
                | Self::InvalidMessage(_)
        )
    }
}
