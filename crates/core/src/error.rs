use crate::types::{Color, GridSize, Point};

/// Errors surfaced by grid and engine operations.
///
/// All of them are caller bugs or rejected configurations; none is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("coordinate {point} is outside the {}x{} grid", size.width, size.height)]
    OutOfBounds { point: Point, size: GridSize },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{to} is not a directional neighbor of {from}")]
    NotNeighbor { from: Point, to: Point },

    #[error("color {color} is outside the palette 1..={num_colors}")]
    InvalidColor { color: Color, num_colors: u8 },

    #[error("a matched turn is still being resolved")]
    TurnInProgress,
}

impl EngineError {
    /// Short stable identifier for drivers that map errors onto their own codes
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::OutOfBounds { .. } => "out_of_bounds",
            EngineError::InvalidConfiguration(_) => "invalid_configuration",
            EngineError::NotNeighbor { .. } => "not_neighbor",
            EngineError::InvalidColor { .. } => "invalid_color",
            EngineError::TurnInProgress => "turn_in_progress",
        }
    }
}
