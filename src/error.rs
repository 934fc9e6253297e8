//! Error type shared by the generator and config persistence.

use thiserror::Error;

use crate::coords::HexCoordinate;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("config JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config name {0:?}")]
    InvalidConfigName(String),

    #[error("cells {from} and {to} are not adjacent")]
    NotAdjacent { from: HexCoordinate, to: HexCoordinate },

    /// Grid state that a pass relies on does not hold. Indicates a bug.
    #[error("grid invariant violated: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, MapError>;
