//! Error types for the lock subsystem.
//!
//! Permission outcomes are not errors; they travel as
//! [`Access`](super::access::Access) values. `WardenError` covers registry
//! misuse and persistence failures only.

use super::position::BlockPos;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WardenError {
    /// A different record already covers this coordinate; the caller must
    /// remove it before adding.
    #[error("position {pos} already belongs to another lock")]
    PositionOccupied { pos: BlockPos },

    /// A record must cover at least one container position.
    #[error("lock record has no container positions")]
    EmptyContainerSet,

    /// Save-data blob could not be read or written.
    #[error("persistence failure: {0}")]
    Persistence(String),

    /// Blob or config bytes could not be decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for WardenError {
    fn from(err: serde_json::Error) -> Self {
        WardenError::Serialization(err.to_string())
    }
}
