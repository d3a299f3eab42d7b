//! State management errors.
//!
//! Errors related to roster and occupancy bookkeeping.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, Position};

/// Errors that occur while placing or removing entities.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Entity ID allocation overflow (all IDs exhausted).
    #[error("entity id overflow (current: {current})")]
    EntityIdOverflow { current: u32 },

    /// An actor with this id is already on the roster.
    #[error("actor {0} is already on the roster")]
    DuplicateActor(EntityId),

    /// Position is already occupied by another entity.
    #[error("position {position} is already occupied by {occupant}")]
    PositionOccupied {
        position: Position,
        occupant: EntityId,
    },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        use StateError::*;
        match self {
            EntityIdOverflow { .. } => ErrorSeverity::Fatal,
            DuplicateActor(_) | PositionOccupied { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            EntityIdOverflow { .. } => "STATE_ENTITY_ID_OVERFLOW",
            DuplicateActor(_) => "STATE_DUPLICATE_ACTOR",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
        }
    }
}
