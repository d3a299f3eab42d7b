//! Errors that stop a movement decision from running at all.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::schedule::ScheduleError;
use crate::state::EntityId;

/// Configuration faults surfaced by arbitration and the driver.
///
/// Blocked or degenerate situations are not errors; they resolve to
/// [`super::TurnOutcome::NoAction`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(deserialize = "'de: 'static")))]
pub enum ResolveError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    /// The actor is not on the roster, or is dead.
    #[error("actor {0} cannot act: unknown or dead")]
    UnknownActor(EntityId),
}

impl GameError for ResolveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ResolveError::Oracle(error) => error.severity(),
            ResolveError::Schedule(error) => error.severity(),
            ResolveError::UnknownActor(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ResolveError::Oracle(error) => error.error_code(),
            ResolveError::Schedule(error) => error.error_code(),
            ResolveError::UnknownActor(_) => "RESOLVE_UNKNOWN_ACTOR",
        }
    }
}
