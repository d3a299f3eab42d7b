//! Common error infrastructure for game-movement.
//!
//! Domain errors live next to the code that raises them (`OracleError` in
//! `env`, `StateError` in `state`, `ScheduleError` in `schedule`,
//! `ResolveError` in `arbitration`). All of them implement [`GameError`].
//!
//! Movement decisions themselves never fail: a blocked, unreachable or
//! degenerate situation is reported as `TurnOutcome::NoAction`. `Err` is
//! reserved for configuration faults such as a missing oracle.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with same or alternative input.
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: actor not found, cell already occupied
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: occupancy map desync
    Internal,

    /// Fatal error - the pipeline cannot run at all.
    ///
    /// Examples: missing required oracle
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or broken setup.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all game-movement errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::OracleError;
    use crate::state::{EntityId, StateError};

    #[test]
    fn missing_oracles_are_fatal() {
        let error = OracleError::RngNotAvailable;
        assert!(error.severity().is_internal());
        assert_eq!(error.error_code(), "ORACLE_RNG_NOT_AVAILABLE");
    }

    #[test]
    fn bad_references_are_validation_errors() {
        let error = StateError::DuplicateActor(EntityId(4));
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert!(!error.severity().is_recoverable());
        assert_eq!(error.to_string(), "actor #4 is already on the roster");
    }
}
