//! Oracle access errors.
//!
//! Errors related to oracle availability and data access.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is a configuration fault: the movement pipeline cannot
/// run without a map, capabilities or a random source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// MapOracle is not available in the environment.
    #[error("MapOracle not available")]
    MapNotAvailable,

    /// CapabilityOracle is not available in the environment.
    #[error("CapabilityOracle not available")]
    CapabilitiesNotAvailable,

    /// ItemInterestOracle is not available in the environment.
    #[error("ItemInterestOracle not available")]
    ItemsNotAvailable,

    /// ConfigOracle is not available in the environment.
    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    /// RngOracle is not available in the environment.
    #[error("RngOracle not available")]
    RngNotAvailable,

    /// A text layout could not be parsed.
    #[error("invalid layout at row {row}: {reason}")]
    InvalidLayout { row: usize, reason: &'static str },
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            MapNotAvailable | CapabilitiesNotAvailable | ItemsNotAvailable
            | ConfigNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,

            InvalidLayout { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            CapabilitiesNotAvailable => "ORACLE_CAPABILITIES_NOT_AVAILABLE",
            ItemsNotAvailable => "ORACLE_ITEMS_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            InvalidLayout { .. } => "ORACLE_INVALID_LAYOUT",
        }
    }
}
