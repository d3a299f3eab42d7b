//! Configuration oracle for exposing movement tuning to the pipeline.

use crate::config::MovementConfig;

/// Provides access to runtime configuration values.
pub trait ConfigOracle: Send + Sync {
    fn movement(&self) -> &MovementConfig;

    /// Speed rating that yields one action per turn.
    fn quantum(&self) -> u32 {
        self.movement().quantum
    }
}

impl ConfigOracle for MovementConfig {
    fn movement(&self) -> &MovementConfig {
        self
    }
}
