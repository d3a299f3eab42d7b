use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScheduleError {
    /// A zero quantum would make every actor infinitely fast.
    #[error("action quantum must be positive")]
    ZeroQuantum,
}

impl GameError for ScheduleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ScheduleError::ZeroQuantum => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ScheduleError::ZeroQuantum => "SCHEDULE_ZERO_QUANTUM",
        }
    }
}
