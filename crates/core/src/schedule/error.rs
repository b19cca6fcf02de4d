//! Schedule error types.

use thiserror::Error;

use super::types::EntryModeKind;

/// Errors that can occur when computing an installment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Installment count must be a positive integer.
    #[error("Installment count must be at least 1, got {0}")]
    InvalidCount(u32),

    /// The amount required by the selected entry mode is absent.
    #[error("Missing amount for entry mode {mode}")]
    MissingAmount {
        /// The entry mode whose amount was not supplied.
        mode: EntryModeKind,
    },
}

impl ScheduleError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCount(_) => "INVALID_INSTALLMENT_COUNT",
            Self::MissingAmount { .. } => "MISSING_SCHEDULE_AMOUNT",
        }
    }
}
