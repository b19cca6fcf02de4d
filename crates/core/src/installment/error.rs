//! Installment error types.

use hogar_shared::types::{ExpenseId, InstallmentSeriesId};
use thiserror::Error;

use crate::schedule::ScheduleError;

/// Errors that can occur during scoped installment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallmentError {
    /// Moving a row to another month is only valid for a single row.
    #[error("Changing the month requires apply scope 'single'")]
    MonthChangeRequiresSingleScope,

    /// Turning an installment row into a plain expense is only valid for a
    /// single row.
    #[error("Disabling installments requires apply scope 'single'")]
    DisableRequiresSingleScope,

    /// A series-scoped operation was requested on a non-series row.
    #[error("Expense {0} is not part of an installment series")]
    NotASeriesRow(ExpenseId),

    /// The series has no rows to anchor the schedule on.
    #[error("Installment series {0} has no rows")]
    EmptySeries(InstallmentSeriesId),

    /// The recomputed schedule was invalid.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

impl InstallmentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MonthChangeRequiresSingleScope => "MONTH_CHANGE_REQUIRES_SINGLE_SCOPE",
            Self::DisableRequiresSingleScope => "DISABLE_REQUIRES_SINGLE_SCOPE",
            Self::NotASeriesRow(_) => "NOT_A_SERIES_ROW",
            Self::EmptySeries(_) => "EMPTY_SERIES",
            Self::Schedule(e) => e.error_code(),
        }
    }
}
