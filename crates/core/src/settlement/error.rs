//! Settlement error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when computing a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Expenses exist but total income is not positive, so the expense
    /// ratio is undefined. Callers fall back to a "no settlement yet" state.
    #[error(
        "Cannot settle: total income {total_income} is not positive while expenses are {total_expenses}"
    )]
    NonPositiveIncome {
        /// Sum of all participant incomes.
        total_income: Decimal,
        /// Sum of all participant expenses.
        total_expenses: Decimal,
    },
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveIncome { .. } => "NON_POSITIVE_INCOME",
        }
    }
}
