//! Schedule input and output types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;

/// How the user entered the installment amounts.
///
/// This is the tag form used at the request boundary, where the mode and the
/// amounts arrive as separate fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntryModeKind {
    /// A fixed amount per installment.
    PerInstallment,
    /// A total amount split across installments.
    Total,
}

impl std::fmt::Display for EntryModeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerInstallment => write!(f, "perInstallment"),
            Self::Total => write!(f, "total"),
        }
    }
}

/// Entry mode with its amount attached.
///
/// The sum type makes a mode-without-amount unrepresentable inside the core;
/// [`ScheduleInput::from_parts`] is the boundary constructor that reports
/// a missing amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Every installment is this amount.
    PerInstallment(Decimal),
    /// This total is split across the installments.
    Total(Decimal),
}

impl EntryMode {
    /// The tag form of this mode.
    #[must_use]
    pub const fn kind(self) -> EntryModeKind {
        match self {
            Self::PerInstallment(_) => EntryModeKind::PerInstallment,
            Self::Total(_) => EntryModeKind::Total,
        }
    }
}

/// Input for computing an installment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleInput {
    /// Number of installments (must be at least 1).
    pub count: u32,
    /// Entry mode with the amount it requires.
    pub entry: EntryMode,
}

impl ScheduleInput {
    /// Builds a schedule input from boundary fields where the mode tag and
    /// the amounts arrive separately.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::MissingAmount` when the amount required by
    /// `mode` is absent.
    pub fn from_parts(
        count: u32,
        mode: EntryModeKind,
        per_installment_amount: Option<Decimal>,
        total_amount: Option<Decimal>,
    ) -> Result<Self, ScheduleError> {
        let entry = match mode {
            EntryModeKind::PerInstallment => per_installment_amount
                .map(EntryMode::PerInstallment)
                .ok_or(ScheduleError::MissingAmount { mode })?,
            EntryModeKind::Total => total_amount
                .map(EntryMode::Total)
                .ok_or(ScheduleError::MissingAmount { mode })?,
        };
        Ok(Self { count, entry })
    }
}

/// A computed installment schedule.
///
/// `amounts` holds one 2-decimal amount per installment, in order;
/// `total` is the exact sum of `amounts`. Money fields serialize as
/// fixed-scale decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallmentSchedule {
    /// Per-installment amounts, first to last.
    pub amounts: Vec<Decimal>,
    /// Total across all installments; always equals the sum of `amounts`.
    pub total: Decimal,
}
