//! Scoped installment operation types.

use hogar_shared::types::ExpenseId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::{Expense, ExpensePatch};
use crate::month::Month;
use crate::schedule::EntryModeKind;

/// How far an installment edit or delete reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyScope {
    /// Only the targeted row.
    Single,
    /// The targeted row and every later row in its series.
    Future,
    /// Every row in the series.
    All,
}

impl ApplyScope {
    /// The default scope for an edit on the given row: `Future` when the row
    /// belongs to a series, `Single` otherwise.
    #[must_use]
    pub fn default_for(expense: &Expense) -> Self {
        if expense.origin.is_installment() {
            Self::Future
        } else {
            Self::Single
        }
    }
}

/// A requested change to an installment row or its series.
///
/// Schedule inputs (`count`, `entry_mode`, amounts) fall back to the series
/// anchor's current values when unset; `patch` carries the shared row fields.
#[derive(Debug, Clone, Default)]
pub struct InstallmentChange {
    /// New number of installments.
    pub count: Option<u32>,
    /// New entry mode.
    pub entry_mode: Option<EntryModeKind>,
    /// New per-installment amount.
    pub per_installment_amount: Option<Decimal>,
    /// New total amount.
    pub total_amount: Option<Decimal>,
    /// Shared row fields (description, category, payer, currency, FX, date).
    pub patch: ExpensePatch,
    /// Move the row to another month. Only valid with scope `single`.
    pub month: Option<Month>,
    /// Turn the row into a plain expense. Only valid with scope `single`.
    pub disable_installment: bool,
}

/// The write plan for a scoped series rewrite.
///
/// Applied by the caller in one transaction: every update and delete
/// succeeds, or none do.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SeriesRewrite {
    /// Rows rewritten to the new schedule and shared fields.
    pub updates: Vec<Expense>,
    /// Rows whose installment number exceeds the new series length.
    pub deletes: Vec<ExpenseId>,
}
