//! Settlement output types.

use std::collections::BTreeMap;

use hogar_shared::types::UserId;
use rust_decimal::Decimal;
use serde::Serialize;

/// The single balancing transfer proposed for a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transfer {
    /// The participant who owes the most.
    pub from: UserId,
    /// The participant who is owed the most.
    pub to: UserId,
    /// Amount to transfer, 2 decimal places.
    pub amount: Decimal,
}

/// A month's settlement breakdown, derived on demand and never persisted.
///
/// All maps are keyed by participant and iterate in stable `UserId` order;
/// money fields serialize as fixed-scale decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    /// Sum of all participant incomes, 2 decimal places.
    pub total_income: Decimal,
    /// Sum of all participant expenses, 2 decimal places.
    pub total_expenses: Decimal,
    /// `total_expenses / total_income` at 6 decimal places; zero when both
    /// totals are zero.
    pub expense_ratio: Decimal,
    /// Each participant's income-proportional share of the expenses.
    pub fair_share_by_user: BTreeMap<UserId, Decimal>,
    /// Each participant's actual expenses paid.
    pub paid_by_user: BTreeMap<UserId, Decimal>,
    /// `paid - fair_share` per participant; negative means they owe.
    pub difference_by_user: BTreeMap<UserId, Decimal>,
    /// The proposed balancing transfer, if any.
    ///
    /// Exactly one transfer is proposed, from the largest debtor to the
    /// largest creditor. With three or more participants this does not
    /// guarantee every balance reaches zero; the model targets the two-person
    /// household case.
    pub transfer: Option<Transfer>,
}

impl Settlement {
    /// True when nobody owes anything.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.transfer.is_none()
    }
}
