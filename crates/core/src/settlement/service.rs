//! Settlement computation.

use std::collections::BTreeMap;

use hogar_shared::types::UserId;
use rust_decimal::Decimal;

use super::error::SettlementError;
use super::types::{Settlement, Transfer};
use crate::money::{round_amount, round_rate};

/// Computes income-proportional settlements.
///
/// Pure business logic: the caller aggregates each participant's ARS income
/// and ARS expenses for the month and passes them in.
pub struct SettlementService;

impl SettlementService {
    /// Computes the settlement breakdown for one month.
    ///
    /// Each participant's fair share is their income times the month's
    /// expense ratio. Differences are rounded once, and the transfer is
    /// computed from the rounded values, so the displayed differences and the
    /// transfer amount always agree.
    ///
    /// A participant present in only one of the two inputs participates with
    /// zero on the missing side; duplicate entries accumulate.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::NonPositiveIncome` when expenses are
    /// positive but total income is not, since the ratio is undefined.
    pub fn compute(
        incomes: &[(UserId, Decimal)],
        paid: &[(UserId, Decimal)],
    ) -> Result<Settlement, SettlementError> {
        let mut income_by_user: BTreeMap<UserId, Decimal> = BTreeMap::new();
        for (user, amount) in incomes {
            *income_by_user.entry(*user).or_default() += *amount;
        }
        let mut paid_by_user: BTreeMap<UserId, Decimal> = BTreeMap::new();
        for (user, amount) in paid {
            *paid_by_user.entry(*user).or_default() += *amount;
        }
        // Every participant appears on both sides
        for user in income_by_user.keys() {
            paid_by_user.entry(*user).or_default();
        }
        for user in paid_by_user.keys() {
            income_by_user.entry(*user).or_default();
        }

        let total_income = round_amount(income_by_user.values().copied().sum());
        let total_expenses = round_amount(paid_by_user.values().copied().sum());

        if total_income <= Decimal::ZERO && total_expenses > Decimal::ZERO {
            return Err(SettlementError::NonPositiveIncome {
                total_income,
                total_expenses,
            });
        }

        let expense_ratio = if total_expenses.is_zero() || total_income.is_zero() {
            round_rate(Decimal::ZERO)
        } else {
            round_rate(total_expenses / total_income)
        };

        let mut fair_share_by_user = BTreeMap::new();
        let mut difference_by_user = BTreeMap::new();
        for (user, income) in &income_by_user {
            let fair_share = round_amount(*income * expense_ratio);
            let paid_amount = round_amount(*paid_by_user.entry(*user).or_default());
            fair_share_by_user.insert(*user, fair_share);
            difference_by_user.insert(*user, round_amount(paid_amount - fair_share));
        }
        let paid_by_user: BTreeMap<UserId, Decimal> = paid_by_user
            .into_iter()
            .map(|(user, amount)| (user, round_amount(amount)))
            .collect();

        let transfer = Self::balancing_transfer(&difference_by_user);

        Ok(Settlement {
            total_income,
            total_expenses,
            expense_ratio,
            fair_share_by_user,
            paid_by_user,
            difference_by_user,
            transfer,
        })
    }

    /// Picks the single balancing transfer from the rounded differences.
    ///
    /// Sender is the most negative difference, receiver the largest positive
    /// one. Exact ties resolve to the lowest participant id, which makes the
    /// choice deterministic across calls.
    fn balancing_transfer(differences: &BTreeMap<UserId, Decimal>) -> Option<Transfer> {
        let mut sender: Option<(UserId, Decimal)> = None;
        let mut receiver: Option<(UserId, Decimal)> = None;

        for (user, difference) in differences {
            if *difference < Decimal::ZERO
                && sender.is_none_or(|(_, best)| *difference < best)
            {
                sender = Some((*user, *difference));
            }
            if *difference > Decimal::ZERO
                && receiver.is_none_or(|(_, best)| *difference > best)
            {
                receiver = Some((*user, *difference));
            }
        }

        let ((from, owed), (to, due)) = (sender?, receiver?);
        let amount = owed.abs().min(due);
        if amount.is_zero() {
            return None;
        }
        Some(Transfer { from, to, amount })
    }
}
