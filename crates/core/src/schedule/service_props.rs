//! Property-based tests for the installment scheduler.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::InstallmentScheduler;
use super::types::{EntryMode, ScheduleInput};
use crate::money::round_amount;

/// Strategy for amounts with up to 4 decimal places, positive or negative.
fn any_amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

/// Strategy for positive cent amounts.
fn positive_cents() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Schedule exactness: for all valid (count, total), the amounts sum to
    /// exactly the rounded total.
    #[test]
    fn prop_total_mode_sums_exactly(count in 1u32..=72, total in any_amount()) {
        let input = ScheduleInput { count, entry: EntryMode::Total(total) };
        let schedule = InstallmentScheduler::compute(&input).unwrap();

        prop_assert_eq!(schedule.amounts.len(), count as usize);
        prop_assert_eq!(
            schedule.amounts.iter().sum::<Decimal>(),
            round_amount(total),
            "schedule must sum to the rounded total"
        );
        prop_assert_eq!(schedule.total, round_amount(total));
    }

    /// All installments except the last are equal in total mode.
    #[test]
    fn prop_total_mode_base_uniform(count in 2u32..=72, total in positive_cents()) {
        let input = ScheduleInput { count, entry: EntryMode::Total(total) };
        let schedule = InstallmentScheduler::compute(&input).unwrap();

        let base = schedule.amounts[0];
        for amount in &schedule.amounts[..schedule.amounts.len() - 1] {
            prop_assert_eq!(*amount, base);
        }
    }

    /// The remainder absorbed by the last installment never exceeds what
    /// rounding can introduce (one cent per installment).
    #[test]
    fn prop_total_mode_remainder_bounded(count in 2u32..=72, total in positive_cents()) {
        let input = ScheduleInput { count, entry: EntryMode::Total(total) };
        let schedule = InstallmentScheduler::compute(&input).unwrap();

        let base = schedule.amounts[0];
        let last = schedule.amounts[schedule.amounts.len() - 1];
        let drift = (last - base).abs();
        prop_assert!(
            drift <= Decimal::new(1, 2) * Decimal::from(count),
            "last installment drifted {drift} from base"
        );
    }

    /// Per-installment mode: all amounts equal the rounded unit and the
    /// total is unit * count.
    #[test]
    fn prop_per_mode_uniform(count in 1u32..=72, per in positive_cents()) {
        let input = ScheduleInput { count, entry: EntryMode::PerInstallment(per) };
        let schedule = InstallmentScheduler::compute(&input).unwrap();

        for amount in &schedule.amounts {
            prop_assert_eq!(*amount, round_amount(per));
        }
        prop_assert_eq!(schedule.total, round_amount(per * Decimal::from(count)));
    }
}
