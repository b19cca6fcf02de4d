//! Property-based tests for the settlement engine.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::SettlementService;
use hogar_shared::types::UserId;

/// Strategy for positive cent amounts (0.01 to 1,000,000.00).
fn positive_cents() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Strategy for non-negative cent amounts.
fn cents() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

/// Participants with stable, distinct ids.
fn participants(n: usize) -> Vec<UserId> {
    (1..=n as u128).map(|i| UserId::from_uuid(Uuid::from_u128(i))).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The rounded differences sum to zero within one cent per participant.
    #[test]
    fn prop_differences_nearly_cancel(
        incomes in prop::collection::vec(positive_cents(), 2..=5),
        paid in prop::collection::vec(cents(), 2..=5),
    ) {
        let users = participants(incomes.len().max(paid.len()));
        let income_pairs: Vec<_> = users.iter().copied().zip(incomes.iter().copied()).collect();
        let paid_pairs: Vec<_> = users.iter().copied().zip(paid.iter().copied()).collect();

        let settlement = SettlementService::compute(&income_pairs, &paid_pairs).unwrap();

        let sum: Decimal = settlement.difference_by_user.values().copied().sum();
        let tolerance = Decimal::new(1, 2) * Decimal::from(settlement.difference_by_user.len() as u64);
        prop_assert!(
            sum.abs() <= tolerance,
            "differences summed to {sum}, beyond rounding tolerance {tolerance}"
        );
    }

    /// The transfer never exceeds either side's rounded imbalance, and both
    /// endpoints carry the extreme differences.
    #[test]
    fn prop_transfer_bounded_by_imbalances(
        incomes in prop::collection::vec(positive_cents(), 2..=5),
        paid in prop::collection::vec(cents(), 2..=5),
    ) {
        let users = participants(incomes.len().max(paid.len()));
        let income_pairs: Vec<_> = users.iter().copied().zip(incomes.iter().copied()).collect();
        let paid_pairs: Vec<_> = users.iter().copied().zip(paid.iter().copied()).collect();

        let settlement = SettlementService::compute(&income_pairs, &paid_pairs).unwrap();

        if let Some(transfer) = settlement.transfer {
            let sender_diff = settlement.difference_by_user[&transfer.from];
            let receiver_diff = settlement.difference_by_user[&transfer.to];

            prop_assert!(transfer.amount > Decimal::ZERO);
            prop_assert!(sender_diff < Decimal::ZERO);
            prop_assert!(receiver_diff > Decimal::ZERO);
            prop_assert!(transfer.amount <= sender_diff.abs());
            prop_assert!(transfer.amount <= receiver_diff);

            for diff in settlement.difference_by_user.values() {
                prop_assert!(*diff >= sender_diff, "sender must owe the most");
                prop_assert!(*diff <= receiver_diff, "receiver must be owed the most");
            }
        }
    }

    /// Two participants: the proposed transfer settles the smaller imbalance
    /// completely.
    #[test]
    fn prop_two_person_transfer_settles(
        income_a in positive_cents(),
        income_b in positive_cents(),
        paid_a in cents(),
        paid_b in cents(),
    ) {
        let users = participants(2);
        let settlement = SettlementService::compute(
            &[(users[0], income_a), (users[1], income_b)],
            &[(users[0], paid_a), (users[1], paid_b)],
        )
        .unwrap();

        if let Some(transfer) = settlement.transfer {
            let sender_diff = settlement.difference_by_user[&transfer.from];
            let receiver_diff = settlement.difference_by_user[&transfer.to];
            let smaller = sender_diff.abs().min(receiver_diff);
            prop_assert_eq!(transfer.amount, smaller);
        }
    }

    /// Fair shares follow income proportions: a participant with more income
    /// never has a smaller fair share.
    #[test]
    fn prop_fair_share_monotone_in_income(
        income_a in positive_cents(),
        income_b in positive_cents(),
        total_paid in positive_cents(),
    ) {
        let users = participants(2);
        let settlement = SettlementService::compute(
            &[(users[0], income_a), (users[1], income_b)],
            &[(users[0], total_paid)],
        )
        .unwrap();

        let share_a = settlement.fair_share_by_user[&users[0]];
        let share_b = settlement.fair_share_by_user[&users[1]];
        if income_a >= income_b {
            prop_assert!(share_a >= share_b);
        } else {
            prop_assert!(share_b >= share_a);
        }
    }

    /// Computation is deterministic: identical inputs give identical output.
    #[test]
    fn prop_deterministic(
        incomes in prop::collection::vec(positive_cents(), 2..=4),
        paid in prop::collection::vec(cents(), 2..=4),
    ) {
        let users = participants(incomes.len().max(paid.len()));
        let income_pairs: Vec<_> = users.iter().copied().zip(incomes.iter().copied()).collect();
        let paid_pairs: Vec<_> = users.iter().copied().zip(paid.iter().copied()).collect();

        let first = SettlementService::compute(&income_pairs, &paid_pairs).unwrap();
        let second = SettlementService::compute(&income_pairs, &paid_pairs).unwrap();
        prop_assert_eq!(first, second);
    }
}
