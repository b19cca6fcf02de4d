//! Property-based tests for month arithmetic.

use proptest::prelude::*;

use super::key::Month;

/// Strategy for month keys in a wide but realistic year range.
fn any_month() -> impl Strategy<Value = Month> {
    (1970i32..2200, 1u32..=12).prop_map(|(y, m)| Month::new(y, m).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// For any month, diff with itself is zero.
    #[test]
    fn prop_diff_identity(m in any_month()) {
        prop_assert_eq!(m.diff(m), 0);
    }

    /// Offsetting by n then diffing back recovers n.
    #[test]
    fn prop_add_then_diff_round_trip(m in any_month(), n in -600i32..600) {
        let shifted = m.add_months(n);
        prop_assert_eq!(m.diff(shifted), n);
        prop_assert_eq!(shifted.diff(m), -n);
    }

    /// add_months composes additively.
    #[test]
    fn prop_add_months_composes(m in any_month(), a in -300i32..300, b in -300i32..300) {
        prop_assert_eq!(m.add_months(a).add_months(b), m.add_months(a + b));
    }

    /// The month number always stays in 1-12.
    #[test]
    fn prop_month_number_in_range(m in any_month(), n in -600i32..600) {
        let shifted = m.add_months(n);
        prop_assert!((1..=12).contains(&shifted.month()));
    }

    /// Display output always parses back to the same key.
    #[test]
    fn prop_display_parse_round_trip(m in any_month()) {
        prop_assert_eq!(Month::parse(&m.to_string()).unwrap(), m);
    }

    /// date_on_day always lands inside the month, for any requested day.
    #[test]
    fn prop_date_on_day_lands_in_month(m in any_month(), day in 0u32..40) {
        let date = m.date_on_day(day);
        prop_assert!(m.contains(date));
    }

    /// Ordering agrees with diff sign.
    #[test]
    fn prop_ordering_matches_diff(a in any_month(), b in any_month()) {
        match a.diff(b).signum() {
            1 => prop_assert!(a < b),
            -1 => prop_assert!(a > b),
            _ => prop_assert_eq!(a, b),
        }
    }
}
