//! Decimal money kernel.
//!
//! CRITICAL: Rounding strategy for money:
//! - Round half up (`MidpointAwayFromZero`), applied only when truncating to a
//!   target scale
//! - Amounts truncate to 2 places, FX rates to 6 places
//! - Intermediate arithmetic keeps full decimal precision

use hogar_shared::{AMOUNT_DP, RATE_DP};
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Rounds a currency amount to 2 decimal places using round-half-up.
///
/// The result is rescaled so it always carries exactly 2 decimal places
/// (e.g. `30` becomes `30.00`).
#[must_use]
pub fn round_amount(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(AMOUNT_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(AMOUNT_DP);
    rounded
}

/// Rounds an exchange rate to 6 decimal places using round-half-up.
///
/// The result always carries exactly 6 decimal places (e.g. `1` becomes
/// `1.000000`).
#[must_use]
pub fn round_rate(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(RATE_DP);
    rounded
}

/// Converts an original-currency amount to ARS.
///
/// This is the single canonical conversion operation: multiply in full
/// precision, then truncate once to 2 places. Every ARS amount in the system
/// is derived through this function.
#[must_use]
pub fn to_ars(amount_original: Decimal, fx_rate: Decimal) -> Decimal {
    round_amount(amount_original * fx_rate)
}

/// The exact ARS-to-ARS rate, `1.000000`.
#[must_use]
pub fn unit_rate() -> Decimal {
    Decimal::new(1_000_000, RATE_DP)
}
