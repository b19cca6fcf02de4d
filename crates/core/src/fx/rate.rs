//! Monthly exchange rates.
//!
//! A month's first use of a non-ARS currency pins that month's rate: one
//! `MonthlyRate` row per (month, currency), applied to every record of that
//! currency in the month.

use hogar_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{round_rate, unit_rate};
use crate::month::Month;

/// The pinned conversion rate for one currency in one month.
///
/// Unique per (month, currency) at the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRate {
    /// The month this rate applies to.
    pub month: Month,
    /// The currency being converted to ARS.
    pub currency: Currency,
    /// Multiplier converting one unit of `currency` into ARS.
    pub rate_to_ars: Decimal,
}

impl MonthlyRate {
    /// Creates a rate row, normalizing the rate to 6 decimal places.
    #[must_use]
    pub fn new(month: Month, currency: Currency, rate_to_ars: Decimal) -> Self {
        Self {
            month,
            currency,
            rate_to_ars: round_rate(rate_to_ars),
        }
    }

    /// The row to create when a non-ARS record first uses `fallback_rate` in
    /// a month with no pinned rate yet. Returns `None` for ARS or when the
    /// month already has a rate for this currency.
    #[must_use]
    pub fn pin_if_absent(
        month: Month,
        currency: Currency,
        fallback_rate: Decimal,
        existing: &[MonthlyRate],
    ) -> Option<Self> {
        if currency.is_base() {
            return None;
        }
        if existing
            .iter()
            .any(|r| r.month == month && r.currency == currency)
        {
            return None;
        }
        Some(Self::new(month, currency, fallback_rate))
    }
}

/// Resolves the FX rate to use for a record.
///
/// ARS converts at exactly `1.000000`. Other currencies prefer the pinned
/// rate for (month, currency) and fall back to the supplied default,
/// normalized to 6 decimal places.
#[must_use]
pub fn resolve_rate(
    currency: Currency,
    month: Month,
    monthly_rates: &[MonthlyRate],
    fallback_rate: Decimal,
) -> Decimal {
    if currency.is_base() {
        return unit_rate();
    }
    monthly_rates
        .iter()
        .find(|r| r.month == month && r.currency == currency)
        .map_or_else(|| round_rate(fallback_rate), |r| r.rate_to_ars)
}
