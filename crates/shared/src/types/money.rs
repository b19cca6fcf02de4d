//! Currency definitions and decimal scale constants.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; these constants pin the scales
//! amounts and rates are truncated to.

use serde::{Deserialize, Serialize};

/// Decimal places for stored/displayed currency amounts.
pub const AMOUNT_DP: u32 = 2;

/// Decimal places for stored/displayed exchange rates.
pub const RATE_DP: u32 = 6;

/// Currencies supported by the system.
///
/// ARS is the settlement currency; every amount is normalized into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Argentine Peso (settlement currency).
    Ars,
    /// US Dollar.
    Usd,
    /// Euro.
    Eur,
}

impl Currency {
    /// Returns true for the settlement currency (ARS).
    #[must_use]
    pub fn is_base(self) -> bool {
        self == Self::Ars
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ars => write!(f, "ARS"),
            Self::Usd => write!(f, "USD"),
            Self::Eur => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ARS" => Ok(Self::Ars),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
