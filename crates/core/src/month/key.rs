//! The `YYYY-MM` month key.
//!
//! Schedules and recurrence are keyed by calendar month, not by date. A
//! `Month` is an opaque key supporting offset, signed difference, and
//! day-of-month projection with end-of-month clamping.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors for month key parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonthError {
    /// The input does not match `YYYY-MM` with month in 1-12.
    #[error("Invalid month format: {0:?} (expected YYYY-MM)")]
    InvalidFormat(String),
}

impl MonthError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidFormat(_) => "INVALID_MONTH_FORMAT",
        }
    }
}

/// A calendar month key, displayed as `YYYY-MM`.
///
/// Ordering is chronological. Serialized as the `YYYY-MM` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month key, validating the month number.
    ///
    /// # Errors
    ///
    /// Returns `MonthError::InvalidFormat` when `month` is not in 1-12.
    pub fn new(year: i32, month: u32) -> Result<Self, MonthError> {
        if !(1..=12).contains(&month) {
            return Err(MonthError::InvalidFormat(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Parses a `YYYY-MM` string.
    ///
    /// # Errors
    ///
    /// Returns `MonthError::InvalidFormat` unless the input is exactly four
    /// digits, a dash, and two digits with month in 1-12.
    pub fn parse(input: &str) -> Result<Self, MonthError> {
        let invalid = || MonthError::InvalidFormat(input.to_string());

        let bytes = input.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        if !bytes[..4].iter().all(u8::is_ascii_digit)
            || !bytes[5..].iter().all(u8::is_ascii_digit)
        {
            return Err(invalid());
        }

        let year: i32 = input[..4].parse().map_err(|_| invalid())?;
        let month: u32 = input[5..].parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }

    /// The month containing the given date.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The year component.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// The month number (1-12).
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Returns the month offset by `offset` steps, wrapping year boundaries.
    #[must_use]
    pub fn add_months(self, offset: i32) -> Self {
        let total = self.ordinal() + i64::from(offset);
        Self {
            year: i32::try_from(total.div_euclid(12)).unwrap_or(self.year),
            month: u32::try_from(total.rem_euclid(12)).unwrap_or(0) + 1,
        }
    }

    /// Signed count of month steps from `self` to `end`; zero when equal.
    #[must_use]
    pub fn diff(self, end: Self) -> i32 {
        i32::try_from(end.ordinal() - self.ordinal()).unwrap_or(i32::MAX)
    }

    /// Maps a day-of-month onto a concrete date within this month.
    ///
    /// `day` is clamped to `[1, days_in_month]`, so day 31 in February
    /// resolves to February 28 (or 29 in a leap year).
    #[must_use]
    pub fn date_on_day(self, day: u32) -> NaiveDate {
        let clamped = day.clamp(1, self.days_in_month());
        // Invariant: month is 1-12 and the day was just clamped into range.
        NaiveDate::from_ymd_opt(self.year, self.month, clamped)
            .unwrap_or_else(|| self.first_day())
    }

    /// The first day of this month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// The last day of this month.
    #[must_use]
    pub fn last_day(self) -> NaiveDate {
        self.date_on_day(self.days_in_month())
    }

    /// Returns true if the given date falls within this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Number of days in this month.
    #[must_use]
    pub fn days_in_month(self) -> u32 {
        match self.month {
            2 => {
                if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    /// Zero-based month count since year zero, for offset/diff arithmetic.
    fn ordinal(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Month {
    type Err = MonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
