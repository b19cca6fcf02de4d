//! Monthly exchange rate pinning and resolution.

pub mod rate;

pub use rate::{resolve_rate, MonthlyRate};
