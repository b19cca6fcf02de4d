//! Exact decimal arithmetic and ARS conversion.

pub mod convert;

pub use convert::{round_amount, round_rate, to_ars, unit_rate};
