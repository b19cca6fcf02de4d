//! Shared types for Hogar.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Currency definitions and decimal scale constants

pub mod types;

pub use types::{AMOUNT_DP, Currency, RATE_DP};
