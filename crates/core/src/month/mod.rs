//! Calendar month keys and arithmetic.

pub mod key;

#[cfg(test)]
mod key_props;

pub use key::{Month, MonthError};
