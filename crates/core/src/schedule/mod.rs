//! Installment amount schedules with exact-sum guarantee.
//!
//! Splits a total or per-unit amount into N periodic installments. In total
//! mode the last installment absorbs the division remainder so the schedule
//! sums exactly to the rounded total.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::ScheduleError;
pub use service::InstallmentScheduler;
pub use types::{EntryMode, EntryModeKind, InstallmentSchedule, ScheduleInput};
