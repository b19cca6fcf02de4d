//! Installment schedule computation.

use rust_decimal::Decimal;

use super::error::ScheduleError;
use super::types::{EntryMode, InstallmentSchedule, ScheduleInput};
use crate::money::round_amount;

/// Computes installment schedules.
///
/// The schedule is a pure function of its input: the same count, mode, and
/// amount always produce the same per-period amounts, which is what lets a
/// series be regenerated from its anchor row at any time.
pub struct InstallmentScheduler;

impl InstallmentScheduler {
    /// Computes the per-installment amounts for the given input.
    ///
    /// In per-installment mode every amount equals the rounded unit amount.
    /// In total mode the first `count - 1` installments carry the rounded
    /// base and the last installment absorbs the rounding remainder, so the
    /// amounts always sum to exactly the rounded total.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidCount` when `count` is zero.
    pub fn compute(input: &ScheduleInput) -> Result<InstallmentSchedule, ScheduleError> {
        if input.count < 1 {
            return Err(ScheduleError::InvalidCount(input.count));
        }
        let count = input.count as usize;

        let schedule = match input.entry {
            EntryMode::PerInstallment(per) => {
                let unit = round_amount(per);
                InstallmentSchedule {
                    amounts: vec![unit; count],
                    total: round_amount(per * Decimal::from(input.count)),
                }
            }
            EntryMode::Total(total) => {
                let total_rounded = round_amount(total);
                if count == 1 {
                    InstallmentSchedule {
                        amounts: vec![total_rounded],
                        total: total_rounded,
                    }
                } else {
                    let base = round_amount(total / Decimal::from(input.count));
                    let allocated = base * Decimal::from(input.count - 1);
                    let last = round_amount(total - allocated);

                    let mut amounts = vec![base; count - 1];
                    amounts.push(last);
                    InstallmentSchedule {
                        amounts,
                        total: total_rounded,
                    }
                }
            }
        };

        Ok(schedule)
    }
}
