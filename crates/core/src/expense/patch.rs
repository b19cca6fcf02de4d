//! Partial-update patch objects.
//!
//! Updates arrive from the boundary as a set of optional fields. Each patch
//! has exactly one merge function, so there is a single place where a partial
//! update is applied to a record.

use chrono::NaiveDate;
use hogar_shared::types::{CategoryId, UserId};
use hogar_shared::Currency;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::types::{Expense, ExpenseTemplate};
use crate::money::round_rate;

/// A partial update for an [`Expense`] row.
///
/// Unset fields leave the row unchanged. Changing the amount, currency, or
/// FX rate recomputes `amount_ars` through the canonical conversion.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpensePatch {
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category_id: Option<CategoryId>,
    /// New original-currency amount.
    pub amount_original: Option<Decimal>,
    /// New currency.
    pub currency: Option<Currency>,
    /// New FX rate (stored at 6 decimal places).
    pub fx_rate: Option<Decimal>,
    /// New payer.
    pub paid_by: Option<UserId>,
    /// New date.
    pub date: Option<NaiveDate>,
}

impl ExpensePatch {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category_id.is_none()
            && self.amount_original.is_none()
            && self.currency.is_none()
            && self.fx_rate.is_none()
            && self.paid_by.is_none()
            && self.date.is_none()
    }

    /// Merges this patch into the expense row.
    pub fn apply_to(&self, expense: &mut Expense) {
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
        if let Some(category_id) = self.category_id {
            expense.category_id = category_id;
        }
        if let Some(amount) = self.amount_original {
            expense.amount_original = amount;
        }
        if let Some(currency) = self.currency {
            expense.currency = currency;
        }
        if let Some(rate) = self.fx_rate {
            expense.fx_rate_used = round_rate(rate);
        }
        if let Some(paid_by) = self.paid_by {
            expense.paid_by = paid_by;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }

        if self.amount_original.is_some() || self.currency.is_some() || self.fx_rate.is_some() {
            expense.recompute_ars();
        }
    }
}

/// A partial update for an [`ExpenseTemplate`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemplatePatch {
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category_id: Option<CategoryId>,
    /// New original-currency amount.
    pub amount_original: Option<Decimal>,
    /// New currency.
    pub currency: Option<Currency>,
    /// New default FX rate (stored at 6 decimal places).
    pub fx_rate: Option<Decimal>,
    /// New payer.
    pub paid_by: Option<UserId>,
    /// New day of month for generated rows.
    pub day_of_month: Option<u32>,
}

impl TemplatePatch {
    /// True when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category_id.is_none()
            && self.amount_original.is_none()
            && self.currency.is_none()
            && self.fx_rate.is_none()
            && self.paid_by.is_none()
            && self.day_of_month.is_none()
    }

    /// Merges this patch into the template.
    pub fn apply_to(&self, template: &mut ExpenseTemplate) {
        if let Some(description) = &self.description {
            template.description = description.clone();
        }
        if let Some(category_id) = self.category_id {
            template.category_id = category_id;
        }
        if let Some(amount) = self.amount_original {
            template.amount_original = amount;
        }
        if let Some(currency) = self.currency {
            template.currency = currency;
        }
        if let Some(rate) = self.fx_rate {
            template.fx_rate = round_rate(rate);
        }
        if let Some(paid_by) = self.paid_by {
            template.paid_by = paid_by;
        }
        if let Some(day) = self.day_of_month {
            template.day_of_month = day;
        }
    }
}
