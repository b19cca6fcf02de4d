//! Expense domain records.

use chrono::NaiveDate;
use hogar_shared::types::{
    CategoryId, ExpenseId, HouseholdId, InstallmentSeriesId, TemplateId, UserId,
};
use hogar_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::to_ars;
use crate::month::Month;

/// Which entry mode anchored an installment series' schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstallmentSource {
    /// The series was entered as a total amount split across installments.
    Total,
    /// The series was entered as a fixed amount per installment.
    PerInstallment,
}

/// How an expense row came to exist.
///
/// The three shapes are mutually exclusive by construction: a row is a
/// one-time entry, generated from a recurring template, or part of an
/// installment series, never more than one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpenseOrigin {
    /// A plain one-time expense.
    OneTime,
    /// Generated from a recurring expense template.
    Fixed {
        /// The template that produced this row.
        template_id: TemplateId,
    },
    /// One row of a multi-month installment series.
    Installment {
        /// The series this row belongs to.
        series_id: InstallmentSeriesId,
        /// Position within the series, 1-based.
        number: u32,
        /// Total number of installments in the series.
        total: u32,
        /// This row's per-period amount from the schedule.
        amount: Decimal,
        /// Entry mode that anchored the series schedule.
        source: InstallmentSource,
        /// The total-mode basis; carried on every row so the schedule can be
        /// recomputed even when the anchor is gone.
        original_total: Option<Decimal>,
        /// True for rows produced by lazy generation, false for the row the
        /// user created directly.
        created_from_series: bool,
    },
}

impl ExpenseOrigin {
    /// The template id, for template-generated rows.
    #[must_use]
    pub const fn template_id(&self) -> Option<TemplateId> {
        match self {
            Self::Fixed { template_id } => Some(*template_id),
            _ => None,
        }
    }

    /// The series id, for installment rows.
    #[must_use]
    pub const fn series_id(&self) -> Option<InstallmentSeriesId> {
        match self {
            Self::Installment { series_id, .. } => Some(*series_id),
            _ => None,
        }
    }

    /// The 1-based installment number, for installment rows.
    #[must_use]
    pub const fn installment_number(&self) -> Option<u32> {
        match self {
            Self::Installment { number, .. } => Some(*number),
            _ => None,
        }
    }

    /// True for installment rows.
    #[must_use]
    pub const fn is_installment(&self) -> bool {
        matches!(self, Self::Installment { .. })
    }
}

/// A concrete expense row for one month.
///
/// `amount_ars` is always derived as `round2(amount_original * fx_rate_used)`;
/// [`Expense::ars_consistent`] checks that invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier.
    pub id: ExpenseId,
    /// The month this expense belongs to.
    pub month: Month,
    /// Concrete date within the month.
    pub date: NaiveDate,
    /// Human-readable description.
    pub description: String,
    /// Expense category.
    pub category_id: CategoryId,
    /// Amount in the original currency.
    pub amount_original: Decimal,
    /// Amount normalized to ARS.
    pub amount_ars: Decimal,
    /// Original currency.
    pub currency: Currency,
    /// The FX rate used to derive `amount_ars`.
    pub fx_rate_used: Decimal,
    /// The household this expense is scoped to, when resolvable.
    pub household_id: Option<HouseholdId>,
    /// The member who paid.
    pub paid_by: UserId,
    /// How this row came to exist.
    pub origin: ExpenseOrigin,
}

impl Expense {
    /// True when `amount_ars` matches the canonical conversion of
    /// `amount_original` at `fx_rate_used`.
    #[must_use]
    pub fn ars_consistent(&self) -> bool {
        self.amount_ars == to_ars(self.amount_original, self.fx_rate_used)
    }

    /// Recomputes `amount_ars` from the current amount and rate.
    pub fn recompute_ars(&mut self) {
        self.amount_ars = to_ars(self.amount_original, self.fx_rate_used);
    }
}

/// A recurring expense template ("fixed expense").
///
/// Drives materialization of one concrete [`Expense`] row per month until
/// deactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTemplate {
    /// Unique identifier.
    pub id: TemplateId,
    /// Human-readable description, copied onto generated rows.
    pub description: String,
    /// Expense category.
    pub category_id: CategoryId,
    /// Amount in the original currency.
    pub amount_original: Decimal,
    /// Original currency.
    pub currency: Currency,
    /// Default FX rate, used when no monthly rate is pinned.
    pub fx_rate: Decimal,
    /// The member who pays this expense.
    pub paid_by: UserId,
    /// The household this template is scoped to, when set directly.
    pub household_id: Option<HouseholdId>,
    /// Day of month for generated rows (clamped to the month's length).
    pub day_of_month: u32,
    /// Whether this template still materializes rows.
    pub is_active: bool,
}

/// The category projection the materializer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Category name, used in warnings.
    pub name: String,
    /// Archived categories stop materialization of their templates.
    pub is_archived: bool,
}
