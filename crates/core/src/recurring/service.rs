//! Recurring expense materialization.

use std::collections::{HashMap, HashSet};

use hogar_shared::types::{ExpenseId, HouseholdId, TemplateId, UserId};
use tracing::{debug, warn};

use super::types::{MaterializationOutcome, TemplatePropagation};
use crate::expense::{Category, Expense, ExpenseOrigin, ExpenseTemplate, TemplatePatch};
use crate::fx::{resolve_rate, MonthlyRate};
use crate::money::to_ars;
use crate::month::Month;

/// Materializes recurring templates into concrete expense rows.
///
/// Pure business logic over injected data: the caller fetches the month's
/// templates, already-generated rows, pinned rates, and categories, and
/// persists the returned plan.
pub struct RecurringService;

impl RecurringService {
    /// Generates the target month's rows for the given templates.
    ///
    /// Safe to call repeatedly: templates that already have a generated row
    /// for the month are skipped. Templates with an archived category or no
    /// resolvable household are skipped with a warning; one broken template
    /// never blocks the others.
    ///
    /// A template only ever produces a row for the requested month, so
    /// months before the template existed are never backfilled.
    #[must_use]
    pub fn materialize_month(
        month: Month,
        templates: &[ExpenseTemplate],
        existing: &[Expense],
        monthly_rates: &[MonthlyRate],
        categories: &[Category],
        household_by_payer: &HashMap<UserId, HouseholdId>,
    ) -> MaterializationOutcome {
        let categories_by_id: HashMap<_, _> = categories.iter().map(|c| (c.id, c)).collect();
        let already_generated: HashSet<TemplateId> = existing
            .iter()
            .filter(|e| e.month == month)
            .filter_map(|e| e.origin.template_id())
            .collect();

        let mut outcome = MaterializationOutcome::default();

        for template in templates {
            if !template.is_active {
                debug!(template_id = %template.id, "skipping inactive template");
                continue;
            }

            if already_generated.contains(&template.id) {
                debug!(template_id = %template.id, %month, "row already generated");
                continue;
            }

            if let Some(category) = categories_by_id.get(&template.category_id) {
                if category.is_archived {
                    let message = format!(
                        "Skipped recurring expense '{}': category '{}' is archived",
                        template.description, category.name
                    );
                    warn!(template_id = %template.id, "{message}");
                    outcome.warnings.push(message);
                    continue;
                }
            }

            let Some(household_id) = template
                .household_id
                .or_else(|| household_by_payer.get(&template.paid_by).copied())
            else {
                let message = format!(
                    "Skipped recurring expense '{}': no household could be resolved",
                    template.description
                );
                warn!(template_id = %template.id, "{message}");
                outcome.warnings.push(message);
                continue;
            };

            let fx_rate_used =
                resolve_rate(template.currency, month, monthly_rates, template.fx_rate);

            outcome.created.push(Expense {
                id: ExpenseId::new(),
                month,
                date: month.date_on_day(template.day_of_month),
                description: template.description.clone(),
                category_id: template.category_id,
                amount_original: template.amount_original,
                amount_ars: to_ars(template.amount_original, fx_rate_used),
                currency: template.currency,
                fx_rate_used,
                household_id: Some(household_id),
                paid_by: template.paid_by,
                origin: ExpenseOrigin::Fixed {
                    template_id: template.id,
                },
            });
        }

        outcome
    }

    /// Applies a template edit and propagates it to not-yet-past rows.
    ///
    /// Every generated row with `month > from_month` is rewritten to the new
    /// description, category, amount, currency, FX rate, and payer, with the
    /// date recomputed from the new day-of-month against each row's own
    /// month. The caller applies the returned plan in one transaction.
    #[must_use]
    pub fn apply_template_values_to_future(
        template: &ExpenseTemplate,
        patch: &TemplatePatch,
        generated_rows: &[Expense],
        from_month: Month,
    ) -> TemplatePropagation {
        let mut updated = template.clone();
        patch.apply_to(&mut updated);

        let row_updates = generated_rows
            .iter()
            .filter(|row| row.origin.template_id() == Some(template.id))
            .filter(|row| row.month > from_month)
            .map(|row| {
                let mut rewritten = row.clone();
                rewritten.description = updated.description.clone();
                rewritten.category_id = updated.category_id;
                rewritten.amount_original = updated.amount_original;
                rewritten.currency = updated.currency;
                rewritten.fx_rate_used = updated.fx_rate;
                rewritten.paid_by = updated.paid_by;
                rewritten.date = row.month.date_on_day(updated.day_of_month);
                rewritten.recompute_ars();
                rewritten
            })
            .collect();

        TemplatePropagation {
            template: updated,
            row_updates,
        }
    }
}
