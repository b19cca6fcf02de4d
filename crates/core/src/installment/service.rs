//! Installment series materialization and scoped edits.

use std::collections::BTreeMap;

use chrono::Datelike;
use hogar_shared::types::{ExpenseId, InstallmentSeriesId};
use tracing::{debug, warn};

use super::error::InstallmentError;
use super::types::{ApplyScope, InstallmentChange, SeriesRewrite};
use crate::expense::{Expense, ExpenseOrigin, InstallmentSource};
use crate::money::{round_rate, to_ars};
use crate::month::Month;
use crate::recurring::MaterializationOutcome;
use crate::schedule::{EntryMode, EntryModeKind, InstallmentScheduler, ScheduleInput};

/// Materializes installment series rows and propagates scoped edits.
///
/// The series schedule is always recomputed from the anchor row, so the same
/// series state produces the same amounts no matter when or how often a month
/// is materialized.
pub struct InstallmentService;

impl InstallmentService {
    /// Lazily generates the target month's row for each series.
    ///
    /// A series is skipped silently when the target month falls outside
    /// `[1, total]` or already has a row; it is skipped with a warning when
    /// its schedule basis or household context cannot be recovered. The
    /// caller inserts the plan with skip-duplicates semantics, so concurrent
    /// calls cannot create two rows for the same series and month.
    #[must_use]
    pub fn ensure_for_month(month: Month, series_rows: &[Expense]) -> MaterializationOutcome {
        let mut groups: BTreeMap<InstallmentSeriesId, Vec<&Expense>> = BTreeMap::new();
        for row in series_rows {
            if let Some(series_id) = row.origin.series_id() {
                groups.entry(series_id).or_default().push(row);
            }
        }

        let mut outcome = MaterializationOutcome::default();

        for (series_id, rows) in groups {
            match Self::next_row_for_series(month, series_id, &rows) {
                Ok(Some(row)) => outcome.created.push(row),
                Ok(None) => {}
                Err(message) => {
                    warn!(%series_id, "{message}");
                    outcome.warnings.push(message);
                }
            }
        }

        outcome
    }

    /// Computes the row to generate for one series, if any.
    ///
    /// `Err` carries a warning message; `Ok(None)` means there is nothing to
    /// generate for this month.
    fn next_row_for_series(
        month: Month,
        series_id: InstallmentSeriesId,
        rows: &[&Expense],
    ) -> Result<Option<Expense>, String> {
        let Some(anchor) = Self::anchor_of(rows) else {
            return Ok(None);
        };
        let ExpenseOrigin::Installment {
            number,
            total,
            amount,
            source,
            original_total,
            ..
        } = &anchor.origin
        else {
            return Ok(None);
        };

        let target = i64::from(*number) + i64::from(anchor.month.diff(month));
        if target < 1 || target > i64::from(*total) {
            debug!(%series_id, %month, target, "month outside series range");
            return Ok(None);
        }
        if rows.iter().any(|r| r.month == month) {
            debug!(%series_id, %month, "installment row already exists");
            return Ok(None);
        }

        let entry = match source {
            InstallmentSource::PerInstallment => EntryMode::PerInstallment(*amount),
            InstallmentSource::Total => match original_total {
                Some(basis) => EntryMode::Total(*basis),
                None => {
                    return Err(format!(
                        "Skipped installment series '{}': total-mode series has no original total",
                        anchor.description
                    ));
                }
            },
        };
        let input = ScheduleInput {
            count: *total,
            entry,
        };
        let schedule = InstallmentScheduler::compute(&input).map_err(|e| {
            format!(
                "Skipped installment series '{}': {e}",
                anchor.description
            )
        })?;

        // Carry descriptive fields from the most recent row before the target
        // month, falling back to the anchor.
        let carry = rows
            .iter()
            .filter(|r| r.month < month)
            .max_by_key(|r| r.month)
            .copied()
            .unwrap_or(anchor);

        let Some(household_id) = carry.household_id else {
            return Err(format!(
                "Skipped installment series '{}': no household could be resolved",
                carry.description
            ));
        };

        let Ok(target_number) = u32::try_from(target) else {
            return Ok(None);
        };
        let Some(installment_amount) = schedule.amounts.get(target_number as usize - 1).copied()
        else {
            return Ok(None);
        };

        let row = Expense {
            id: ExpenseId::new(),
            month,
            date: month.date_on_day(carry.date.day()),
            description: carry.description.clone(),
            category_id: carry.category_id,
            amount_original: installment_amount,
            amount_ars: to_ars(installment_amount, carry.fx_rate_used),
            currency: carry.currency,
            fx_rate_used: carry.fx_rate_used,
            household_id: Some(household_id),
            paid_by: carry.paid_by,
            origin: ExpenseOrigin::Installment {
                series_id,
                number: target_number,
                total: *total,
                amount: installment_amount,
                source: *source,
                original_total: *original_total,
                created_from_series: true,
            },
        };
        Ok(Some(row))
    }

    /// Propagates an edit across an installment series according to scope.
    ///
    /// `Single` rewrites only the targeted row, the same path as a plain
    /// expense update. `Future` and `All` recompute the schedule from the new
    /// count/mode/amount (falling back to the anchor's current values), then
    /// rewrite each selected row's amount from it; rows whose number exceeds
    /// the new total are deleted. This is the only path that can shrink or
    /// grow a series.
    ///
    /// # Errors
    ///
    /// Returns `InstallmentError` when a month change or installment-disable
    /// is combined with a non-single scope, the row is not part of a series,
    /// or the new schedule inputs are invalid.
    pub fn propagate_update(
        existing: &Expense,
        series_rows: &[Expense],
        change: &InstallmentChange,
        scope: ApplyScope,
    ) -> Result<SeriesRewrite, InstallmentError> {
        if scope == ApplyScope::Single {
            return Ok(Self::single_row_rewrite(existing, change));
        }
        if change.month.is_some() {
            return Err(InstallmentError::MonthChangeRequiresSingleScope);
        }
        if change.disable_installment {
            return Err(InstallmentError::DisableRequiresSingleScope);
        }

        let Some(series_id) = existing.origin.series_id() else {
            return Err(InstallmentError::NotASeriesRow(existing.id));
        };
        let rows: Vec<&Expense> = series_rows
            .iter()
            .filter(|r| r.origin.series_id() == Some(series_id))
            .collect();
        let anchor =
            Self::anchor_of(&rows).ok_or(InstallmentError::EmptySeries(series_id))?;
        let ExpenseOrigin::Installment {
            total: anchor_total,
            amount: anchor_amount,
            source: anchor_source,
            original_total: anchor_original_total,
            ..
        } = &anchor.origin
        else {
            return Err(InstallmentError::NotASeriesRow(anchor.id));
        };

        let new_count = change.count.unwrap_or(*anchor_total);
        let mode = change.entry_mode.unwrap_or(match anchor_source {
            InstallmentSource::PerInstallment => EntryModeKind::PerInstallment,
            InstallmentSource::Total => EntryModeKind::Total,
        });
        let per_fallback = matches!(anchor_source, InstallmentSource::PerInstallment)
            .then_some(*anchor_amount);
        let input = ScheduleInput::from_parts(
            new_count,
            mode,
            change.per_installment_amount.or(per_fallback),
            change.total_amount.or(*anchor_original_total),
        )?;
        let schedule = InstallmentScheduler::compute(&input)?;

        let (new_source, new_original_total) = match input.entry {
            EntryMode::PerInstallment(_) => (InstallmentSource::PerInstallment, None),
            EntryMode::Total(basis) => (InstallmentSource::Total, Some(basis)),
        };

        let mut rewrite = SeriesRewrite::default();
        for row in rows {
            if scope == ApplyScope::Future && row.month < existing.month {
                continue;
            }
            let ExpenseOrigin::Installment {
                number,
                created_from_series,
                ..
            } = &row.origin
            else {
                continue;
            };
            let (number, created_from_series) = (*number, *created_from_series);

            if !(1..=new_count).contains(&number) {
                rewrite.deletes.push(row.id);
                continue;
            }

            let new_amount = schedule.amounts[number as usize - 1];
            let mut updated = row.clone();
            Self::apply_shared_fields(&mut updated, change);
            updated.amount_original = new_amount;
            updated.origin = ExpenseOrigin::Installment {
                series_id,
                number,
                total: new_count,
                amount: new_amount,
                source: new_source,
                original_total: new_original_total,
                created_from_series,
            };
            updated.recompute_ars();
            rewrite.updates.push(updated);
        }

        Ok(rewrite)
    }

    /// Computes the row ids a scoped delete removes.
    ///
    /// `Single` deletes the one row; `All` the whole series; `Future` the row
    /// and every later row, leaving earlier installments intact. A non-series
    /// row always deletes as `Single`.
    #[must_use]
    pub fn propagate_delete(
        existing: &Expense,
        series_rows: &[Expense],
        scope: ApplyScope,
    ) -> Vec<ExpenseId> {
        let Some(series_id) = existing.origin.series_id() else {
            return vec![existing.id];
        };
        match scope {
            ApplyScope::Single => vec![existing.id],
            ApplyScope::Future => series_rows
                .iter()
                .filter(|r| r.origin.series_id() == Some(series_id))
                .filter(|r| r.month >= existing.month)
                .map(|r| r.id)
                .collect(),
            ApplyScope::All => series_rows
                .iter()
                .filter(|r| r.origin.series_id() == Some(series_id))
                .map(|r| r.id)
                .collect(),
        }
    }

    /// The chronologically-first row of a series.
    fn anchor_of<'a>(rows: &[&'a Expense]) -> Option<&'a Expense> {
        rows.iter()
            .min_by_key(|r| {
                (
                    r.month,
                    r.origin.installment_number().unwrap_or(u32::MAX),
                )
            })
            .copied()
    }

    /// A single-row rewrite, the same path as a plain expense update.
    fn single_row_rewrite(existing: &Expense, change: &InstallmentChange) -> SeriesRewrite {
        let mut row = existing.clone();
        change.patch.apply_to(&mut row);
        if let Some(new_month) = change.month {
            row.month = new_month;
            row.date = new_month.date_on_day(row.date.day());
        }
        if change.disable_installment {
            row.origin = ExpenseOrigin::OneTime;
        }
        SeriesRewrite {
            updates: vec![row],
            deletes: vec![],
        }
    }

    /// Applies the shared row fields of a series-wide change.
    ///
    /// The date, when present, is reinterpreted as a day-of-month against
    /// each row's own month; amounts come from the recomputed schedule, not
    /// the patch.
    fn apply_shared_fields(row: &mut Expense, change: &InstallmentChange) {
        if let Some(description) = &change.patch.description {
            row.description = description.clone();
        }
        if let Some(category_id) = change.patch.category_id {
            row.category_id = category_id;
        }
        if let Some(paid_by) = change.patch.paid_by {
            row.paid_by = paid_by;
        }
        if let Some(currency) = change.patch.currency {
            row.currency = currency;
        }
        if let Some(rate) = change.patch.fx_rate {
            row.fx_rate_used = round_rate(rate);
        }
        if let Some(date) = change.patch.date {
            row.date = row.month.date_on_day(date.day());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpensePatch;
    use chrono::NaiveDate;
    use hogar_shared::types::{CategoryId, HouseholdId, UserId};
    use hogar_shared::Currency;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap()
    }

    struct SeriesFixture {
        series_id: InstallmentSeriesId,
        household_id: HouseholdId,
        category_id: CategoryId,
        paid_by: UserId,
    }

    impl SeriesFixture {
        fn new() -> Self {
            Self {
                series_id: InstallmentSeriesId::new(),
                household_id: HouseholdId::new(),
                category_id: CategoryId::new(),
                paid_by: UserId::new(),
            }
        }

        fn row(
            &self,
            month_key: &str,
            number: u32,
            total: u32,
            amount: Decimal,
            source: InstallmentSource,
            original_total: Option<Decimal>,
        ) -> Expense {
            let m = month(month_key);
            Expense {
                id: ExpenseId::new(),
                month: m,
                date: m.date_on_day(15),
                description: "TV 3 cuotas".to_string(),
                category_id: self.category_id,
                amount_original: amount,
                amount_ars: to_ars(amount, dec!(1.000000)),
                currency: Currency::Ars,
                fx_rate_used: dec!(1.000000),
                household_id: Some(self.household_id),
                paid_by: self.paid_by,
                origin: ExpenseOrigin::Installment {
                    series_id: self.series_id,
                    number,
                    total,
                    amount,
                    source,
                    original_total,
                    created_from_series: number != 1,
                },
            }
        }

        /// Anchor of a 3-installment total-mode series over 100.00.
        fn total_mode_anchor(&self) -> Expense {
            self.row(
                "2026-01",
                1,
                3,
                dec!(33.33),
                InstallmentSource::Total,
                Some(dec!(100)),
            )
        }
    }

    #[test]
    fn test_lazy_generation_next_month() {
        let fixture = SeriesFixture::new();
        let rows = vec![fixture.total_mode_anchor()];

        let outcome = InstallmentService::ensure_for_month(month("2026-02"), &rows);

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.created.len(), 1);
        let row = &outcome.created[0];
        assert_eq!(row.month, month("2026-02"));
        assert_eq!(row.amount_original, dec!(33.33));
        assert_eq!(row.origin.installment_number(), Some(2));
        assert_eq!(row.origin.series_id(), Some(fixture.series_id));
        assert!(row.ars_consistent());
        match &row.origin {
            ExpenseOrigin::Installment {
                created_from_series,
                original_total,
                ..
            } => {
                assert!(created_from_series);
                assert_eq!(*original_total, Some(dec!(100)));
            }
            other => panic!("expected installment origin, got {other:?}"),
        }
    }

    #[test]
    fn test_last_installment_absorbs_remainder() {
        let fixture = SeriesFixture::new();
        let rows = vec![
            fixture.total_mode_anchor(),
            fixture.row(
                "2026-02",
                2,
                3,
                dec!(33.33),
                InstallmentSource::Total,
                Some(dec!(100)),
            ),
        ];

        let outcome = InstallmentService::ensure_for_month(month("2026-03"), &rows);

        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.created[0].amount_original, dec!(33.34));
    }

    #[test]
    fn test_no_generation_outside_series_range() {
        let fixture = SeriesFixture::new();
        let rows = vec![fixture.total_mode_anchor()];

        // Before the anchor
        let before = InstallmentService::ensure_for_month(month("2025-12"), &rows);
        assert!(before.is_empty());

        // After the last installment (anchor month + 2 is the last of 3)
        let after = InstallmentService::ensure_for_month(month("2026-04"), &rows);
        assert!(after.is_empty());
    }

    #[test]
    fn test_idempotent_when_row_exists() {
        let fixture = SeriesFixture::new();
        let mut rows = vec![fixture.total_mode_anchor()];
        let first = InstallmentService::ensure_for_month(month("2026-02"), &rows);
        rows.extend(first.created);

        let second = InstallmentService::ensure_for_month(month("2026-02"), &rows);
        assert!(second.is_empty());
    }

    #[test]
    fn test_carry_forward_from_most_recent_prior_row() {
        let fixture = SeriesFixture::new();
        let anchor = fixture.total_mode_anchor();
        let mut second = fixture.row(
            "2026-02",
            2,
            3,
            dec!(33.33),
            InstallmentSource::Total,
            Some(dec!(100)),
        );
        second.description = "TV 3 cuotas (tarjeta nueva)".to_string();
        let new_payer = UserId::new();
        second.paid_by = new_payer;

        let outcome =
            InstallmentService::ensure_for_month(month("2026-03"), &[anchor, second]);

        let row = &outcome.created[0];
        assert_eq!(row.description, "TV 3 cuotas (tarjeta nueva)");
        assert_eq!(row.paid_by, new_payer);
    }

    #[test]
    fn test_per_installment_mode_generation() {
        let fixture = SeriesFixture::new();
        let anchor = fixture.row(
            "2026-01",
            1,
            12,
            dec!(10),
            InstallmentSource::PerInstallment,
            None,
        );

        let outcome = InstallmentService::ensure_for_month(month("2026-06"), &[anchor]);

        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.created[0].amount_original, dec!(10.00));
        assert_eq!(outcome.created[0].origin.installment_number(), Some(6));
    }

    #[test]
    fn test_missing_household_warns_and_skips() {
        let fixture = SeriesFixture::new();
        let mut anchor = fixture.total_mode_anchor();
        anchor.household_id = None;

        let outcome = InstallmentService::ensure_for_month(month("2026-02"), &[anchor]);

        assert!(outcome.created.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("household"));
    }

    #[test]
    fn test_total_mode_without_basis_warns() {
        let fixture = SeriesFixture::new();
        let anchor = fixture.row(
            "2026-01",
            1,
            3,
            dec!(33.33),
            InstallmentSource::Total,
            None,
        );

        let outcome = InstallmentService::ensure_for_month(month("2026-02"), &[anchor]);

        assert!(outcome.created.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("original total"));
    }

    #[test]
    fn test_one_broken_series_does_not_block_others() {
        let broken = SeriesFixture::new();
        let mut broken_anchor = broken.total_mode_anchor();
        broken_anchor.household_id = None;

        let healthy = SeriesFixture::new();
        let healthy_anchor = healthy.total_mode_anchor();

        let outcome = InstallmentService::ensure_for_month(
            month("2026-02"),
            &[broken_anchor, healthy_anchor],
        );

        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(
            outcome.created[0].origin.series_id(),
            Some(healthy.series_id)
        );
    }

    #[test]
    fn test_single_scope_rewrites_one_row() {
        let fixture = SeriesFixture::new();
        let rows = vec![
            fixture.total_mode_anchor(),
            fixture.row(
                "2026-02",
                2,
                3,
                dec!(33.33),
                InstallmentSource::Total,
                Some(dec!(100)),
            ),
        ];

        let change = InstallmentChange {
            patch: ExpensePatch {
                description: Some("TV (ajustado)".to_string()),
                ..ExpensePatch::default()
            },
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[1], &rows, &change, ApplyScope::Single)
                .unwrap();

        assert_eq!(rewrite.updates.len(), 1);
        assert!(rewrite.deletes.is_empty());
        assert_eq!(rewrite.updates[0].id, rows[1].id);
        assert_eq!(rewrite.updates[0].description, "TV (ajustado)");
        // Schedule fields untouched
        assert_eq!(rewrite.updates[0].amount_original, dec!(33.33));
    }

    #[test]
    fn test_single_scope_month_move() {
        let fixture = SeriesFixture::new();
        let rows = vec![fixture.total_mode_anchor()];

        let change = InstallmentChange {
            month: Some(month("2026-04")),
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::Single)
                .unwrap();

        assert_eq!(rewrite.updates[0].month, month("2026-04"));
        assert_eq!(
            rewrite.updates[0].date,
            NaiveDate::from_ymd_opt(2026, 4, 15).unwrap()
        );
    }

    #[test]
    fn test_single_scope_disable_installment() {
        let fixture = SeriesFixture::new();
        let rows = vec![fixture.total_mode_anchor()];

        let change = InstallmentChange {
            disable_installment: true,
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::Single)
                .unwrap();

        assert_eq!(rewrite.updates[0].origin, ExpenseOrigin::OneTime);
    }

    #[test]
    fn test_month_change_rejected_for_series_scope() {
        let fixture = SeriesFixture::new();
        let rows = vec![fixture.total_mode_anchor()];

        let change = InstallmentChange {
            month: Some(month("2026-04")),
            ..InstallmentChange::default()
        };
        let err =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::Future)
                .unwrap_err();
        assert_eq!(err, InstallmentError::MonthChangeRequiresSingleScope);
    }

    #[test]
    fn test_disable_rejected_for_series_scope() {
        let fixture = SeriesFixture::new();
        let rows = vec![fixture.total_mode_anchor()];

        let change = InstallmentChange {
            disable_installment: true,
            ..InstallmentChange::default()
        };
        let err = InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::All)
            .unwrap_err();
        assert_eq!(err, InstallmentError::DisableRequiresSingleScope);
    }

    #[test]
    fn test_series_scope_on_plain_expense_rejected() {
        let fixture = SeriesFixture::new();
        let mut plain = fixture.total_mode_anchor();
        plain.origin = ExpenseOrigin::OneTime;

        let change = InstallmentChange::default();
        let err = InstallmentService::propagate_update(
            &plain,
            std::slice::from_ref(&plain),
            &change,
            ApplyScope::Future,
        )
        .unwrap_err();
        assert_eq!(err, InstallmentError::NotASeriesRow(plain.id));
    }

    fn three_row_series(fixture: &SeriesFixture) -> Vec<Expense> {
        vec![
            fixture.total_mode_anchor(),
            fixture.row(
                "2026-02",
                2,
                3,
                dec!(33.33),
                InstallmentSource::Total,
                Some(dec!(100)),
            ),
            fixture.row(
                "2026-03",
                3,
                3,
                dec!(33.34),
                InstallmentSource::Total,
                Some(dec!(100)),
            ),
        ]
    }

    #[test]
    fn test_future_scope_rewrites_from_target_month() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let change = InstallmentChange {
            total_amount: Some(dec!(120)),
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[1], &rows, &change, ApplyScope::Future)
                .unwrap();

        // Row 1 (2026-01) is before the target month and stays untouched
        assert_eq!(rewrite.updates.len(), 2);
        assert!(rewrite.deletes.is_empty());
        for updated in &rewrite.updates {
            assert!(updated.month >= month("2026-02"));
            assert_eq!(updated.amount_original, dec!(40.00));
            assert!(updated.ars_consistent());
        }
    }

    #[test]
    fn test_all_scope_rewrites_whole_series() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let change = InstallmentChange {
            total_amount: Some(dec!(120)),
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[1], &rows, &change, ApplyScope::All)
                .unwrap();

        assert_eq!(rewrite.updates.len(), 3);
        assert_eq!(
            rewrite.updates.iter().map(|r| r.amount_original).sum::<Decimal>(),
            dec!(120.00)
        );
    }

    #[test]
    fn test_shrinking_series_deletes_excess_rows() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let change = InstallmentChange {
            count: Some(2),
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::All)
                .unwrap();

        // 100 over 2 installments: 50 each; row 3 exceeds the new length
        assert_eq!(rewrite.updates.len(), 2);
        assert_eq!(rewrite.deletes, vec![rows[2].id]);
        for updated in &rewrite.updates {
            assert_eq!(updated.amount_original, dec!(50.00));
            match &updated.origin {
                ExpenseOrigin::Installment { total, .. } => assert_eq!(*total, 2),
                other => panic!("expected installment origin, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_growing_series_rewrites_amounts() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let change = InstallmentChange {
            count: Some(4),
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::All)
                .unwrap();

        // Existing three rows move to the 4-installment schedule; the fourth
        // row appears later through lazy generation.
        assert_eq!(rewrite.updates.len(), 3);
        assert!(rewrite.deletes.is_empty());
        for updated in &rewrite.updates {
            assert_eq!(updated.amount_original, dec!(25.00));
        }
    }

    #[test]
    fn test_mode_switch_to_per_installment() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let change = InstallmentChange {
            entry_mode: Some(EntryModeKind::PerInstallment),
            per_installment_amount: Some(dec!(45)),
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::All)
                .unwrap();

        for updated in &rewrite.updates {
            assert_eq!(updated.amount_original, dec!(45.00));
            match &updated.origin {
                ExpenseOrigin::Installment {
                    source,
                    original_total,
                    ..
                } => {
                    assert_eq!(*source, InstallmentSource::PerInstallment);
                    assert_eq!(*original_total, None);
                }
                other => panic!("expected installment origin, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_mode_switch_without_amount_fails() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        // Anchor is total mode, so there is no per-installment fallback
        let change = InstallmentChange {
            entry_mode: Some(EntryModeKind::PerInstallment),
            ..InstallmentChange::default()
        };
        let err =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::All)
                .unwrap_err();
        assert!(matches!(
            err,
            InstallmentError::Schedule(crate::schedule::ScheduleError::MissingAmount { .. })
        ));
    }

    #[test]
    fn test_lazy_generation_after_rewrite_uses_new_schedule() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let change = InstallmentChange {
            total_amount: Some(dec!(200)),
            count: Some(4),
            ..InstallmentChange::default()
        };
        let rewrite =
            InstallmentService::propagate_update(&rows[0], &rows, &change, ApplyScope::All)
                .unwrap();

        let outcome = InstallmentService::ensure_for_month(month("2026-04"), &rewrite.updates);
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.created[0].amount_original, dec!(50.00));
        assert_eq!(outcome.created[0].origin.installment_number(), Some(4));
    }

    #[test]
    fn test_delete_single() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let deleted =
            InstallmentService::propagate_delete(&rows[1], &rows, ApplyScope::Single);
        assert_eq!(deleted, vec![rows[1].id]);
    }

    #[test]
    fn test_delete_future_leaves_earlier_rows() {
        let fixture = SeriesFixture::new();
        let rows = three_row_series(&fixture);

        let deleted =
            InstallmentService::propagate_delete(&rows[1], &rows, ApplyScope::Future);
        assert_eq!(deleted, vec![rows[1].id, rows[2].id]);
    }

    #[test]
    fn test_delete_all_removes_whole_series() {
        let fixture = SeriesFixture::new();
        let other = SeriesFixture::new();
        let mut rows = three_row_series(&fixture);
        rows.push(other.total_mode_anchor());

        let deleted = InstallmentService::propagate_delete(&rows[0], &rows, ApplyScope::All);
        assert_eq!(deleted.len(), 3);
        assert!(!deleted.contains(&rows[3].id));
    }

    #[test]
    fn test_delete_plain_expense_is_always_single() {
        let fixture = SeriesFixture::new();
        let mut plain = fixture.total_mode_anchor();
        plain.origin = ExpenseOrigin::OneTime;

        let deleted = InstallmentService::propagate_delete(
            &plain,
            std::slice::from_ref(&plain),
            ApplyScope::All,
        );
        assert_eq!(deleted, vec![plain.id]);
    }
}
