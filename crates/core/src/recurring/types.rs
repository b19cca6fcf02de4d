//! Materialization output types.

use serde::Serialize;

use crate::expense::{Expense, ExpenseTemplate};

/// The write plan produced by one materialization pass.
///
/// `created` rows are inserted by the caller in a single transaction, with
/// skip-on-conflict semantics on the storage uniqueness constraint, so a
/// concurrent duplicate invocation cannot double-insert. `warnings` describe
/// rows that could not be produced; they are surfaced to the caller but are
/// not request failures.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaterializationOutcome {
    /// Rows to insert.
    pub created: Vec<Expense>,
    /// Non-fatal problems encountered, one message per skipped item.
    pub warnings: Vec<String>,
}

impl MaterializationOutcome {
    /// True when nothing was produced and nothing went wrong.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.warnings.is_empty()
    }
}

/// The write plan for propagating template edits forward.
///
/// Applied by the caller as one transaction: the template update and every
/// row rewrite succeed or fail together.
#[derive(Debug, Clone, Serialize)]
pub struct TemplatePropagation {
    /// The template with the patch applied.
    pub template: ExpenseTemplate,
    /// Already-generated rows rewritten to the new template values.
    pub row_updates: Vec<Expense>,
}
