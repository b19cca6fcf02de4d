//! Idempotent materialization of recurring expenses.
//!
//! Recurring templates are materialized lazily: a read request for a month
//! triggers generation of that month's rows. Generation is best-effort; a
//! broken template is skipped with a warning and never blocks the batch.

pub mod service;
pub mod types;

pub use service::RecurringService;
pub use types::{MaterializationOutcome, TemplatePropagation};
