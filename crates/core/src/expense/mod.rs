//! Typed expense, template, and category records.
//!
//! These are the plain data records the engine consumes and produces. The
//! one-time / fixed / installment shapes are a tagged union so illegal
//! combinations (an expense that is both template-generated and part of an
//! installment series) are unrepresentable.

pub mod patch;
pub mod types;

pub use patch::{ExpensePatch, TemplatePatch};
pub use types::{
    Category, Expense, ExpenseOrigin, ExpenseTemplate, InstallmentSource,
};
