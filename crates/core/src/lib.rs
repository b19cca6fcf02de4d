//! Financial computation engine for Hogar.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. It consumes plain data records (expense rows, template rows,
//! exchange-rate rows) and returns computed values and write plans; fetching,
//! filtering, and persisting those records is the caller's job.
//!
//! # Modules
//!
//! - `money` - Exact decimal arithmetic and ARS conversion
//! - `month` - Calendar month keys and offset/diff/clamping utilities
//! - `schedule` - Installment amount schedules with exact-sum guarantee
//! - `expense` - Typed expense, template, and category records
//! - `fx` - Monthly exchange rate pinning and resolution
//! - `recurring` - Idempotent materialization of recurring expenses
//! - `installment` - Lazy installment series generation and scoped edits
//! - `settlement` - Income-proportional settlement and balancing transfer

pub mod expense;
pub mod fx;
pub mod installment;
pub mod money;
pub mod month;
pub mod recurring;
pub mod schedule;
pub mod settlement;
