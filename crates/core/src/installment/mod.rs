//! Lazy installment series generation and scoped edits.
//!
//! An installment series is a virtual grouping of expense rows sharing an
//! `InstallmentSeriesId`, anchored by its lowest-month row. The next row of a
//! series is generated lazily when a month is read; edits and deletes can be
//! scoped to a single row, the rest of the series, or the whole series.

pub mod error;
pub mod service;
pub mod types;

pub use error::InstallmentError;
pub use service::InstallmentService;
pub use types::{ApplyScope, InstallmentChange, SeriesRewrite};
