//! Reports
//!
//! Aggregations over recorded expenses.

pub mod summary;

pub use summary::{summarize, CategorySpending, CategorySummary, CategoryTotals};
