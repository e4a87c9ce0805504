//! Expense service
//!
//! The persist-and-aggregate pipeline: record expenses and summarize them by
//! category. Every summary re-reads the expense file, so a record appended
//! just before is always included.

use chrono::NaiveDate;

use crate::error::TrackerResult;
use crate::models::Expense;
use crate::reports::{summarize, CategorySummary, CategoryTotals};
use crate::storage::ExpenseStore;

/// Service for recording and summarizing expenses
pub struct ExpenseService<'a> {
    store: &'a ExpenseStore,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a ExpenseStore) -> Self {
        Self { store }
    }

    /// Record a new expense
    pub fn record(&self, expense: &Expense) -> TrackerResult<()> {
        self.store.append(expense)
    }

    /// Category totals for an inclusive date range
    pub fn totals(&self, start: NaiveDate, end: NaiveDate) -> TrackerResult<CategoryTotals> {
        let expenses = self.store.load_all()?;
        Ok(summarize(&expenses, start, end))
    }

    /// Full category report for an inclusive date range
    pub fn report(&self, start: NaiveDate, end: NaiveDate) -> TrackerResult<CategorySummary> {
        let expenses = self.store.load_all()?;
        Ok(CategorySummary::generate(&expenses, start, end))
    }
}
