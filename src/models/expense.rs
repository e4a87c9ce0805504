//! Expense model
//!
//! One recorded outflow. Expenses are never edited in place; a correction is
//! a new entry.

use chrono::NaiveDate;
use std::fmt;

use super::category::Category;

/// A single expense record
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    name: String,
    amount: f64,
    /// Free text at the storage layer; see [`Category`] for the entry-time set
    category: String,
    date: NaiveDate,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        name: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            amount,
            category: category.into(),
            date,
        }
    }

    /// Create an expense in one of the offered categories
    pub fn categorized(
        name: impl Into<String>,
        amount: f64,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self::new(name, amount, category.name(), date)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Check if the expense falls within an inclusive date range
    pub fn is_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.date && self.date <= end
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {:.2}, {}, {}",
            self.name,
            self.amount,
            self.category,
            self.date.format("%Y-%m-%d")
        )
    }
}
