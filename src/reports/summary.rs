//! Category Summary
//!
//! Totals expenses per category over an inclusive date range.

use crate::display::report::{format_bar, format_money, format_percentage, separator};
use crate::error::{TrackerError, TrackerResult};
use crate::models::Expense;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

/// Width of the bar chart column in terminal output
const BAR_WIDTH: usize = 30;

/// Accumulated amount and entry count per category label
///
/// Iteration follows the order in which categories first appear among the
/// matching expenses. Categories without matching expenses are absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: IndexMap<String, (f64, usize)>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category's running total
    pub fn add(&mut self, category: &str, amount: f64) {
        let entry = self
            .entries
            .entry(category.to_string())
            .or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    /// Total for a category, if any expense matched it
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries.get(category).map(|(total, _)| *total)
    }

    /// Number of expenses that matched a category
    pub fn count(&self, category: &str) -> usize {
        self.entries.get(category).map_or(0, |(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No expenses fell inside the range
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, (total, _))| (name.as_str(), *total))
    }

    /// Sum over all categories
    pub fn grand_total(&self) -> f64 {
        self.entries.values().map(|(total, _)| total).sum()
    }

    /// Number of expenses across all categories
    pub fn expense_count(&self) -> usize {
        self.entries.values().map(|(_, count)| count).sum()
    }
}

/// Sum amounts per category for expenses dated within `start..=end`
///
/// An inverted range (`start > end`) matches nothing.
pub fn summarize(expenses: &[Expense], start: NaiveDate, end: NaiveDate) -> CategoryTotals {
    let mut totals = CategoryTotals::new();

    for expense in expenses.iter().filter(|e| e.is_within(start, end)) {
        totals.add(expense.category(), expense.amount());
    }

    totals
}

/// Spending for one category within the report range
#[derive(Debug, Clone, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub total: f64,
    /// Number of expenses in this category
    pub count: usize,
    /// Share of the report's total spending
    pub percentage: f64,
}

/// Category summary report
#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Categories with spending, largest first
    pub categories: Vec<CategorySpending>,
    pub total: f64,
    /// Number of expenses inside the range
    pub expense_count: usize,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "%")]
    percentage: String,
}

impl CategorySummary {
    /// Generate a summary of `expenses` for a date range
    pub fn generate(expenses: &[Expense], start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let totals = summarize(expenses, start_date, end_date);
        let total = totals.grand_total();

        let mut categories: Vec<CategorySpending> = totals
            .iter()
            .map(|(category, category_total)| CategorySpending {
                category: category.to_string(),
                total: category_total,
                count: totals.count(category),
                percentage: if total > 0.0 {
                    category_total / total * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        categories.sort_by(|a, b| b.total.total_cmp(&a.total));

        Self {
            start_date,
            end_date,
            categories,
            total,
            expense_count: totals.expense_count(),
        }
    }

    /// True when no expense fell inside the range
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Expense Summary: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&separator(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expenses found in this date range.\n");
            return output;
        }

        let rows: Vec<SummaryRow> = self
            .categories
            .iter()
            .map(|c| SummaryRow {
                category: c.category.clone(),
                total: format_money(currency, c.total),
                count: c.count,
                percentage: format_percentage(c.percentage),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push('\n');

        output.push_str(&format!(
            "Total: {} across {} expenses\n\n",
            format_money(currency, self.total),
            self.expense_count
        ));

        let max = self
            .categories
            .iter()
            .map(|c| c.total)
            .fold(0.0_f64, f64::max);
        let label_width = self
            .categories
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or(0);

        for c in &self.categories {
            output.push_str(&format!(
                "{:<width$}  {} {}\n",
                c.category,
                format_bar(c.total, max, BAR_WIDTH),
                format_percentage(c.percentage),
                width = label_width
            ));
        }

        output
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> TrackerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["Category", "Total", "Count", "Percentage"])?;

        for c in &self.categories {
            csv_writer.write_record([
                c.category.clone(),
                format!("{:.2}", c.total),
                c.count.to_string(),
                format!("{:.2}", c.percentage),
            ])?;
        }

        csv_writer.write_record([
            "TOTAL".to_string(),
            format!("{:.2}", self.total),
            self.expense_count.to_string(),
            if self.is_empty() { "0.00" } else { "100.00" }.to_string(),
        ])?;

        csv_writer
            .flush()
            .map_err(|e| TrackerError::Export(e.to_string()))?;

        Ok(())
    }
}
