//! Expense CLI commands
//!
//! Implements the non-interactive `add` and `categories` commands.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::models::{Category, Expense};
use crate::services::entry::{build_expense, parse_category, parse_date};
use crate::services::ExpenseService;
use crate::storage::ExpenseStore;

/// Handle `expenses add`
pub fn handle_add_command(
    store: &ExpenseStore,
    settings: &Settings,
    name: &str,
    amount: &str,
    category: Option<&str>,
    date: Option<&str>,
    today: NaiveDate,
) -> TrackerResult<Expense> {
    let category = match category {
        Some(raw) => parse_category(raw)?,
        None => settings.default_category,
    };
    let date = parse_date(date.unwrap_or(""), today)?;
    let expense = build_expense(name, amount, category, date)?;

    ExpenseService::new(store).record(&expense)?;

    println!(
        "Added expense: {}, {}{:.2}, {}, {}",
        expense.name(),
        settings.currency_symbol,
        expense.amount(),
        expense.category(),
        expense.date()
    );

    Ok(expense)
}

/// Format the category menu, numbered from 1
pub fn format_category_menu() -> String {
    Category::all()
        .iter()
        .enumerate()
        .map(|(i, category)| format!(" {}. {}\n", i + 1, category))
        .collect()
}

/// Handle `expenses categories`
pub fn handle_categories_command() {
    println!("Categories:");
    print!("{}", format_category_menu());
}
