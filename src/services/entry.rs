//! Entry-time validation
//!
//! Turns raw user text into validated expense fields. Each function either
//! returns the value or says why the input was rejected; callers that talk to
//! a person re-prompt on rejection.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Category, Expense};
use crate::storage::codec::{DATE_FORMAT, DELIMITER};

/// Why a piece of user input was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("Expense name cannot be empty")]
    EmptyName,

    #[error("Expense name cannot contain ',' or line breaks")]
    NameContainsDelimiter,

    #[error("Invalid amount '{0}'. Please enter a number")]
    InvalidAmount(String),

    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(f64),

    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid input '{0}'. Please enter a number")]
    NotANumber(String),

    #[error("Invalid choice {choice}. Please choose between 1 and {max}")]
    ChoiceOutOfRange { choice: i64, max: usize },

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// Validate an expense name
pub fn validate_name(raw: &str) -> Result<String, EntryError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(EntryError::EmptyName);
    }
    if name.contains(DELIMITER) || name.contains(['\n', '\r']) {
        return Err(EntryError::NameContainsDelimiter);
    }
    Ok(name.to_string())
}

/// Parse an amount; it must be a finite, non-negative number
pub fn parse_amount(raw: &str) -> Result<f64, EntryError> {
    let trimmed = raw.trim();
    let amount: f64 = trimmed
        .parse()
        .map_err(|_| EntryError::InvalidAmount(trimmed.to_string()))?;

    if !amount.is_finite() {
        return Err(EntryError::InvalidAmount(trimmed.to_string()));
    }
    if amount < 0.0 {
        return Err(EntryError::NegativeAmount(amount));
    }
    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date; empty input means `today`
pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, EntryError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EntryError::InvalidDate(trimmed.to_string()))
}

/// Parse a required `YYYY-MM-DD` date
pub fn parse_required_date(raw: &str) -> Result<NaiveDate, EntryError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| EntryError::InvalidDate(trimmed.to_string()))
}

/// Pick a category by its 1-based menu number
pub fn select_category(raw: &str) -> Result<Category, EntryError> {
    let trimmed = raw.trim();
    let choice: i64 = trimmed
        .parse()
        .map_err(|_| EntryError::NotANumber(trimmed.to_string()))?;

    usize::try_from(choice)
        .ok()
        .and_then(Category::from_menu_number)
        .ok_or(EntryError::ChoiceOutOfRange {
            choice,
            max: Category::all().len(),
        })
}

/// Pick a category by name (case-insensitive)
pub fn parse_category(raw: &str) -> Result<Category, EntryError> {
    raw.parse::<Category>()
        .map_err(|e| EntryError::UnknownCategory(e.0))
}

/// Build an expense from raw name and amount plus already-chosen fields
pub fn build_expense(
    name: &str,
    amount: &str,
    category: Category,
    date: NaiveDate,
) -> Result<Expense, EntryError> {
    let name = validate_name(name)?;
    let amount = parse_amount(amount)?;
    Ok(Expense::categorized(name, amount, category, date))
}
