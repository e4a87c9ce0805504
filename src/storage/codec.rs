//! Expense record codec
//!
//! Each expense is stored as one line of four comma-separated fields:
//!
//! ```text
//! name,amount,category,date
//! Coffee,3.5,Food,2024-01-05
//! ```
//!
//! Fields are not quoted or escaped. A name or category containing a comma
//! produces a line that no longer decodes; entry validation refuses such names
//! so the CLI never writes one.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::Expense;

/// Field separator within a record line
pub const DELIMITER: char = ',';

/// On-disk date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a stored line could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("expected 4 fields, found {0}")]
    FieldCount(usize),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
}

/// Encode an expense as a single record line (without line terminator)
///
/// The amount uses the shortest representation that parses back to the same
/// `f64`, always with a decimal point or exponent (`3.5`, `500.0`).
pub fn encode(expense: &Expense) -> String {
    format!(
        "{}{d}{:?}{d}{}{d}{}",
        expense.name(),
        expense.amount(),
        expense.category(),
        expense.date().format(DATE_FORMAT),
        d = DELIMITER,
    )
}

/// Decode a single record line
///
/// Only trailing whitespace (including the line terminator) is dropped, so a
/// name keeps any leading spaces it was written with.
pub fn decode(line: &str) -> Result<Expense, MalformedRecord> {
    let fields: Vec<&str> = line.trim_end().split(DELIMITER).collect();
    let [name, amount, category, date] = fields.as_slice() else {
        return Err(MalformedRecord::FieldCount(fields.len()));
    };

    let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|_| MalformedRecord::InvalidDate(date.to_string()))?;

    let amount: f64 = amount
        .trim()
        .parse()
        .map_err(|_| MalformedRecord::InvalidAmount(amount.to_string()))?;

    Ok(Expense::new(*name, amount, *category, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode_field_order() {
        let expense = Expense::categorized("Rent", 500.0, Category::Home, date(2024, 1, 1));
        assert_eq!(encode(&expense), "Rent,500.0,Home,2024-01-01");
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let expenses = [
            Expense::categorized("Coffee", 3.5, Category::Food, date(2024, 1, 5)),
            Expense::categorized("Train", 0.1 + 0.2, Category::Travel, date(2023, 12, 31)),
            Expense::new("Gift", 1234567.891, "Birthdays", date(2024, 2, 29)),
            Expense::categorized("Free sample", 0.0, Category::Other, date(2020, 6, 9)),
            Expense::categorized(" Coffee", 3.5, Category::Food, date(2024, 1, 5)),
            Expense::new("Tea  ", 2.0, " Drinks ", date(2024, 1, 6)),
        ];

        for expense in &expenses {
            assert_eq!(decode(&encode(expense)).as_ref(), Ok(expense));
        }
    }

    #[test]
    fn test_decode_accepts_two_decimal_amounts() {
        let expense = decode("Coffee,3.50,Food,2024-01-05").unwrap();
        assert_eq!(expense.name(), "Coffee");
        assert_eq!(expense.amount(), 3.5);
        assert_eq!(expense.category(), "Food");
        assert_eq!(expense.date(), date(2024, 1, 5));
    }

    #[test]
    fn test_decode_strips_line_endings() {
        let expense = decode("Rent,500.00,Home,2024-01-01\r\n").unwrap();
        assert_eq!(expense.date(), date(2024, 1, 1));
    }

    #[test]
    fn test_decode_wrong_field_count() {
        assert_eq!(
            decode("Coffee,3.50,Food"),
            Err(MalformedRecord::FieldCount(3))
        );
        assert_eq!(
            decode("Coffee, large,3.50,Food,2024-01-05"),
            Err(MalformedRecord::FieldCount(5))
        );
        assert_eq!(decode(""), Err(MalformedRecord::FieldCount(1)));
    }

    #[test]
    fn test_decode_invalid_date() {
        assert_eq!(
            decode("Coffee,3.50,Food,05/01/2024"),
            Err(MalformedRecord::InvalidDate("05/01/2024".into()))
        );
        assert_eq!(
            decode("Coffee,3.50,Food,2024-02-30"),
            Err(MalformedRecord::InvalidDate("2024-02-30".into()))
        );
    }

    #[test]
    fn test_decode_invalid_amount() {
        assert_eq!(
            decode("Coffee,three,Food,2024-01-05"),
            Err(MalformedRecord::InvalidAmount("three".into()))
        );
    }

    #[test]
    fn test_category_is_free_text() {
        let expense = decode("Lunch,12.0,Fod,2024-01-05").unwrap();
        assert_eq!(expense.category(), "Fod");
    }
}
