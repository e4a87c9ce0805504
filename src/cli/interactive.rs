//! Interactive expense session
//!
//! Prompts for expenses one at a time, then for a date range, and prints the
//! category summary. Invalid answers are reported and asked again.

use std::io::{BufRead, Write};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Category, Expense};
use crate::services::entry::{
    parse_amount, parse_date, parse_required_date, select_category, validate_name, EntryError,
};
use crate::services::ExpenseService;
use crate::storage::ExpenseStore;

use super::expense::format_category_menu;

/// A prompt-driven session over any input and output streams
pub struct InteractiveSession<'a, R, W> {
    store: &'a ExpenseStore,
    settings: &'a Settings,
    input: R,
    output: W,
    today: NaiveDate,
}

impl<'a, R: BufRead, W: Write> InteractiveSession<'a, R, W> {
    pub fn new(
        store: &'a ExpenseStore,
        settings: &'a Settings,
        input: R,
        output: W,
        today: NaiveDate,
    ) -> Self {
        Self {
            store,
            settings,
            input,
            output,
            today,
        }
    }

    /// Run the session to completion
    pub fn run(&mut self) -> TrackerResult<()> {
        let service = ExpenseService::new(self.store);

        writeln!(self.output, "Welcome to Expense Tracker")?;

        loop {
            let answer = self.read_answer("Add an expense? (y/n): ")?;
            match answer.as_deref().map(str::to_lowercase).as_deref() {
                Some("y") | Some("yes") => {
                    let expense = self.read_expense()?;
                    service.record(&expense)?;
                    writeln!(
                        self.output,
                        "Added expense: {} to {}",
                        expense,
                        self.store.path().display()
                    )?;
                }
                _ => break,
            }
        }

        let start = self.prompt_until("Enter start date (YYYY-MM-DD): ", parse_required_date)?;
        let end = self.prompt_until("Enter end date (YYYY-MM-DD): ", parse_required_date)?;

        let report = service.report(start, end)?;
        write!(
            self.output,
            "{}",
            report.format_terminal(&self.settings.currency_symbol)
        )?;

        Ok(())
    }

    fn read_expense(&mut self) -> TrackerResult<Expense> {
        writeln!(self.output, "Enter expense details")?;

        let name = self.prompt_until("Enter expense name: ", validate_name)?;
        let amount = self.prompt_until("Enter expense amount: ", parse_amount)?;

        let today = self.today;
        let date = self.prompt_until(
            "Enter expense date (YYYY-MM-DD) or leave empty for today: ",
            |raw| parse_date(raw, today),
        )?;

        let menu = format!(
            "Select a category from the following:\n{}Enter your choice [1-{}]: ",
            format_category_menu(),
            Category::all().len()
        );
        let category = self.prompt_until(&menu, select_category)?;

        Ok(Expense::categorized(name, amount, category, date))
    }

    /// Ask until `parse` accepts the answer
    fn prompt_until<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, EntryError>,
    ) -> TrackerResult<T> {
        loop {
            let answer = self
                .read_answer(prompt)?
                .ok_or_else(|| TrackerError::Io("Unexpected end of input".into()))?;

            match parse(&answer) {
                Ok(value) => return Ok(value),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input
    fn read_answer(&mut self, prompt: &str) -> TrackerResult<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn run_session(store: &ExpenseStore, script: &str) -> TrackerResult<String> {
        let settings = Settings::default();
        let mut output = Vec::new();
        InteractiveSession::new(
            store,
            &settings,
            Cursor::new(script.as_bytes()),
            &mut output,
            date(2024, 1, 20),
        )
        .run()?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_session_retries_invalid_answers() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));

        let output = run_session(
            &store,
            "y\n\nCoffee\nabc\n3.50\n2024-13-01\n2024-01-05\nfood\n9\n1\n\
             y\nRent\n500\n\n2\n\
             n\n2024-01-01\n2024-01-31\n",
        )
        .unwrap();

        assert!(output.contains("Expense name cannot be empty"));
        assert!(output.contains("Invalid amount 'abc'"));
        assert!(output.contains("Invalid date '2024-13-01'"));
        assert!(output.contains("Invalid input 'food'"));
        assert!(output.contains("Invalid choice 9"));
        assert!(output.contains("₹3.50"));
        assert!(output.contains("₹500.00"));

        let stored = store.load_all().unwrap();
        assert_eq!(
            stored,
            vec![
                Expense::new("Coffee", 3.5, "Food", date(2024, 1, 5)),
                Expense::new("Rent", 500.0, "Home", date(2024, 1, 20)),
            ]
        );
    }

    #[test]
    fn test_session_without_expenses_reports_empty_range() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));

        let output = run_session(&store, "n\n2024-01-01\n2024-01-31\n").unwrap();

        assert!(output.contains("No expenses found in this date range."));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_session_end_of_input_mid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));

        let result = run_session(&store, "y\nCoffee\n");
        assert!(matches!(result, Err(TrackerError::Io(_))));
    }
}
