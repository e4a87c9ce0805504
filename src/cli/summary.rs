//! Summary CLI command
//!
//! Totals expenses by category over a date range and prints, serializes or
//! exports the result.

use chrono::{Datelike, NaiveDate};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::services::entry::parse_required_date;
use crate::services::ExpenseService;
use crate::storage::ExpenseStore;

/// Output format for `expenses summary`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryOutput<'a> {
    Terminal,
    Json,
    Csv(&'a Path),
}

/// Resolve the summary range; start defaults to the first of the month, end to today
pub fn resolve_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> TrackerResult<(NaiveDate, NaiveDate)> {
    let start_date = match start {
        Some(s) => parse_required_date(s)?,
        None => today.with_day(1).unwrap_or(today),
    };
    let end_date = match end {
        Some(e) => parse_required_date(e)?,
        None => today,
    };
    Ok((start_date, end_date))
}

/// Handle `expenses summary`
pub fn handle_summary_command(
    store: &ExpenseStore,
    settings: &Settings,
    start_date: NaiveDate,
    end_date: NaiveDate,
    output: SummaryOutput<'_>,
) -> TrackerResult<()> {
    let report = ExpenseService::new(store).report(start_date, end_date)?;

    match output {
        SummaryOutput::Terminal => print!("{}", report.format_terminal(&settings.currency_symbol)),
        SummaryOutput::Json => println!("{}", report.to_json()?),
        SummaryOutput::Csv(path) => {
            let file = File::create(path).map_err(|e| {
                TrackerError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            report.export_csv(BufWriter::new(file))?;
            println!("Summary exported to: {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_range_defaults() {
        let today = date(2024, 3, 15);
        assert_eq!(
            resolve_range(None, None, today).unwrap(),
            (date(2024, 3, 1), today)
        );
    }

    #[test]
    fn test_resolve_range_explicit() {
        let range = resolve_range(Some("2024-01-01"), Some("2024-01-31"), date(2024, 3, 15));
        assert_eq!(range.unwrap(), (date(2024, 1, 1), date(2024, 1, 31)));
    }

    #[test]
    fn test_resolve_range_rejects_bad_date() {
        let result = resolve_range(Some("January"), None, date(2024, 3, 15));
        assert!(matches!(result, Err(TrackerError::Validation(_))));
    }

    #[test]
    fn test_csv_export_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = ExpenseStore::new(temp_dir.path().join("expenses.csv"));
        std::fs::write(store.path(), "Coffee,3.50,Food,2024-01-05\n").unwrap();
        let out = temp_dir.path().join("summary.csv");

        handle_summary_command(
            &store,
            &Settings::default(),
            date(2024, 1, 1),
            date(2024, 1, 31),
            SummaryOutput::Csv(&out),
        )
        .unwrap();

        let contents = std::fs::read_to_string(&out).unwrap();
        assert!(contents.contains("Food,3.50,1,100.00"));
    }
}
