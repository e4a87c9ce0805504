//! Display formatting for terminal output
//!
//! Provides utilities for formatting amounts, percentages and bars in
//! terminal reports.

pub mod report;

pub use report::{format_bar, format_money, format_percentage};
