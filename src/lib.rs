//! Expense Tracker - record personal expenses and total them by category
//!
//! This library provides the core of the expense tracker: an append-only
//! expense file, and category totals over an inclusive date range.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: The expense record and the category set
//! - `storage`: Line codec and the append-only expense file
//! - `reports`: Category totals and the summary report
//! - `services`: Entry validation and the record / summarize pipeline
//! - `cli`: Command handlers and the interactive session
//! - `display`: Terminal formatting helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::reports::summarize;
//! use expense_tracker::storage::ExpenseStore;
//!
//! let store = ExpenseStore::new("expenses.csv");
//! let totals = summarize(&store.load_all()?, start, end);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::TrackerError;
