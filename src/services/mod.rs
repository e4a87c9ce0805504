//! Service layer for the expense tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! validating user input and running the record / summarize pipeline.

pub mod entry;
pub mod expense;

pub use entry::EntryError;
pub use expense::ExpenseService;
