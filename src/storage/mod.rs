//! Storage layer for the expense tracker
//!
//! Expenses live in a plain-text file, one comma-separated record per line.
//! The codec defines the line format; the store appends to and reads back the
//! file.

pub mod codec;
pub mod expenses;

pub use codec::{decode, encode, MalformedRecord};
pub use expenses::ExpenseStore;
