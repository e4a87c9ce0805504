//! Core data models for the expense tracker
//!
//! This module contains the expense record and the fixed category set offered
//! when recording one.

pub mod category;
pub mod expense;

pub use category::{Category, UnknownCategory};
pub use expense::Expense;
