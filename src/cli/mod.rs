//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod interactive;
pub mod summary;

pub use expense::{handle_add_command, handle_categories_command};
pub use interactive::InteractiveSession;
pub use summary::{handle_summary_command, resolve_range, SummaryOutput};
