//! Expense categories
//!
//! The fixed set of categories offered when an expense is entered. Stored
//! records keep the category as plain text, so anything read back from disk is
//! grouped by its literal label whether or not it is one of these.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A category offered at entry time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    Food,
    Home,
    Travel,
    Utilities,
    Entertainment,
    Work,
    #[default]
    Other,
}

impl Category {
    /// Get all categories in menu order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Home,
            Self::Travel,
            Self::Utilities,
            Self::Entertainment,
            Self::Work,
            Self::Other,
        ]
    }

    /// The label written to the expense file
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Home => "Home",
            Self::Travel => "Travel",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Work => "Work",
            Self::Other => "Other",
        }
    }

    /// Look up a category by its 1-based menu number
    pub fn from_menu_number(number: usize) -> Option<Self> {
        number
            .checked_sub(1)
            .and_then(|index| Self::all().get(index))
            .copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::all()
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
            .copied()
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// A label that is not one of the offered categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}
