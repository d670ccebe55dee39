//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// A validated, non-empty category name.
///
/// Surrounding whitespace is trimmed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns [Error::EmptyCategoryName] if nothing is left after trimming.
    pub fn new(name: &str) -> Result<Self, Error> {
        match name.trim() {
            "" => Err(Error::EmptyCategoryName),
            trimmed => Ok(Self(trimmed.to_string())),
        }
    }

    /// Create a category name without checking that it is non-empty.
    ///
    /// Intended for values read back from the database, which were validated
    /// when they were written. Not `unsafe`: an empty name renders oddly but
    /// cannot break memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for a category.
pub type CategoryId = DatabaseId;

/// A category for classifying transactions (e.g., 'Food', 'Transport').
///
/// A transaction with no category belongs to the uncategorized bucket, which
/// is represented by a NULL category id rather than a reserved row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    /// Optional emoji displayed next to the name.
    pub icon: Option<String>,
}

/// Form data for category creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    /// An empty string means no icon.
    #[serde(default)]
    pub icon: String,
}
