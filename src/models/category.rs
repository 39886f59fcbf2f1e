//! Category model
//!
//! Categories are created by the user and referenced by budgets and goals.
//! Once referenced they are treated as immutable; deletion belongs to the
//! store.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Whether a category tracks money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A category as returned by the category store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub kind: CategoryKind,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A category creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub kind: CategoryKind,
}

impl NewCategory {
    /// Build a request with the name trimmed
    pub fn new(name: &str, kind: CategoryKind) -> Self {
        Self {
            name: name.trim().to_string(),
            kind,
        }
    }

    /// Categories created inline from a budget or goal form are expenses
    pub fn expense(name: &str) -> Self {
        Self::new(name, CategoryKind::Expense)
    }

    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        Ok(())
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_request_is_trimmed() {
        let request = NewCategory::expense("  Pets  ");
        assert_eq!(request.name, "Pets");
        assert_eq!(request.kind, CategoryKind::Expense);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            NewCategory::expense("   ").validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert_eq!(
            NewCategory::expense(&"x".repeat(51)).validate(),
            Err(CategoryValidationError::NameTooLong(51))
        );
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&CategoryKind::Income).unwrap(),
            "\"income\""
        );
        let kind: CategoryKind = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(kind, CategoryKind::Expense);
    }
}
