//! Custom error types for expense-control
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Every variant belongs to exactly one
//! [`ErrorKind`], so callers can branch on the kind instead of the message.

use std::fmt;

use thiserror::Error;

use crate::models::{
    CategoryValidationError, MoneyParseError, PersonValidationError, TransactionValidationError,
};

/// The closed set of failure kinds surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Blank or too-long text, non-positive value, undefined enum value
    FieldInvalid,
    /// Minor with income, category/type incompatibility
    RuleViolated,
    /// A referenced entity does not exist
    NotFound,
    /// The operation conflicts with dependent data
    Conflict,
    /// Disk, serialization or configuration failure
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldInvalid => write!(f, "field-invalid"),
            Self::RuleViolated => write!(f, "rule-violated"),
            Self::NotFound => write!(f, "not-found"),
            Self::Conflict => write!(f, "conflict"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

/// The main error type for expense-control operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Field validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violations
    #[error("Rule violation: {0}")]
    RuleViolation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Operation blocked by dependent records
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ExpenseError {
    /// Create a "not found" error for persons
    pub fn person_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Person",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for transactions
    pub fn transaction_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// The kind tag callers should branch on
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::FieldInvalid,
            Self::RuleViolation(_) => ErrorKind::RuleViolated,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Config(_) | Self::Io(_) | Self::Json(_) | Self::Export(_) | Self::Storage(_) => {
                ErrorKind::Storage
            }
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Check if this is a field validation error
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::FieldInvalid
    }

    /// Check if this is a business rule violation
    pub fn is_rule_violation(&self) -> bool {
        self.kind() == ErrorKind::RuleViolated
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<PersonValidationError> for ExpenseError {
    fn from(err: PersonValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CategoryValidationError> for ExpenseError {
    fn from(err: CategoryValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<TransactionValidationError> for ExpenseError {
    fn from(err: TransactionValidationError) -> Self {
        if err.is_rule_violation() {
            Self::RuleViolation(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}

impl From<MoneyParseError> for ExpenseError {
    fn from(err: MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for expense-control operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;
