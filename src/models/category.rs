//! Category model
//!
//! A category classifies transactions. Its purpose decides which
//! transaction types may reference it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::entity::EntityMeta;
use super::ids::CategoryId;
use super::transaction::TransactionType;

/// Which transaction types a category may be used with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPurpose {
    /// Expenses only
    Expense,
    /// Income only
    Income,
    /// Either type
    Both,
}

impl CategoryPurpose {
    /// Numeric code used by external callers (1 = expense, 2 = income, 3 = both)
    pub fn from_code(code: u8) -> Result<Self, CategoryValidationError> {
        match code {
            1 => Ok(Self::Expense),
            2 => Ok(Self::Income),
            3 => Ok(Self::Both),
            other => Err(CategoryValidationError::InvalidPurpose(other.to_string())),
        }
    }

    /// Whether a transaction of the given type may use a category with this purpose
    pub fn allows(&self, transaction_type: TransactionType) -> bool {
        match self {
            Self::Both => true,
            Self::Expense => transaction_type == TransactionType::Expense,
            Self::Income => transaction_type == TransactionType::Income,
        }
    }
}

impl fmt::Display for CategoryPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
            Self::Both => write!(f, "Both"),
        }
    }
}

impl FromStr for CategoryPurpose {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code)
                .map_err(|_| CategoryValidationError::InvalidPurpose(s.to_string()));
        }

        match trimmed.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            "both" => Ok(Self::Both),
            _ => Err(CategoryValidationError::InvalidPurpose(s.to_string())),
        }
    }
}

/// A spending or income category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    meta: EntityMeta<CategoryId>,

    /// Category description (never blank)
    description: String,

    /// Which transaction types may use this category
    purpose: CategoryPurpose,
}

impl Category {
    /// Create a new category
    pub fn new(
        description: impl Into<String>,
        purpose: CategoryPurpose,
    ) -> Result<Self, CategoryValidationError> {
        let description = description.into();
        validate_description(&description)?;

        Ok(Self {
            meta: EntityMeta::new(),
            description,
            purpose,
        })
    }

    /// Replace description and purpose
    ///
    /// Leaves the category untouched when validation fails.
    pub fn update(
        &mut self,
        description: impl Into<String>,
        purpose: CategoryPurpose,
    ) -> Result<(), CategoryValidationError> {
        let description = description.into();
        validate_description(&description)?;

        self.description = description;
        self.purpose = purpose;
        self.meta.touch();
        Ok(())
    }

    pub fn id(&self) -> CategoryId {
        self.meta.id()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn purpose(&self) -> CategoryPurpose {
        self.purpose
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta.created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at()
    }

    /// Check whether this category may be used for the given transaction type
    pub fn is_compatible_with(&self, transaction_type: TransactionType) -> bool {
        self.purpose.allows(transaction_type)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

fn validate_description(description: &str) -> Result<(), CategoryValidationError> {
    if description.trim().is_empty() {
        return Err(CategoryValidationError::EmptyDescription);
    }
    Ok(())
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyDescription,
    InvalidPurpose(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Category description cannot be empty"),
            Self::InvalidPurpose(value) => write!(
                f,
                "Invalid category purpose '{}' (expected expense, income or both)",
                value
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("Groceries", CategoryPurpose::Expense).unwrap();
        assert_eq!(category.description(), "Groceries");
        assert_eq!(category.purpose(), CategoryPurpose::Expense);
        assert_eq!(category.created_at(), category.updated_at());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            Category::new("", CategoryPurpose::Both),
            Err(CategoryValidationError::EmptyDescription)
        );
        assert_eq!(
            Category::new("  ", CategoryPurpose::Income),
            Err(CategoryValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_compatibility_table() {
        use TransactionType::{Expense, Income};

        let both = Category::new("Misc", CategoryPurpose::Both).unwrap();
        assert!(both.is_compatible_with(Expense));
        assert!(both.is_compatible_with(Income));

        let expense = Category::new("Rent", CategoryPurpose::Expense).unwrap();
        assert!(expense.is_compatible_with(Expense));
        assert!(!expense.is_compatible_with(Income));

        let income = Category::new("Salary", CategoryPurpose::Income).unwrap();
        assert!(income.is_compatible_with(Income));
        assert!(!income.is_compatible_with(Expense));
    }

    #[test]
    fn test_update() {
        let mut category = Category::new("Food", CategoryPurpose::Expense).unwrap();
        category.update("Food & Drinks", CategoryPurpose::Both).unwrap();
        assert_eq!(category.description(), "Food & Drinks");
        assert_eq!(category.purpose(), CategoryPurpose::Both);
        assert!(category.updated_at() >= category.created_at());

        let before = category.clone();
        assert!(category.update(" ", CategoryPurpose::Income).is_err());
        assert_eq!(category, before);
    }

    #[test]
    fn test_purpose_parsing() {
        assert_eq!("expense".parse(), Ok(CategoryPurpose::Expense));
        assert_eq!("Income".parse(), Ok(CategoryPurpose::Income));
        assert_eq!(" BOTH ".parse(), Ok(CategoryPurpose::Both));
        assert_eq!("3".parse(), Ok(CategoryPurpose::Both));
        assert!(matches!(
            "savings".parse::<CategoryPurpose>(),
            Err(CategoryValidationError::InvalidPurpose(_))
        ));
    }

    #[test]
    fn test_purpose_codes() {
        assert_eq!("1".parse(), Ok(CategoryPurpose::Expense));
        assert_eq!("2".parse(), Ok(CategoryPurpose::Income));
        assert!(matches!(
            "0".parse::<CategoryPurpose>(),
            Err(CategoryValidationError::InvalidPurpose(_))
        ));
        assert_eq!(
            " 4 ".parse::<CategoryPurpose>(),
            Err(CategoryValidationError::InvalidPurpose(" 4 ".into()))
        );
    }

    #[test]
    fn test_serialization() {
        let category = Category::new("Salary", CategoryPurpose::Income).unwrap();
        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains("\"purpose\":\"income\""));
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);
    }
}
