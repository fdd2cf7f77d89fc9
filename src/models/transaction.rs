//! Transaction model
//!
//! A transaction is an expense or an income owned by one person and filed
//! under one category. It is the only entity with rules that span other
//! entities, so construction and update take the related person and category
//! by reference and check them before anything is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::entity::EntityMeta;
use super::ids::{CategoryId, PersonId, TransactionId};
use super::money::Money;
use super::person::Person;

/// Maximum description length in characters
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money going out
    Expense,
    /// Money coming in
    Income,
}

impl TransactionType {
    /// Numeric code used by external callers (1 = expense, 2 = income)
    pub fn from_code(code: u8) -> Result<Self, TransactionValidationError> {
        match code {
            1 => Ok(Self::Expense),
            2 => Ok(Self::Income),
            other => Err(TransactionValidationError::InvalidType(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = TransactionValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Self::from_code(code)
                .map_err(|_| TransactionValidationError::InvalidType(s.to_string()));
        }

        match trimmed.to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(TransactionValidationError::InvalidType(s.to_string())),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    meta: EntityMeta<TransactionId>,

    /// What the money was for
    description: String,

    /// Magnitude of the transaction, always positive
    value: Money,

    /// Expense or income
    #[serde(rename = "type")]
    transaction_type: TransactionType,

    /// The category this transaction is filed under
    category_id: CategoryId,

    /// The person who owns this transaction; never changes
    person_id: PersonId,
}

impl Transaction {
    /// Create a new transaction
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// description, value, person age against type, category against type.
    pub fn new(
        description: impl Into<String>,
        value: Money,
        transaction_type: TransactionType,
        category: &Category,
        person: &Person,
    ) -> Result<Self, TransactionValidationError> {
        let description = description.into();
        validate(&description, value, transaction_type, category, person)?;

        Ok(Self {
            meta: EntityMeta::new(),
            description,
            value,
            transaction_type,
            category_id: category.id(),
            person_id: person.id(),
        })
    }

    /// Replace description, value, type and category
    ///
    /// The owner cannot change; `owner` must be the person this transaction
    /// already belongs to. Both business rules are checked again, so a minor's
    /// expense cannot be turned into income. Leaves the transaction untouched
    /// when validation fails.
    pub fn update(
        &mut self,
        description: impl Into<String>,
        value: Money,
        transaction_type: TransactionType,
        category: &Category,
        owner: &Person,
    ) -> Result<(), TransactionValidationError> {
        if owner.id() != self.person_id {
            return Err(TransactionValidationError::OwnerMismatch);
        }

        let description = description.into();
        validate(&description, value, transaction_type, category, owner)?;

        self.description = description;
        self.value = value;
        self.transaction_type = transaction_type;
        self.category_id = category.id();
        self.meta.touch();
        Ok(())
    }

    pub fn id(&self) -> TransactionId {
        self.meta.id()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn person_id(&self) -> PersonId {
        self.person_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta.created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at()
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Value with sign applied: negative for expenses, positive for income
    pub fn signed_value(&self) -> Money {
        match self.transaction_type {
            TransactionType::Expense => -self.value,
            TransactionType::Income => self.value,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.description, self.signed_value())
    }
}

/// Field check for a description: not blank, at most 500 characters
///
/// Callers that still hold raw input for the value and type run this first so
/// that errors come out in the same order `Transaction::new` reports them.
pub fn check_description(description: &str) -> Result<(), TransactionValidationError> {
    if description.trim().is_empty() {
        return Err(TransactionValidationError::EmptyDescription);
    }

    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(TransactionValidationError::DescriptionTooLong(len));
    }

    Ok(())
}

/// Field check for a value: positive and no larger than [`Money::MAX`]
pub fn check_value(value: Money) -> Result<(), TransactionValidationError> {
    if !value.is_positive() {
        return Err(TransactionValidationError::NonPositiveValue(value));
    }
    if value > Money::MAX {
        return Err(TransactionValidationError::ValueTooLarge(value));
    }
    Ok(())
}

fn validate(
    description: &str,
    value: Money,
    transaction_type: TransactionType,
    category: &Category,
    person: &Person,
) -> Result<(), TransactionValidationError> {
    check_description(description)?;
    check_value(value)?;

    // An undefined type cannot be represented here; it is rejected when the
    // caller's input is parsed into a TransactionType.

    if person.is_minor() && transaction_type == TransactionType::Income {
        return Err(TransactionValidationError::MinorIncome {
            person: person.name().to_string(),
        });
    }

    if !category.is_compatible_with(transaction_type) {
        return Err(TransactionValidationError::IncompatibleCategory {
            category: category.description().to_string(),
            transaction_type,
        });
    }

    Ok(())
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    NonPositiveValue(Money),
    ValueTooLarge(Money),
    InvalidType(String),
    MinorIncome {
        person: String,
    },
    IncompatibleCategory {
        category: String,
        transaction_type: TransactionType,
    },
    OwnerMismatch,
}

impl TransactionValidationError {
    /// Business-rule violations, as opposed to malformed fields
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            Self::MinorIncome { .. } | Self::IncompatibleCategory { .. } | Self::OwnerMismatch
        )
    }
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Transaction description cannot be empty"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Transaction description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::NonPositiveValue(value) => {
                write!(f, "Transaction value must be positive (got {})", value)
            }
            Self::ValueTooLarge(value) => write!(
                f,
                "Transaction value {} exceeds the maximum of {}",
                value,
                Money::MAX
            ),
            Self::InvalidType(value) => write!(
                f,
                "Invalid transaction type '{}' (expected expense or income)",
                value
            ),
            Self::MinorIncome { person } => write!(
                f,
                "'{}' is under 18 and may only record expenses",
                person
            ),
            Self::IncompatibleCategory {
                category,
                transaction_type,
            } => write!(
                f,
                "Category '{}' cannot be used for {} transactions",
                category, transaction_type
            ),
            Self::OwnerMismatch => write!(f, "A transaction cannot change its owner"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
