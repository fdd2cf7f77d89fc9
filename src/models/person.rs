//! Person model
//!
//! A person owns transactions. Persons under 18 are minors and may only
//! record expenses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::EntityMeta;
use super::ids::PersonId;

/// Age below which a person is considered a minor
pub const ADULT_AGE: i32 = 18;

/// A member of the household
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    #[serde(flatten)]
    meta: EntityMeta<PersonId>,

    /// Display name (never blank)
    name: String,

    /// Age in whole years (always positive)
    age: i32,
}

impl Person {
    /// Create a new person, validating name and age
    pub fn new(name: impl Into<String>, age: i32) -> Result<Self, PersonValidationError> {
        let name = name.into();
        validate_name(&name)?;
        validate_age(age)?;

        Ok(Self {
            meta: EntityMeta::new(),
            name,
            age,
        })
    }

    /// Replace name and age
    ///
    /// Leaves the person untouched when validation fails.
    pub fn update(&mut self, name: impl Into<String>, age: i32) -> Result<(), PersonValidationError> {
        let name = name.into();
        validate_name(&name)?;
        validate_age(age)?;

        self.name = name;
        self.age = age;
        self.meta.touch();
        Ok(())
    }

    pub fn id(&self) -> PersonId {
        self.meta.id()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta.created_at()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at()
    }

    /// Minors may not record income
    pub fn is_minor(&self) -> bool {
        self.age < ADULT_AGE
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate_name(name: &str) -> Result<(), PersonValidationError> {
    if name.trim().is_empty() {
        return Err(PersonValidationError::EmptyName);
    }
    Ok(())
}

fn validate_age(age: i32) -> Result<(), PersonValidationError> {
    if age <= 0 {
        return Err(PersonValidationError::NonPositiveAge(age));
    }
    Ok(())
}

/// Validation errors for persons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    EmptyName,
    NonPositiveAge(i32),
}

impl fmt::Display for PersonValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Person name cannot be empty"),
            Self::NonPositiveAge(age) => {
                write!(f, "Age must be a positive whole number (got {})", age)
            }
        }
    }
}

impl std::error::Error for PersonValidationError {}
