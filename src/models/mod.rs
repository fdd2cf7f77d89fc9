//! Core data models for expense-control
//!
//! This module contains the data structures of the bookkeeping domain:
//! persons, categories, transactions and the money type they share.

pub mod category;
pub mod entity;
pub mod ids;
pub mod money;
pub mod person;
pub mod transaction;

pub use category::{Category, CategoryPurpose, CategoryValidationError};
pub use entity::EntityMeta;
pub use ids::{CategoryId, PersonId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use person::{Person, PersonValidationError, ADULT_AGE};
pub use transaction::{Transaction, TransactionType, TransactionValidationError};
