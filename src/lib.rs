//! expense-control - household expense tracking
//!
//! This library records the people in a household, spending and income
//! categories, and the transactions linking the two. It enforces the
//! household rules (minors may only record expenses, a category only
//! accepts the transaction types its purpose allows) and produces totals
//! per person and per category.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Crate-wide error type and error kinds
//! - `models`: Persons, categories, transactions, ids and money
//! - `storage`: JSON file storage layer
//! - `services`: Validated operations and cross-entity rules
//! - `reports`: Totals by person and by category
//! - `audit`: Audit logging system
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `expense` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_control::config::paths::ExpensePaths;
//! use expense_control::models::CategoryPurpose;
//! use expense_control::services::{CategoryService, PersonService};
//! use expense_control::storage::Storage;
//!
//! let mut storage = Storage::new(ExpensePaths::new()?)?;
//! storage.load_all()?;
//!
//! let ana = PersonService::new(&storage).create("Ana", 30)?;
//! let groceries = CategoryService::new(&storage).create("Groceries", CategoryPurpose::Expense)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ErrorKind, ExpenseError, ExpenseResult};
