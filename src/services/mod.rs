//! Service layer for expense-control
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, reference lookups, and cross-entity rules such as
//! cascading person deletes.

pub mod category;
pub mod pagination;
pub mod person;
pub mod transaction;

pub use category::CategoryService;
pub use pagination::{Page, PageRequest};
pub use person::PersonService;
pub use transaction::{
    CreateTransactionInput, TransactionDetails, TransactionService, UpdateTransactionInput,
};
