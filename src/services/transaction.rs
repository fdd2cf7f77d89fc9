//! Transaction service
//!
//! Creates and edits transactions after resolving their category and owner,
//! and builds the display view (category description and person name).

use std::collections::HashMap;

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{
    Category, CategoryId, Money, Person, PersonId, Transaction, TransactionId, TransactionType,
};
use crate::storage::Storage;

use super::pagination::{Page, PageRequest};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub description: String,
    pub value: Money,
    pub transaction_type: TransactionType,
    pub category_id: CategoryId,
    pub person_id: PersonId,
}

/// Input for editing a transaction; the owner never changes
#[derive(Debug, Clone)]
pub struct UpdateTransactionInput {
    pub description: Option<String>,
    pub value: Option<Money>,
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<CategoryId>,
}

/// A transaction together with the names of what it references
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    pub transaction: Transaction,
    pub category_description: String,
    pub person_name: String,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    ///
    /// The category is resolved before the person, so a request naming two
    /// missing entities reports the category.
    pub fn create(&self, input: CreateTransactionInput) -> ExpenseResult<Transaction> {
        let category = self.require_category(input.category_id)?;
        let person = self.require_person(input.person_id)?;

        let txn = Transaction::new(
            input.description.trim(),
            input.value,
            input.transaction_type,
            &category,
            &person,
        )?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id().to_string(),
            Some(txn.description().to_string()),
            &txn,
        )?;

        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> ExpenseResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full ID or short ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Transaction>> {
        if let Ok(id) = identifier.parse::<TransactionId>() {
            return self.storage.transactions.get(id);
        }

        Ok(self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .find(|t| t.id().matches_short(identifier)))
    }

    /// All transactions, newest first
    pub fn list(&self) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_all()
    }

    pub fn list_paged(&self, page: PageRequest) -> ExpenseResult<Page<Transaction>> {
        Ok(page.apply(self.list()?))
    }

    /// Transactions owned by one person, newest first
    pub fn list_by_person(&self, person_id: PersonId) -> ExpenseResult<Vec<Transaction>> {
        self.storage.transactions.get_by_person(person_id)
    }

    /// One page of transaction views, optionally restricted to one person
    pub fn list_details_paged(
        &self,
        page: PageRequest,
        person_id: Option<PersonId>,
    ) -> ExpenseResult<Page<TransactionDetails>> {
        let transactions = match person_id {
            Some(id) => self.list_by_person(id)?,
            None => self.list()?,
        };

        let page = page.apply(transactions);
        let persons: HashMap<_, _> = self
            .storage
            .persons
            .get_all()?
            .into_iter()
            .map(|p| (p.id(), p))
            .collect();
        let categories: HashMap<_, _> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .map(|c| (c.id(), c))
            .collect();

        let mut items = Vec::with_capacity(page.items.len());
        for txn in &page.items {
            let category = categories
                .get(&txn.category_id())
                .ok_or_else(|| ExpenseError::category_not_found(txn.category_id().to_string()))?;
            let person = persons
                .get(&txn.person_id())
                .ok_or_else(|| ExpenseError::person_not_found(txn.person_id().to_string()))?;
            items.push(TransactionDetails {
                transaction: txn.clone(),
                category_description: category.description().to_string(),
                person_name: person.name().to_string(),
            });
        }

        Ok(Page {
            items,
            page_number: page.page_number,
            page_size: page.page_size,
            total_count: page.total_count,
        })
    }

    /// The view of one transaction
    pub fn details(&self, id: TransactionId) -> ExpenseResult<Option<TransactionDetails>> {
        let Some(txn) = self.storage.transactions.get(id)? else {
            return Ok(None);
        };

        let category = self.require_category(txn.category_id())?;
        let person = self.require_person(txn.person_id())?;

        Ok(Some(TransactionDetails {
            category_description: category.description().to_string(),
            person_name: person.name().to_string(),
            transaction: txn,
        }))
    }

    /// Edit a transaction
    ///
    /// Missing fields keep their current value. Both business rules are
    /// checked against the owner again.
    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> ExpenseResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;

        let before = txn.clone();

        let category = self.require_category(input.category_id.unwrap_or(before.category_id()))?;
        let owner = self.require_person(before.person_id())?;

        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or(before.description())
            .to_string();

        txn.update(
            description,
            input.value.unwrap_or(before.value()),
            input.transaction_type.unwrap_or(before.transaction_type()),
            &category,
            &owner,
        )?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_update(
            EntityType::Transaction,
            txn.id().to_string(),
            Some(txn.description().to_string()),
            &before,
            &txn,
        )?;

        Ok(txn)
    }

    /// Delete a transaction
    pub fn delete(&self, id: TransactionId) -> ExpenseResult<Transaction> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| ExpenseError::transaction_not_found(id.to_string()))?;

        self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        self.storage.log_delete(
            EntityType::Transaction,
            txn.id().to_string(),
            Some(txn.description().to_string()),
            &txn,
        )?;

        Ok(txn)
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.transactions.count()
    }

    fn require_category(&self, id: CategoryId) -> ExpenseResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))
    }

    fn require_person(&self, id: PersonId) -> ExpenseResult<Person> {
        self.storage
            .persons
            .get(id)?
            .ok_or_else(|| ExpenseError::person_not_found(id.to_string()))
    }
}
