//! Category service
//!
//! Validated create/update/delete for categories. A category that is still
//! referenced by transactions cannot be deleted.

use crate::audit::EntityType;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId, CategoryPurpose};
use crate::storage::Storage;

use super::pagination::{Page, PageRequest};

/// Longest accepted category description, in characters
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(&self, description: &str, purpose: CategoryPurpose) -> ExpenseResult<Category> {
        let description = description.trim();
        validate_description_length(description)?;

        let category = Category::new(description, purpose)?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_create(
            EntityType::Category,
            category.id().to_string(),
            Some(category.description().to_string()),
            &category,
        )?;

        Ok(category)
    }

    pub fn get(&self, id: CategoryId) -> ExpenseResult<Option<Category>> {
        self.storage.categories.get(id)
    }

    /// Find a category by description (case-insensitive), full ID or short ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_description(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .find(|c| c.id().matches_short(identifier)))
    }

    /// All categories ordered by description
    pub fn list(&self) -> ExpenseResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    pub fn list_paged(&self, page: PageRequest) -> ExpenseResult<Page<Category>> {
        Ok(page.apply(self.list()?))
    }

    /// Update description and/or purpose
    ///
    /// The purpose may only change if every transaction already using the
    /// category stays compatible with it.
    pub fn update(
        &self,
        id: CategoryId,
        description: Option<&str>,
        purpose: Option<CategoryPurpose>,
    ) -> ExpenseResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        let before = category.clone();

        let new_description = description
            .map(str::trim)
            .unwrap_or(before.description())
            .to_string();
        validate_description_length(&new_description)?;
        let new_purpose = purpose.unwrap_or(before.purpose());

        category.update(new_description, new_purpose)?;

        if new_purpose != before.purpose() {
            let incompatible = self
                .storage
                .transactions
                .get_by_category(id)?
                .iter()
                .filter(|t| !new_purpose.allows(t.transaction_type()))
                .count();

            if incompatible > 0 {
                return Err(ExpenseError::RuleViolation(format!(
                    "Cannot change '{}' to {}: {} existing transaction(s) would no longer match",
                    before.description(),
                    new_purpose,
                    incompatible
                )));
            }
        }

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        self.storage.log_update(
            EntityType::Category,
            category.id().to_string(),
            Some(category.description().to_string()),
            &before,
            &category,
        )?;

        Ok(category)
    }

    /// Delete a category that no transaction references
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        if self.storage.transactions.has_category_references(id)? {
            let count = self.storage.transactions.get_by_category(id)?.len();
            return Err(ExpenseError::Conflict(format!(
                "Category '{}' is used by {} transaction(s); delete or move them first",
                category.description(),
                count
            )));
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        self.storage.log_delete(
            EntityType::Category,
            category.id().to_string(),
            Some(category.description().to_string()),
            &category,
        )?;

        Ok(category)
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.categories.count()
    }
}

fn validate_description_length(description: &str) -> ExpenseResult<()> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(ExpenseError::Validation(format!(
            "Category description too long ({} chars, max {})",
            len, MAX_DESCRIPTION_LEN
        )));
    }
    Ok(())
}
