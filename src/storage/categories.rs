//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for category in file_data.categories {
            data.insert(category.id(), category);
        }

        Ok(())
    }

    /// Save categories to disk, ordered by description
    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = CategoryData {
            categories: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all categories ordered by description
    pub fn get_all(&self) -> Result<Vec<Category>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| {
            a.description()
                .to_lowercase()
                .cmp(&b.description().to_lowercase())
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });
        Ok(categories)
    }

    /// Find the first category with the given description (case-insensitive)
    pub fn get_by_description(&self, description: &str) -> Result<Option<Category>, ExpenseError> {
        let description_lower = description.trim().to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|c| c.description().to_lowercase() == description_lower))
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(category.id(), category);
        Ok(())
    }

    /// Delete a category, returning whether it existed
    pub fn delete(&self, id: CategoryId) -> Result<bool, ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryPurpose;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, CategoryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let repo = CategoryRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_category_operations() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category = Category::new("Rent", CategoryPurpose::Expense).unwrap();
        let id = category.id();

        repo.upsert(category).unwrap();
        assert_eq!(repo.count().unwrap(), 1);
        assert_eq!(repo.get(id).unwrap().unwrap().description(), "Rent");

        assert!(repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_all_ordered_by_description() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        for description in ["Salary", "food", "Bonus"] {
            repo.upsert(Category::new(description, CategoryPurpose::Both).unwrap())
                .unwrap();
        }

        let descriptions: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|c| c.description().to_string())
            .collect();
        assert_eq!(descriptions, vec!["Bonus", "food", "Salary"]);
    }

    #[test]
    fn test_get_by_description() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.upsert(Category::new("Monthly Rent", CategoryPurpose::Expense).unwrap())
            .unwrap();

        assert!(repo.get_by_description("monthly rent").unwrap().is_some());
        assert!(repo.get_by_description("Rent").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let category = Category::new("Salary", CategoryPurpose::Income).unwrap();
        let id = category.id();
        repo.upsert(category).unwrap();
        repo.save().unwrap();

        let repo2 = CategoryRepository::new(temp_dir.path().join("categories.json"));
        repo2.load().unwrap();

        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.purpose(), CategoryPurpose::Income);
    }
}
