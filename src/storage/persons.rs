//! Person repository for JSON storage
//!
//! Manages loading and saving persons to persons.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Person, PersonId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable person data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct PersonData {
    persons: Vec<Person>,
}

/// Repository for person persistence
pub struct PersonRepository {
    path: PathBuf,
    data: RwLock<HashMap<PersonId, Person>>,
}

impl PersonRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load persons from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: PersonData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for person in file_data.persons {
            data.insert(person.id(), person);
        }

        Ok(())
    }

    /// Save persons to disk, ordered by name
    pub fn save(&self) -> Result<(), ExpenseError> {
        let file_data = PersonData {
            persons: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: PersonId) -> Result<Option<Person>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all persons ordered by name
    pub fn get_all(&self) -> Result<Vec<Person>, ExpenseError> {
        let data = self.data.read().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut persons: Vec<_> = data.values().cloned().collect();
        persons.sort_by(|a, b| {
            a.name()
                .to_lowercase()
                .cmp(&b.name().to_lowercase())
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });
        Ok(persons)
    }

    /// Find the first person with the given name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Person>, ExpenseError> {
        let name_lower = name.trim().to_lowercase();
        Ok(self
            .get_all()?
            .into_iter()
            .find(|p| p.name().to_lowercase() == name_lower))
    }

    /// Insert or update a person
    pub fn upsert(&self, person: Person) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(|e| {
            ExpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(person.id(), person);
        Ok(())
    }

    /// Delete a person, returning whether it existed
    pub fn delete(&self, id: PersonId) -> Result<bool, ExpenseError> {
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
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, PersonRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("persons.json");
        let repo = PersonRepository::new(path);
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_get_delete() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let person = Person::new("Ana", 30).unwrap();
        let id = person.id();
        repo.upsert(person).unwrap();

        assert_eq!(repo.get(id).unwrap().unwrap().name(), "Ana");
        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_get_all_ordered_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        for name in ["Zeca", "ana", "Bruno"] {
            repo.upsert(Person::new(name, 30).unwrap()).unwrap();
        }

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["ana", "Bruno", "Zeca"]);
    }

    #[test]
    fn test_get_by_name_case_insensitive() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.upsert(Person::new("Maria Clara", 41).unwrap()).unwrap();

        assert!(repo.get_by_name("MARIA CLARA").unwrap().is_some());
        assert!(repo.get_by_name("Maria").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let person = Person::new("Leo", 12).unwrap();
        let id = person.id();
        repo.upsert(person.clone()).unwrap();
        repo.save().unwrap();

        let repo2 = PersonRepository::new(temp_dir.path().join("persons.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap(), Some(person));
    }
}
