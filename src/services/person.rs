//! Person service
//!
//! Validated create/update/delete for household members. Deleting a person
//! removes every transaction they own.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Person, PersonId};
use crate::storage::Storage;

use super::pagination::{Page, PageRequest};

/// Longest accepted person name, in characters
pub const MAX_NAME_LEN: usize = 200;

/// Service for person management
pub struct PersonService<'a> {
    storage: &'a Storage,
}

impl<'a> PersonService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new person
    pub fn create(&self, name: &str, age: i32) -> ExpenseResult<Person> {
        let name = name.trim();
        validate_name_length(name)?;

        let person = Person::new(name, age)?;

        self.storage.persons.upsert(person.clone())?;
        self.storage.persons.save()?;

        self.storage.log_create(
            EntityType::Person,
            person.id().to_string(),
            Some(person.name().to_string()),
            &person,
        )?;

        Ok(person)
    }

    pub fn get(&self, id: PersonId) -> ExpenseResult<Option<Person>> {
        self.storage.persons.get(id)
    }

    /// Find a person by name (case-insensitive), full ID or short ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Person>> {
        if let Some(person) = self.storage.persons.get_by_name(identifier)? {
            return Ok(Some(person));
        }

        if let Ok(id) = identifier.parse::<PersonId>() {
            return self.storage.persons.get(id);
        }

        Ok(self
            .storage
            .persons
            .get_all()?
            .into_iter()
            .find(|p| p.id().matches_short(identifier)))
    }

    /// All persons ordered by name
    pub fn list(&self) -> ExpenseResult<Vec<Person>> {
        self.storage.persons.get_all()
    }

    pub fn list_paged(&self, page: PageRequest) -> ExpenseResult<Page<Person>> {
        Ok(page.apply(self.list()?))
    }

    /// Update name and/or age
    ///
    /// A person who owns income transactions cannot become a minor.
    pub fn update(
        &self,
        id: PersonId,
        name: Option<&str>,
        age: Option<i32>,
    ) -> ExpenseResult<Person> {
        let mut person = self
            .storage
            .persons
            .get(id)?
            .ok_or_else(|| ExpenseError::person_not_found(id.to_string()))?;

        let before = person.clone();

        let new_name = name.map(str::trim).unwrap_or(before.name()).to_string();
        validate_name_length(&new_name)?;
        let new_age = age.unwrap_or(before.age());

        person.update(new_name, new_age)?;

        if person.is_minor() && !before.is_minor() {
            let income_count = self
                .storage
                .transactions
                .get_by_person(id)?
                .iter()
                .filter(|t| t.is_income())
                .count();

            if income_count > 0 {
                return Err(ExpenseError::RuleViolation(format!(
                    "Cannot set {}'s age to {}: they have {} income transaction(s) and minors may only record expenses",
                    before.name(),
                    new_age,
                    income_count
                )));
            }
        }

        self.storage.persons.upsert(person.clone())?;
        self.storage.persons.save()?;

        self.storage.log_update(
            EntityType::Person,
            person.id().to_string(),
            Some(person.name().to_string()),
            &before,
            &person,
        )?;

        Ok(person)
    }

    /// Delete a person together with all of their transactions
    ///
    /// Returns the deleted person and the number of transactions removed.
    pub fn delete(&self, id: PersonId) -> ExpenseResult<(Person, usize)> {
        let person = self
            .storage
            .persons
            .get(id)?
            .ok_or_else(|| ExpenseError::person_not_found(id.to_string()))?;

        let owned = self.storage.transactions.get_by_person(id)?;
        let owned_ids: Vec<_> = owned.iter().map(|t| t.id()).collect();

        // Transactions go first so a failed save never leaves orphans behind
        let removed = self.storage.transactions.delete_many(&owned_ids)?;
        self.storage.transactions.save()?;

        self.storage.persons.delete(id)?;
        self.storage.persons.save()?;

        let mut entries: Vec<_> = owned
            .iter()
            .map(|t| {
                AuditEntry::delete(
                    EntityType::Transaction,
                    t.id().to_string(),
                    Some(t.description().to_string()),
                    t,
                )
            })
            .collect();
        entries.push(AuditEntry::delete(
            EntityType::Person,
            person.id().to_string(),
            Some(person.name().to_string()),
            &person,
        ));
        self.storage.log_batch(&entries)?;

        Ok((person, removed))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.persons.count()
    }
}

fn validate_name_length(name: &str) -> ExpenseResult<()> {
    let len = name.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ExpenseError::Validation(format!(
            "Person name too long ({} chars, max {})",
            len, MAX_NAME_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::error::ErrorKind;
    use crate::models::{Category, CategoryPurpose, Money, Transaction, TransactionType};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add_transaction(storage: &Storage, person: &Person, transaction_type: TransactionType) {
        let category = Category::new("Misc", CategoryPurpose::Both).unwrap();
        storage.categories.upsert(category.clone()).unwrap();
        let txn = Transaction::new(
            "Entry",
            Money::from_cents(5000),
            transaction_type,
            &category,
            person,
        )
        .unwrap();
        storage.transactions.upsert(txn).unwrap();
    }

    #[test]
    fn test_create_person() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);

        let person = service.create("  Ana  ", 30).unwrap();
        assert_eq!(person.name(), "Ana");
        assert_eq!(service.get(person.id()).unwrap(), Some(person));
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);

        let err = service.create("", 30).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldInvalid);

        let err = service.create("Ana", 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldInvalid);

        let err = service.create(&"a".repeat(MAX_NAME_LEN + 1), 30).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldInvalid);
        assert!(service.create(&"a".repeat(MAX_NAME_LEN), 30).is_ok());

        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_audit_failure_after_commit_keeps_person() {
        let (temp_dir, storage) = create_test_storage();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        // A directory where the log file should be makes every append fail
        std::fs::create_dir_all(paths.audit_log()).unwrap();

        let err = PersonService::new(&storage).create("Ana", 30).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Storage);

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        let person = reloaded.persons.get_by_name("Ana").unwrap().unwrap();
        assert_eq!(person.age(), 30);
    }

    #[test]
    fn test_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);
        let person = service.create("Ana", 30).unwrap();

        assert!(service.find("ana").unwrap().is_some());
        assert!(service.find(&person.id().to_string()).unwrap().is_some());
        assert!(service
            .find(&person.id().as_uuid().to_string())
            .unwrap()
            .is_some());
        assert!(service.find("nobody").unwrap().is_none());
    }

    #[test]
    fn test_list_paged() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);
        for i in 0..12 {
            service.create(&format!("Person {:02}", i), 20 + i).unwrap();
        }

        let page = service.list_paged(PageRequest::normalize(2, 5)).unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].name(), "Person 05");
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_update() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);
        let person = service.create("Ana", 30).unwrap();

        let updated = service.update(person.id(), Some("Ana Maria"), None).unwrap();
        assert_eq!(updated.name(), "Ana Maria");
        assert_eq!(updated.age(), 30);
        assert_eq!(updated.created_at(), person.created_at());

        let err = service.update(PersonId::new(), Some("X"), None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_to_minor_with_income_is_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);
        let person = service.create("Bia", 25).unwrap();
        add_transaction(&storage, &person, TransactionType::Income);

        let err = service.update(person.id(), None, Some(16)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RuleViolated);
        assert_eq!(service.get(person.id()).unwrap().unwrap().age(), 25);
    }

    #[test]
    fn test_update_to_minor_with_expenses_only_is_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);
        let person = service.create("Bia", 25).unwrap();
        add_transaction(&storage, &person, TransactionType::Expense);

        let updated = service.update(person.id(), None, Some(16)).unwrap();
        assert!(updated.is_minor());
    }

    #[test]
    fn test_delete_cascades_to_transactions() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);
        let ana = service.create("Ana", 30).unwrap();
        let leo = service.create("Leo", 12).unwrap();

        add_transaction(&storage, &ana, TransactionType::Expense);
        add_transaction(&storage, &ana, TransactionType::Income);
        add_transaction(&storage, &leo, TransactionType::Expense);

        let (deleted, removed) = service.delete(ana.id()).unwrap();
        assert_eq!(deleted.id(), ana.id());
        assert_eq!(removed, 2);

        assert!(service.get(ana.id()).unwrap().is_none());
        assert!(storage.transactions.get_by_person(ana.id()).unwrap().is_empty());
        assert_eq!(storage.transactions.count().unwrap(), 1);

        let entries = storage.audit().unwrap().read_all().unwrap();
        let deletes = entries
            .iter()
            .filter(|e| e.operation == crate::audit::Operation::Delete)
            .count();
        assert_eq!(deletes, 3);
    }

    #[test]
    fn test_delete_missing_person() {
        let (_temp_dir, storage) = create_test_storage();
        let service = PersonService::new(&storage);

        let err = service.delete(PersonId::new()).unwrap_err();
        assert!(err.is_not_found());
    }
}
