//! Storage layer for expense-control
//!
//! JSON file storage with atomic writes. Each entity kind lives in its own
//! file under `data/`; every change made through the services is also
//! appended to the audit log.
//!
//! Services save the data file first and append the audit entry second. If
//! the append fails the change is already on disk: the caller gets a storage
//! error while the data stays committed, and the audit log misses that entry.

pub mod categories;
pub mod file_io;
pub mod init;
pub mod persons;
pub mod transactions;

pub use categories::CategoryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use persons::PersonRepository;
pub use transactions::TransactionRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::ExpensePaths;
use crate::error::ExpenseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: ExpensePaths,
    pub persons: PersonRepository,
    pub categories: CategoryRepository,
    pub transactions: TransactionRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with audit logging enabled
    pub fn new(paths: ExpensePaths) -> Result<Self, ExpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            persons: PersonRepository::new(paths.persons_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            transactions: TransactionRepository::new(paths.transactions_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Turn audit logging on or off (the `audit_enabled` setting)
    pub fn set_audit_enabled(&mut self, enabled: bool) {
        self.audit = enabled.then(|| AuditLogger::new(self.paths.audit_log()));
    }

    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), ExpenseError> {
        self.persons.load()?;
        self.categories.load()?;
        self.transactions.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), ExpenseError> {
        self.persons.save()?;
        self.categories.save()?;
        self.transactions.save()?;
        Ok(())
    }

    /// Check if storage has been initialized (has a settings file)
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a committed create; see the module docs for failure handling
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.write_audit(&[AuditEntry::create(entity_type, entity_id, entity_name, entity)])
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), ExpenseError> {
        self.write_audit(&[AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        )])
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), ExpenseError> {
        self.write_audit(&[AuditEntry::delete(entity_type, entity_id, entity_name, entity)])
    }

    /// Append prepared entries in one write (cascaded deletes)
    pub fn log_batch(&self, entries: &[AuditEntry]) -> Result<(), ExpenseError> {
        self.write_audit(entries)
    }

    fn write_audit(&self, entries: &[AuditEntry]) -> Result<(), ExpenseError> {
        match &self.audit {
            Some(logger) => logger.log_batch(entries),
            None => Ok(()),
        }
    }
}
