//! Storage initialization
//!
//! Handles first-run setup: directories, settings file and empty entity files.

use crate::config::paths::ExpensePaths;
use crate::config::settings::Settings;
use crate::error::ExpenseError;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Existing settings and entity files are kept as they are. Returns `true`
/// when this call created the settings file.
pub fn initialize_storage(paths: &ExpensePaths) -> Result<bool, ExpenseError> {
    paths.ensure_directories()?;

    let fresh = needs_initialization(paths);
    if fresh {
        Settings::default().save(paths)?;
    }

    let missing_files = [
        paths.persons_file(),
        paths.categories_file(),
        paths.transactions_file(),
    ]
    .iter()
    .any(|file| !file.exists());

    if missing_files {
        // Loading first keeps whatever files do exist
        let mut storage = Storage::new(paths.clone())?;
        storage.load_all()?;
        storage.save_all()?;
    }

    Ok(fresh)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &ExpensePaths) -> bool {
    !paths.is_initialized()
}
