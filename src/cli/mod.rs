//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod category;
pub mod person;
pub mod report;
pub mod transaction;

pub use audit::handle_audit_command;
pub use category::{handle_category_command, CategoryCommands};
pub use person::{handle_person_command, PersonCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::config::settings::Settings;
use crate::services::PageRequest;

/// Build a page request from `--page`/`--page-size`, defaulting to the settings
pub(crate) fn page_request(
    page: Option<i64>,
    page_size: Option<i64>,
    settings: &Settings,
) -> PageRequest {
    PageRequest::normalize(
        page.unwrap_or(1),
        page_size.unwrap_or(settings.default_page_size as i64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let mut settings = Settings::default();
        settings.default_page_size = 25;

        let request = page_request(None, None, &settings);
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 25);

        let request = page_request(Some(0), Some(500), &settings);
        assert_eq!(request.page_number(), 1);
        assert_eq!(request.page_size(), 50);
    }
}
