//! Category CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_category_details, format_category_list, format_page_footer};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryPurpose};
use crate::services::CategoryService;
use crate::storage::Storage;

use super::page_request;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category description
        description: String,
        /// Which transactions may use it: expense, income or both (or 1, 2, 3)
        #[arg(short, long)]
        purpose: String,
    },

    /// List categories ordered by description
    List {
        /// Page number (starting at 1)
        #[arg(long)]
        page: Option<i64>,
        /// Categories per page (max 50)
        #[arg(long)]
        page_size: Option<i64>,
    },

    /// Show category details
    Show {
        /// Category description or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category description or ID
        category: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New purpose: expense, income or both (or 1, 2, 3)
        #[arg(short, long)]
        purpose: Option<String>,
    },

    /// Delete a category no transaction uses
    Delete {
        /// Category description or ID
        category: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> ExpenseResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            description,
            purpose,
        } => {
            let purpose: CategoryPurpose = purpose.parse()?;
            let category = service.create(&description, purpose)?;
            println!("Created category: {}", category.description());
            println!("  Purpose: {}", category.purpose());
            println!("  ID: {}", category.id());
        }

        CategoryCommands::List { page, page_size } => {
            let page = service.list_paged(page_request(page, page_size, settings))?;
            print!("{}", format_category_list(&page.items));
            if page.total_count > 0 {
                println!("{}", format_page_footer(&page));
            }
        }

        CategoryCommands::Show { category } => {
            let category = find_category(&service, &category)?;
            let count = storage.transactions.get_by_category(category.id())?.len();
            print!("{}", format_category_details(&category, count));
        }

        CategoryCommands::Edit {
            category,
            description,
            purpose,
        } => {
            let category = find_category(&service, &category)?;

            if description.is_none() && purpose.is_none() {
                println!("No changes specified. Use --description or --purpose to edit.");
                return Ok(());
            }

            let purpose = purpose
                .map(|p| p.parse::<CategoryPurpose>())
                .transpose()?;
            let updated = service.update(category.id(), description.as_deref(), purpose)?;
            println!("Updated category: {}", updated.description());
            println!("  Purpose: {}", updated.purpose());
        }

        CategoryCommands::Delete { category } => {
            let category = find_category(&service, &category)?;
            service.delete(category.id())?;
            println!("Deleted category: {}", category.description());
        }
    }

    Ok(())
}

pub(crate) fn find_category(
    service: &CategoryService,
    identifier: &str,
) -> ExpenseResult<Category> {
    service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::category_not_found(identifier))
}
