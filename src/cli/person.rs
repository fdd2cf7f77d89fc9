//! Person CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_page_footer, format_person_details, format_person_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Person;
use crate::services::PersonService;
use crate::storage::Storage;

use super::page_request;

/// Person subcommands
#[derive(Subcommand)]
pub enum PersonCommands {
    /// Register a household member
    Add {
        /// Person name
        name: String,
        /// Age in whole years
        #[arg(allow_negative_numbers = true)]
        age: i32,
    },

    /// List persons ordered by name
    List {
        /// Page number (starting at 1)
        #[arg(long)]
        page: Option<i64>,
        /// Persons per page (max 50)
        #[arg(long)]
        page_size: Option<i64>,
    },

    /// Show person details
    Show {
        /// Person name or ID
        person: String,
    },

    /// Edit a person
    Edit {
        /// Person name or ID
        person: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New age
        #[arg(short, long, allow_negative_numbers = true)]
        age: Option<i32>,
    },

    /// Delete a person and all of their transactions
    Delete {
        /// Person name or ID
        person: String,
    },
}

/// Handle a person command
pub fn handle_person_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PersonCommands,
) -> ExpenseResult<()> {
    let service = PersonService::new(storage);

    match cmd {
        PersonCommands::Add { name, age } => {
            let person = service.create(&name, age)?;
            println!("Created person: {}", person.name());
            println!("  Age: {}", person.age());
            println!("  ID: {}", person.id());
        }

        PersonCommands::List { page, page_size } => {
            let page = service.list_paged(page_request(page, page_size, settings))?;
            print!("{}", format_person_list(&page.items));
            if page.total_count > 0 {
                println!("{}", format_page_footer(&page));
            }
        }

        PersonCommands::Show { person } => {
            let person = find_person(&service, &person)?;
            let count = storage.transactions.get_by_person(person.id())?.len();
            print!("{}", format_person_details(&person, count));
        }

        PersonCommands::Edit { person, name, age } => {
            let person = find_person(&service, &person)?;

            if name.is_none() && age.is_none() {
                println!("No changes specified. Use --name or --age to edit.");
                return Ok(());
            }

            let updated = service.update(person.id(), name.as_deref(), age)?;
            println!("Updated person: {}", updated.name());
            println!("  Age: {}", updated.age());
        }

        PersonCommands::Delete { person } => {
            let person = find_person(&service, &person)?;
            let (deleted, removed) = service.delete(person.id())?;
            println!("Deleted person: {}", deleted.name());
            println!("  Transactions removed: {}", removed);
        }
    }

    Ok(())
}

pub(crate) fn find_person(service: &PersonService, identifier: &str) -> ExpenseResult<Person> {
    service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::person_not_found(identifier))
}
