//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_page_footer, format_transaction_details, format_transaction_list};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::transaction::{check_description, check_value};
use crate::models::{Money, Transaction, TransactionType};
use crate::services::{
    CategoryService, CreateTransactionInput, PersonService, TransactionService,
    UpdateTransactionInput,
};
use crate::storage::Storage;

use super::category::find_category;
use super::page_request;
use super::person::find_person;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// What the money was for
        description: String,
        /// Value (e.g., "10.50" or "$10.50"), always positive
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Transaction type: expense or income (or 1, 2)
        #[arg(short = 't', long = "type")]
        transaction_type: String,
        /// Category description or ID
        #[arg(short, long)]
        category: String,
        /// Person name or ID
        #[arg(short, long)]
        person: String,
    },

    /// List transactions, newest first
    List {
        /// Only this person's transactions
        #[arg(short, long)]
        person: Option<String>,
        /// Page number (starting at 1)
        #[arg(long)]
        page: Option<i64>,
        /// Transactions per page (max 50)
        #[arg(long)]
        page_size: Option<i64>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Edit a transaction (its person cannot change)
    Edit {
        /// Transaction ID
        id: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New value
        #[arg(short, long, allow_hyphen_values = true)]
        value: Option<String>,
        /// New type: expense or income (or 1, 2)
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,
        /// New category description or ID
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> ExpenseResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        TransactionCommands::Add {
            description,
            value,
            transaction_type,
            category,
            person,
        } => {
            // Same order as Transaction::new: description, value, type
            check_description(&description)?;
            let value = parse_value(&value)?;
            let transaction_type = parse_type(&transaction_type)?;
            let category = find_category(&CategoryService::new(storage), &category)?;
            let person = find_person(&PersonService::new(storage), &person)?;

            let txn = service.create(CreateTransactionInput {
                description,
                value,
                transaction_type,
                category_id: category.id(),
                person_id: person.id(),
            })?;

            println!("Created transaction: {}", txn.description());
            println!("  {}: {}", txn.transaction_type(), txn.value().format_with_symbol(currency));
            println!("  Category: {}", category.description());
            println!("  Person: {}", person.name());
            println!("  ID: {}", txn.id());
        }

        TransactionCommands::List {
            person,
            page,
            page_size,
        } => {
            let person_id = match person {
                Some(identifier) => Some(find_person(&PersonService::new(storage), &identifier)?.id()),
                None => None,
            };

            let page =
                service.list_details_paged(page_request(page, page_size, settings), person_id)?;
            print!("{}", format_transaction_list(&page.items, currency));
            if page.total_count > 0 {
                println!("{}", format_page_footer(&page));
            }
        }

        TransactionCommands::Show { id } => {
            let txn = find_transaction(&service, &id)?;
            let details = service
                .details(txn.id())?
                .ok_or_else(|| ExpenseError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&details, currency));
        }

        TransactionCommands::Edit {
            id,
            description,
            value,
            transaction_type,
            category,
        } => {
            let txn = find_transaction(&service, &id)?;

            if description.is_none()
                && value.is_none()
                && transaction_type.is_none()
                && category.is_none()
            {
                println!(
                    "No changes specified. Use --description, --value, --type or --category to edit."
                );
                return Ok(());
            }

            if let Some(description) = &description {
                check_description(description)?;
            }
            let value = value.as_deref().map(parse_value).transpose()?;
            let transaction_type = transaction_type.as_deref().map(parse_type).transpose()?;

            let category_id = match category {
                Some(identifier) => {
                    Some(find_category(&CategoryService::new(storage), &identifier)?.id())
                }
                None => None,
            };

            let updated = service.update(
                txn.id(),
                UpdateTransactionInput {
                    description,
                    value,
                    transaction_type,
                    category_id,
                },
            )?;

            println!("Updated transaction: {}", updated.description());
            println!(
                "  {}: {}",
                updated.transaction_type(),
                updated.value().format_with_symbol(currency)
            );
        }

        TransactionCommands::Delete { id } => {
            let txn = find_transaction(&service, &id)?;
            service.delete(txn.id())?;
            println!("Deleted transaction: {}", txn.description());
        }
    }

    Ok(())
}

fn find_transaction(service: &TransactionService, identifier: &str) -> ExpenseResult<Transaction> {
    service
        .find(identifier)?
        .ok_or_else(|| ExpenseError::transaction_not_found(identifier))
}

fn parse_value(input: &str) -> ExpenseResult<Money> {
    let value = Money::parse(input)?;
    check_value(value)?;
    Ok(value)
}

fn parse_type(input: &str) -> ExpenseResult<TransactionType> {
    Ok(input.parse()?)
}
