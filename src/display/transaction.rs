//! Transaction display formatting

use crate::services::TransactionDetails;

use super::truncate;

/// Format transactions as a table; expenses show with a leading minus
pub fn format_transaction_list(transactions: &[TransactionDetails], currency: &str) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<14} {:<24} {:<8} {:>12}  {:<16} {}\n",
        "ID", "Description", "Type", "Value", "Category", "Person"
    ));
    output.push_str(&"-".repeat(92));
    output.push('\n');

    for details in transactions {
        let txn = &details.transaction;
        output.push_str(&format!(
            "{:<14} {:<24} {:<8} {:>12}  {:<16} {}\n",
            txn.id().to_string(),
            truncate(txn.description(), 24),
            txn.transaction_type().to_string(),
            txn.signed_value().format_with_symbol(currency),
            truncate(&details.category_description, 16),
            truncate(&details.person_name, 20)
        ));
    }

    output
}

/// Format one transaction with its category and owner
pub fn format_transaction_details(details: &TransactionDetails, currency: &str) -> String {
    let txn = &details.transaction;
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.description()));
    output.push_str(&format!("ID:          {}\n", txn.id().as_uuid()));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type()));
    output.push_str(&format!(
        "Value:       {}\n",
        txn.value().format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", details.category_description));
    output.push_str(&format!("Person:      {}\n", details.person_name));
    output.push_str(&format!(
        "Created:     {}\n",
        txn.created_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Updated:     {}\n",
        txn.updated_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
