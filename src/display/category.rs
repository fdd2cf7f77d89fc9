//! Category display formatting

use crate::models::Category;

use super::truncate;

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nAdd one with 'expense category add <DESCRIPTION> --purpose <PURPOSE>'.\n"
            .to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<14} {:<36} {}\n", "ID", "Description", "Purpose"));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:<14} {:<36} {}\n",
            category.id().to_string(),
            truncate(category.description(), 36),
            category.purpose()
        ));
    }

    output
}

/// Format one category with the number of transactions using it
pub fn format_category_details(category: &Category, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category:     {}\n", category.description()));
    output.push_str(&format!("ID:           {}\n", category.id().as_uuid()));
    output.push_str(&format!("Purpose:      {}\n", category.purpose()));
    output.push_str(&format!("Transactions: {}\n", transaction_count));
    output.push_str(&format!(
        "Created:      {}\n",
        category.created_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Updated:      {}\n",
        category.updated_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
