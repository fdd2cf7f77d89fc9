//! Person display formatting

use crate::models::Person;

use super::truncate;

/// Format persons as a table
pub fn format_person_list(persons: &[Person]) -> String {
    if persons.is_empty() {
        return "No persons found.\n\nAdd one with 'expense person add <NAME> <AGE>'.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:<14} {:<30} {:>5}  {}\n", "ID", "Name", "Age", ""));
    output.push_str(&"-".repeat(58));
    output.push('\n');

    for person in persons {
        let minor = if person.is_minor() { "minor" } else { "" };
        output.push_str(&format!(
            "{:<14} {:<30} {:>5}  {}\n",
            person.id().to_string(),
            truncate(person.name(), 30),
            person.age(),
            minor
        ));
    }

    output
}

/// Format one person with their transaction count
pub fn format_person_details(person: &Person, transaction_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Person:       {}\n", person.name()));
    output.push_str(&format!("ID:           {}\n", person.id().as_uuid()));
    output.push_str(&format!(
        "Age:          {}{}\n",
        person.age(),
        if person.is_minor() { " (minor, expenses only)" } else { "" }
    ));
    output.push_str(&format!("Transactions: {}\n", transaction_count));
    output.push_str(&format!(
        "Created:      {}\n",
        person.created_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!(
        "Updated:      {}\n",
        person.updated_at().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output
}
