//! Totals by person
//!
//! Income, expense and balance for every person, plus grand totals.

use std::io::Write;

use crate::display::truncate;
use crate::error::ExpenseResult;
use crate::models::PersonId;
use crate::storage::Storage;

use super::totals::{compute_totals, Totals};

/// One person's row in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonTotalsRow {
    pub person_id: PersonId,
    pub name: String,
    pub age: i32,
    pub totals: Totals,
}

/// Totals for every person, ordered by name
#[derive(Debug, Clone)]
pub struct PersonTotalsReport {
    pub rows: Vec<PersonTotalsRow>,
    pub grand_totals: Totals,
}

impl PersonTotalsReport {
    /// Build the report over every stored transaction
    pub fn generate(storage: &Storage) -> ExpenseResult<Self> {
        let persons = storage.persons.get_all()?;
        let transactions = storage.transactions.get_all()?;

        let keys: Vec<_> = persons.iter().map(|p| p.id()).collect();
        let (groups, grand_totals) = compute_totals(&transactions, &keys, |t| t.person_id())?;

        let rows = persons
            .iter()
            .zip(groups)
            .map(|(person, (_, totals))| PersonTotalsRow {
                person_id: person.id(),
                name: person.name().to_string(),
                age: person.age(),
                totals,
            })
            .collect();

        Ok(Self { rows, grand_totals })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Totals by Person\n");
        output.push_str(&"=".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>5} {:>13} {:>13} {:>13}\n",
            "Person", "Age", "Income", "Expense", "Balance"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No persons registered.\n");
        }

        for row in &self.rows {
            output.push_str(&format!(
                "{:<30} {:>5} {:>13} {:>13} {:>13}\n",
                truncate(&row.name, 30),
                row.age,
                row.totals.income.format_with_symbol(currency),
                row.totals.expense.format_with_symbol(currency),
                row.totals.balance().format_with_symbol(currency)
            ));
        }

        output.push_str(&"-".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<36} {:>13} {:>13} {:>13}\n",
            "TOTAL",
            self.grand_totals.income.format_with_symbol(currency),
            self.grand_totals.expense.format_with_symbol(currency),
            self.grand_totals.balance().format_with_symbol(currency)
        ));

        output
    }

    /// Export the report as CSV, ending with a TOTAL row
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Person ID", "Name", "Age", "Income", "Expense", "Balance"])?;

        for row in &self.rows {
            csv.write_record([
                row.person_id.as_uuid().to_string(),
                row.name.clone(),
                row.age.to_string(),
                row.totals.income.to_decimal_string(),
                row.totals.expense.to_decimal_string(),
                row.totals.balance().to_decimal_string(),
            ])?;
        }

        csv.write_record([
            String::new(),
            "TOTAL".to_string(),
            String::new(),
            self.grand_totals.income.to_decimal_string(),
            self.grand_totals.expense.to_decimal_string(),
            self.grand_totals.balance().to_decimal_string(),
        ])?;

        csv.flush()?;
        Ok(())
    }
}
