//! Totals by category

use std::io::Write;

use crate::display::truncate;
use crate::error::ExpenseResult;
use crate::models::{CategoryId, CategoryPurpose};
use crate::storage::Storage;

use super::totals::{compute_totals, Totals};

/// One category's row in the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotalsRow {
    pub category_id: CategoryId,
    pub description: String,
    pub purpose: CategoryPurpose,
    pub totals: Totals,
}

/// Totals for every category, ordered by description
#[derive(Debug, Clone)]
pub struct CategoryTotalsReport {
    pub rows: Vec<CategoryTotalsRow>,
    pub grand_totals: Totals,
}

impl CategoryTotalsReport {
    pub fn generate(storage: &Storage) -> ExpenseResult<Self> {
        let categories = storage.categories.get_all()?;
        let transactions = storage.transactions.get_all()?;

        let keys: Vec<_> = categories.iter().map(|c| c.id()).collect();
        let (groups, grand_totals) = compute_totals(&transactions, &keys, |t| t.category_id())?;

        let rows = categories
            .iter()
            .zip(groups)
            .map(|(category, (_, totals))| CategoryTotalsRow {
                category_id: category.id(),
                description: category.description().to_string(),
                purpose: category.purpose(),
                totals,
            })
            .collect();

        Ok(Self { rows, grand_totals })
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Totals by Category\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:<8} {:>13} {:>13} {:>13}\n",
            "Category", "Purpose", "Income", "Expense", "Balance"
        ));
        output.push_str(&"-".repeat(80));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No categories registered.\n");
        }

        for row in &self.rows {
            output.push_str(&format!(
                "{:<28} {:<8} {:>13} {:>13} {:>13}\n",
                truncate(&row.description, 28),
                row.purpose.to_string(),
                row.totals.income.format_with_symbol(currency),
                row.totals.expense.format_with_symbol(currency),
                row.totals.balance().format_with_symbol(currency)
            ));
        }

        output.push_str(&"-".repeat(80));
        output.push('\n');
        output.push_str(&format!(
            "{:<37} {:>13} {:>13} {:>13}\n",
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

        csv.write_record([
            "Category ID",
            "Description",
            "Purpose",
            "Income",
            "Expense",
            "Balance",
        ])?;

        for row in &self.rows {
            csv.write_record([
                row.category_id.as_uuid().to_string(),
                row.description.clone(),
                row.purpose.to_string(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::{Money, TransactionType};
    use crate::services::{
        CategoryService, CreateTransactionInput, PersonService, TransactionService,
    };
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_generate_matches_person_totals() {
        let (_temp_dir, storage) = create_test_storage();

        let persons = PersonService::new(&storage);
        let ana = persons.create("Ana", 30).unwrap();
        let leo = persons.create("Leo", 12).unwrap();

        let categories = CategoryService::new(&storage);
        let food = categories.create("Food", CategoryPurpose::Expense).unwrap();
        let salary = categories.create("Salary", CategoryPurpose::Income).unwrap();
        categories.create("Unused", CategoryPurpose::Both).unwrap();

        let txns = TransactionService::new(&storage);
        for (cents, kind, category, person) in [
            (4590, TransactionType::Expense, &food, &ana),
            (1210, TransactionType::Expense, &food, &leo),
            (500000, TransactionType::Income, &salary, &ana),
        ] {
            txns.create(CreateTransactionInput {
                description: "Entry".into(),
                value: Money::from_cents(cents),
                transaction_type: kind,
                category_id: category.id(),
                person_id: person.id(),
            })
            .unwrap();
        }

        let report = CategoryTotalsReport::generate(&storage).unwrap();
        let descriptions: Vec<_> = report.rows.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Food", "Salary", "Unused"]);

        assert_eq!(report.rows[0].totals.expense, Money::from_cents(5800));
        assert_eq!(report.rows[0].totals.income, Money::zero());
        assert_eq!(report.rows[1].totals.income, Money::from_cents(500000));
        assert_eq!(report.rows[2].totals, Totals::default());

        let by_person = crate::reports::PersonTotalsReport::generate(&storage).unwrap();
        assert_eq!(report.grand_totals, by_person.grand_totals);
        assert_eq!(report.grand_totals.balance(), Money::from_cents(494200));
    }

    #[test]
    fn test_outputs() {
        let (_temp_dir, storage) = create_test_storage();
        CategoryService::new(&storage)
            .create("Food, Drinks", CategoryPurpose::Expense)
            .unwrap();

        let report = CategoryTotalsReport::generate(&storage).unwrap();
        let text = report.format_terminal("R$");
        assert!(text.contains("Food, Drinks"));
        assert!(text.contains("R$0.00"));

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();
        assert!(csv.contains("\"Food, Drinks\",Expense,0.00,0.00,0.00"));
    }
}
