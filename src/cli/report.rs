//! CLI commands for reports

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::{CategoryTotalsReport, PersonTotalsReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense and balance per person
    Persons {
        /// Export to a CSV file instead of printing
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Income, expense and balance per category
    Categories {
        /// Export to a CSV file instead of printing
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Persons { csv } => {
            let report = PersonTotalsReport::generate(storage)?;
            match csv {
                Some(path) => {
                    report.export_csv(create_export_file(&path)?)?;
                    println!("Person totals exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Categories { csv } => {
            let report = CategoryTotalsReport::generate(storage)?;
            match csv {
                Some(path) => {
                    report.export_csv(create_export_file(&path)?)?;
                    println!("Category totals exported to: {}", path.display());
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }
    }

    Ok(())
}

fn create_export_file(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
