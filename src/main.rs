use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_control::cli::{
    handle_audit_command, handle_category_command, handle_person_command, handle_report_command,
    handle_transaction_command, CategoryCommands, PersonCommands, ReportCommands,
    TransactionCommands,
};
use expense_control::config::paths::{ExpensePaths, DATA_DIR_ENV};
use expense_control::config::settings::Settings;
use expense_control::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Household expense tracking from the terminal",
    long_about = "expense-control records the people in a household, the categories \
                  their money goes to or comes from, and every income or expense \
                  transaction, then totals them per person and per category."
)]
struct Cli {
    /// Base directory for settings, data files and the audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Person management commands
    #[command(subcommand)]
    Person(PersonCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Totals reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => ExpensePaths::with_base_dir(dir),
        None => ExpensePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing expense-control at: {}", paths.base_dir().display());
            if initialize_storage(&paths)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; existing data was left untouched.");
            }
            println!();
            println!("Next steps:");
            println!("  expense person add <NAME> <AGE>");
            println!("  expense category add <DESCRIPTION> --purpose expense|income|both");
            println!("  expense transaction add <DESCRIPTION> <VALUE> --type expense|income --category <CATEGORY> --person <PERSON>");
        }
        Some(Commands::Config) => {
            println!("expense-control Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!("Initialized:    {}", paths.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Default page size: {}", settings.default_page_size);
            println!("  Audit enabled:     {}", settings.audit_enabled);
        }
        Some(Commands::Person(cmd)) => handle_person_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, &settings, cmd)?,
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?
        }
        Some(Commands::Report(cmd)) => handle_report_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        None => {
            println!("expense-control - household expense tracking");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense init' to get started.");
        }
    }

    Ok(())
}
