use anyhow::Result;
use clap::{Parser, Subcommand};

use propledger::cli::{
    handle_entry_command, handle_export_command, handle_import_command, handle_report_command,
    handle_settings_command, handle_words_command, EntryCommands, ExportCommands, ImportCommands,
    ReportCommands, SettingsCommands,
};
use propledger::config::{paths::LedgerPaths, settings::Settings};
use propledger::storage::Storage;

#[derive(Parser)]
#[command(
    name = "propledger",
    version,
    about = "Property income and expense tracker",
    long_about = "propledger records rent, deposits, repairs and other property \
                  entries, summarises them per property and month, flags lease \
                  renewals before they fall due and exports CSV and receipts."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the ledger
    Init,

    /// Show current configuration and paths
    Config,

    /// Entry management commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Dashboard reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Export entries, backups and receipts
    #[command(subcommand)]
    Export(ExportCommands),

    /// Import CSV files and backups
    #[command(subcommand)]
    Import(ImportCommands),

    /// Preferences, properties, categories and receipt templates
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Write an amount in words (Indian numbering)
    Words {
        /// Amount, e.g. "150000"
        amount: String,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing propledger at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            let data = storage.settings_data.get()?;
            println!("Initialization complete!");
            println!();
            println!("Income categories:  {}", data.income_categories.join(", "));
            println!("Expense categories: {}", data.expense_categories.join(", "));
            println!();
            println!("Run 'propledger settings property add <name>' to register a property.");
        }
        Some(Commands::Config) => {
            println!("propledger Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Initialized:      {}", storage.is_initialized());
            println!();
            println!("Settings:");
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Theme:          {}", settings.theme);
            println!("  Notifications:  {}", settings.notifications_enabled);
            println!("  Page size:      {}", settings.page_size);
        }
        Some(Commands::Entry(cmd)) => {
            handle_entry_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export(cmd)) => {
            handle_export_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import(cmd)) => {
            handle_import_command(&storage, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&storage, &mut settings, cmd)?;
        }
        Some(Commands::Words { amount }) => {
            handle_words_command(&amount)?;
        }
        None => {
            println!("propledger - property income and expense tracker");
            println!();
            println!("Run 'propledger --help' for usage information.");
        }
    }

    Ok(())
}
