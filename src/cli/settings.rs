//! Settings CLI commands
//!
//! Local preferences (currency, theme, notifications) and the shared
//! settings record (properties, categories, receipt templates).

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use super::parse_entry_type;
use crate::config::settings::{Settings, Theme};
use crate::error::{LedgerError, LedgerResult};
use crate::storage::Storage;

/// Add or remove a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListAction {
    Add,
    Remove,
}

/// On/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show preferences, properties, categories and templates
    Show,
    /// Set the currency symbol
    Currency {
        /// Symbol, e.g. "₹" or "$"
        symbol: String,
    },
    /// Set the colour theme
    Theme {
        /// light or dark
        theme: String,
    },
    /// Turn renewal notices in listings on or off
    Notifications {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Set the default listing page size
    PageSize {
        size: usize,
    },
    /// Add or remove a property
    Property {
        #[arg(value_enum)]
        action: ListAction,
        name: String,
    },
    /// Add or remove a category for an entry type
    Category {
        #[arg(value_enum)]
        action: ListAction,
        /// income or expense
        entry_type: String,
        name: String,
    },
    /// Load the receipt body template from a file
    Template {
        file: PathBuf,
    },
    /// Set the receipt filename template
    Filename {
        template: String,
    },
}

/// Handle a settings command
pub fn handle_settings_command(
    storage: &Storage,
    settings: &mut Settings,
    cmd: SettingsCommands,
) -> LedgerResult<()> {
    match cmd {
        SettingsCommands::Show => {
            let data = storage.settings_data.get()?;

            println!("Preferences");
            println!("===========");
            println!("  Currency:       {}", settings.currency_symbol);
            println!("  Theme:          {}", settings.theme);
            println!(
                "  Notifications:  {}",
                if settings.notifications_enabled { "on" } else { "off" }
            );
            println!("  Page size:      {}", settings.page_size);
            println!();
            println!("Properties:         {}", join_or_none(&data.properties));
            println!("Income categories:  {}", join_or_none(&data.income_categories));
            println!("Expense categories: {}", join_or_none(&data.expense_categories));
            println!();
            println!("Receipt filename:   {}", data.pdf_filename);
            println!("Receipt template:");
            for line in data.pdf_template.lines() {
                println!("  {}", line);
            }
        }

        SettingsCommands::Currency { symbol } => {
            let symbol = symbol.trim();
            if symbol.is_empty() {
                return Err(LedgerError::Validation(
                    "Currency symbol cannot be empty".into(),
                ));
            }
            settings.currency_symbol = symbol.to_string();
            settings.save(storage.paths())?;
            println!("Currency set to {}", settings.currency_symbol);
        }

        SettingsCommands::Theme { theme } => {
            let theme: Theme = theme.parse()?;
            settings.theme = theme;
            settings.save(storage.paths())?;
            println!("Theme set to {}", theme);
        }

        SettingsCommands::Notifications { state } => {
            settings.notifications_enabled = state == Toggle::On;
            settings.save(storage.paths())?;
            println!(
                "Notifications {}",
                if settings.notifications_enabled { "on" } else { "off" }
            );
        }

        SettingsCommands::PageSize { size } => {
            if size == 0 {
                return Err(LedgerError::Validation(
                    "Page size must be at least 1".into(),
                ));
            }
            settings.page_size = size;
            settings.save(storage.paths())?;
            println!("Page size set to {}", size);
        }

        SettingsCommands::Property { action, name } => {
            let changed = storage.settings_data.update(|data| match action {
                ListAction::Add => data.add_property(&name),
                ListAction::Remove => data.remove_property(&name),
            })?;
            storage.settings_data.save()?;
            report_list_change("Property", &name, action, changed);
        }

        SettingsCommands::Category {
            action,
            entry_type,
            name,
        } => {
            let entry_type = parse_entry_type(&entry_type)?;
            let changed = storage.settings_data.update(|data| match action {
                ListAction::Add => data.add_category(entry_type, &name),
                ListAction::Remove => data.remove_category(entry_type, &name),
            })?;
            storage.settings_data.save()?;
            report_list_change(&format!("{} category", entry_type), &name, action, changed);
        }

        SettingsCommands::Template { file } => {
            let template = std::fs::read_to_string(&file).map_err(|e| {
                LedgerError::Io(format!("Failed to read {}: {}", file.display(), e))
            })?;
            storage
                .settings_data
                .update(|data| data.pdf_template = template)?;
            storage.settings_data.save()?;
            println!("Receipt template loaded from {}", file.display());
        }

        SettingsCommands::Filename { template } => {
            if template.trim().is_empty() {
                return Err(LedgerError::Validation(
                    "Filename template cannot be empty".into(),
                ));
            }
            storage
                .settings_data
                .update(|data| data.pdf_filename = template.trim().to_string())?;
            storage.settings_data.save()?;
            println!("Receipt filename template set to {}", template.trim());
        }
    }

    Ok(())
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}

fn report_list_change(kind: &str, name: &str, action: ListAction, changed: bool) {
    match (action, changed) {
        (ListAction::Add, true) => println!("{} '{}' added", kind, name.trim()),
        (ListAction::Add, false) => println!("{} '{}' already exists", kind, name.trim()),
        (ListAction::Remove, true) => println!("{} '{}' removed", kind, name.trim()),
        (ListAction::Remove, false) => println!("{} '{}' not found", kind, name.trim()),
    }
}
