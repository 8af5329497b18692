//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod entry;
pub mod export;
pub mod import;
pub mod report;
pub mod settings;

pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use import::{handle_import_command, ImportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use settings::{handle_settings_command, SettingsCommands};

use chrono::NaiveDate;
use clap::Args;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_entry_date, EntryType, Money, ReminderWindow};
use crate::query::{EntryFilter, TimeWindow};

/// Filter flags shared by listings, reports and CSV export
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Name contains (case-insensitive)
    #[arg(long)]
    pub name: Option<String>,
    /// Contact contains (case-insensitive)
    #[arg(long)]
    pub contact: Option<String>,
    /// Entry type (income or expense)
    #[arg(long = "type")]
    pub entry_type: Option<String>,
    /// Category (exact, case-insensitive)
    #[arg(long)]
    pub category: Option<String>,
    /// Minimum amount (inclusive)
    #[arg(long)]
    pub min: Option<String>,
    /// Maximum amount (inclusive)
    #[arg(long)]
    pub max: Option<String>,
    /// Start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,
    /// End date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,
    /// Time window: all, 7d, 30d, month, year, Mar-2025 or 2025-03
    #[arg(long)]
    pub window: Option<String>,
    /// Property (exact, case-insensitive)
    #[arg(long)]
    pub property: Option<String>,
    /// Free-text search across all fields
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build the entry filter, rejecting malformed flag values
    pub fn to_filter(&self) -> LedgerResult<EntryFilter> {
        let mut filter = EntryFilter::new();

        if let Some(name) = &self.name {
            filter = filter.name(name.clone());
        }
        if let Some(contact) = &self.contact {
            filter = filter.contact(contact.clone());
        }
        if let Some(entry_type) = &self.entry_type {
            filter = filter.entry_type(parse_entry_type(entry_type)?);
        }
        if let Some(category) = &self.category {
            filter = filter.category(category.clone());
        }

        let min = self.min.as_deref().map(parse_amount).transpose()?;
        let max = self.max.as_deref().map(parse_amount).transpose()?;
        filter = filter.amount_range(min, max);

        let from = self.from.as_deref().map(parse_date).transpose()?;
        let to = self.to.as_deref().map(parse_date).transpose()?;
        filter = filter.date_range(from, to);

        if let Some(window) = &self.window {
            let window: TimeWindow = window.parse().map_err(LedgerError::Validation)?;
            filter = filter.window(window);
        }
        if let Some(property) = &self.property {
            filter = filter.property(property.clone());
        }
        if let Some(search) = &self.search {
            filter = filter.search(search.clone());
        }

        Ok(filter)
    }
}

/// Parse an amount argument
pub fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse(s).map_err(|e| {
        LedgerError::Validation(format!(
            "Invalid amount format: '{}'. Use format like '15000' or '1,50,000.50'. Error: {}",
            s, e
        ))
    })
}

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    parse_entry_date(s).ok_or_else(|| {
        LedgerError::Validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// The reference date for reminders and windows; defaults to the local date
pub fn parse_today(today: Option<&str>) -> LedgerResult<NaiveDate> {
    match today {
        Some(s) => parse_date(s),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn parse_entry_type(s: &str) -> LedgerResult<EntryType> {
    s.parse().map_err(LedgerError::Validation)
}

pub fn parse_reminder(s: &str) -> LedgerResult<ReminderWindow> {
    s.parse().map_err(LedgerError::Validation)
}

/// Print an amount in words
pub fn handle_words_command(amount: &str) -> LedgerResult<()> {
    let amount = parse_amount(amount)?;
    if amount.is_negative() {
        return Err(LedgerError::Validation(
            "Only non-negative amounts can be written in words".into(),
        ));
    }
    println!("{}", amount.in_words());
    Ok(())
}
