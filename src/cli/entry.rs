//! Entry CLI commands
//!
//! Implements CLI commands for entry management and the filtered listing.

use clap::Subcommand;

use super::{
    parse_amount, parse_date, parse_entry_type, parse_reminder, parse_today, FilterArgs,
};
use crate::config::settings::Settings;
use crate::display::entry::{format_entry_details, format_entry_page};
use crate::error::{LedgerError, LedgerResult};
use crate::models::ReminderWindow;
use crate::query::{clamp_page, EntryQuery, EntrySort, SortDirection, SortKey};
use crate::services::{CreateEntryInput, EntryService, UpdateEntryInput};
use crate::storage::Storage;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Add a new entry
    Add {
        /// Counterparty name (tenant, vendor, ...)
        name: String,
        /// Amount (e.g., "15000" or "1,50,000.50")
        amount: String,
        /// Entry type (income or expense)
        #[arg(short = 't', long = "type")]
        entry_type: String,
        /// Category name
        #[arg(short, long)]
        category: Option<String>,
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Contact details
        #[arg(long)]
        contact: Option<String>,
        /// Property or location
        #[arg(short, long)]
        property: Option<String>,
        /// Renewal date (YYYY-MM-DD)
        #[arg(long)]
        renew_date: Option<String>,
        /// Days before renewal to remind (0, 5, 10 or 15)
        #[arg(long, default_value = "0")]
        reminder: String,
    },
    /// List entries
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Sort key (id, name, contact, type, category, amount, date, monthYear,
        /// renewDate, renewDateReminder, property); defaults to newest first
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
        /// Reference date for windows and reminder status (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Show entry details
    Show {
        /// Entry ID or unique ID prefix
        id: String,
        /// Reference date for the reminder status (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
    /// Edit an entry
    Edit {
        /// Entry ID or unique ID prefix
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New contact
        #[arg(long)]
        contact: Option<String>,
        /// New property
        #[arg(short, long)]
        property: Option<String>,
        /// New renewal date; "none" clears it
        #[arg(long)]
        renew_date: Option<String>,
        /// New reminder window (0, 5, 10 or 15)
        #[arg(long)]
        reminder: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID or unique ID prefix
        id: String,
    },
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> LedgerResult<()> {
    let service = EntryService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        EntryCommands::Add {
            name,
            amount,
            entry_type,
            category,
            date,
            contact,
            property,
            renew_date,
            reminder,
        } => {
            let mut input = CreateEntryInput::new(
                name,
                parse_entry_type(&entry_type)?,
                parse_amount(&amount)?,
                parse_today(date.as_deref())?,
            );
            input.category = category;
            input.contact = contact;
            input.property = property;
            input.renew_date = renew_date.as_deref().map(parse_date).transpose()?;
            input.reminder = parse_reminder(&reminder)?;

            let entry = service.create(input)?;

            println!("Created entry:");
            println!("  ID:       {}", entry.id);
            println!("  Date:     {}", entry.date);
            println!("  Type:     {}", entry.entry_type);
            println!("  Amount:   {}", entry.amount.format_with_symbol(currency));
            if !entry.category.is_empty() {
                println!("  Category: {}", entry.category);
            }
            if !entry.property.is_empty() {
                println!("  Property: {}", entry.property);
            }
        }

        EntryCommands::List {
            filters,
            sort,
            desc,
            page,
            page_size,
            today,
        } => {
            let today = parse_today(today.as_deref())?;
            let sort = match sort {
                Some(key) => {
                    let key: SortKey = key.parse().map_err(LedgerError::Validation)?;
                    let direction = if desc {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    };
                    EntrySort::new(key, direction)
                }
                None => EntrySort::default(),
            };

            let query = EntryQuery::new(filters.to_filter()?, sort)
                .with_page(page, page_size.unwrap_or(settings.page_size));
            let entries = service.list()?;
            let mut view = query.run(&entries, today)?;

            let total_pages = view.page.total_pages;
            if total_pages > 0 && page > total_pages {
                let last = clamp_page(page, total_pages);
                println!("Page {} is past the end; showing page {}.", page, last);
                view = query.clone().with_page(last, query.page_size).run(&entries, today)?;
            }

            print!("{}", format_entry_page(&view.page, currency, today));

            if view.page.total_items > 0 {
                println!(
                    "Income {}  Expense {}  Net {}",
                    view.totals.income.sum.format_with_symbol(currency),
                    view.totals.expense.sum.format_with_symbol(currency),
                    view.summary.net_balance.format_with_symbol(currency)
                );
            }
            if settings.notifications_enabled && !view.reminders.is_empty() {
                println!(
                    "{} renewal(s) need attention. Run 'propledger report reminders' for details.",
                    view.reminders.len()
                );
            }
            if !view.quality.is_clean() {
                println!(
                    "Warning: {} entries have unparsable dates and are left out of date filters.",
                    view.quality.invalid_dates.len() + view.quality.invalid_renew_dates.len()
                );
            }
        }

        EntryCommands::Show { id, today } => {
            let today = parse_today(today.as_deref())?;
            let entry = service.find(&id)?;
            print!("{}", format_entry_details(&entry, currency, today));
        }

        EntryCommands::Edit {
            id,
            name,
            amount,
            entry_type,
            category,
            date,
            contact,
            property,
            renew_date,
            reminder,
        } => {
            let entry = service.find(&id)?;

            let renew_date = match renew_date.as_deref().map(str::trim) {
                None => None,
                Some("") | Some("none") => Some(None),
                Some(s) => Some(Some(parse_date(s)?)),
            };

            let input = UpdateEntryInput {
                name,
                entry_type: entry_type.as_deref().map(parse_entry_type).transpose()?,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                contact,
                category,
                property,
                renew_date,
                reminder: reminder.as_deref().map(parse_reminder).transpose()?,
            };

            if input.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service.update(&entry.id, input)?;
            println!("Updated entry {}", updated.id);
            if updated.renew_date_reminder == ReminderWindow::Off
                && entry.renew_date_reminder.is_enabled()
            {
                println!("  Renewal reminder turned off");
            }
        }

        EntryCommands::Delete { id } => {
            let entry = service.find(&id)?;
            let deleted = service.delete(&entry.id)?;
            println!(
                "Deleted entry {} ({} {})",
                deleted.id,
                deleted.entry_type,
                deleted.amount.format_with_symbol(currency)
            );
        }
    }

    Ok(())
}
