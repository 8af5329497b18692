//! CLI commands for reports
//!
//! Dashboard figures over the filtered entry set.

use clap::{Args, Subcommand};

use super::{parse_today, FilterArgs};
use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::models::{Entry, EntryType};
use crate::query::{DataQuality, EntryQuery, EntrySort};
use crate::reports::{self, aggregate, group_by_month, group_by_property, SummaryMetrics};
use crate::storage::Storage;

/// Filters plus the reference date, shared by every report
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    #[command(flatten)]
    pub filters: FilterArgs,
    /// Reference date for windows and reminders (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<String>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Income, expense, net balance and averages
    Summary(ReportArgs),
    /// Income and expense totals per property
    Property(ReportArgs),
    /// Income and expense per calendar month
    Monthly(ReportArgs),
    /// Renewals that are approaching, due or past due
    Reminders(ReportArgs),
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let currency = settings.currency_symbol.as_str();
    let entries = storage.entries.snapshot()?;
    DataQuality::scan(&entries).log();

    match cmd {
        ReportCommands::Summary(args) => {
            let today = parse_today(args.today.as_deref())?;
            let selected = select(&entries, &args, today)?;
            let totals = aggregate(selected.iter().copied());
            let metrics = SummaryMetrics::from_totals(&totals);
            print!("{}", metrics.format_terminal(&totals, currency));
        }
        ReportCommands::Property(args) => {
            let today = parse_today(args.today.as_deref())?;
            let selected = select(&entries, &args, today)?;
            let income = group_by_property(selected.iter().copied(), EntryType::Income);
            let expense = group_by_property(selected.iter().copied(), EntryType::Expense);
            print!(
                "{}",
                reports::property::format_terminal(&income, &expense, currency)
            );
        }
        ReportCommands::Monthly(args) => {
            let today = parse_today(args.today.as_deref())?;
            let selected = select(&entries, &args, today)?;
            let months = group_by_month(selected.iter().copied());
            print!("{}", reports::monthly::format_terminal(&months, currency));
        }
        ReportCommands::Reminders(args) => {
            let today = parse_today(args.today.as_deref())?;
            let selected = select(&entries, &args, today)?;
            let rows = reports::reminders(selected.iter().copied(), today);
            println!("Renewal reminders as of {}", today);
            print!("{}", reports::reminders::format_terminal(&rows, currency));
        }
    }

    Ok(())
}

fn select<'a>(
    entries: &'a [Entry],
    args: &ReportArgs,
    today: chrono::NaiveDate,
) -> LedgerResult<Vec<&'a Entry>> {
    let query = EntryQuery::new(args.filters.to_filter()?, EntrySort::default());
    Ok(query.select(entries, today))
}
