//! Renewal reminders
//!
//! An entry with a renewal date and a reminder window is flagged once
//! `today` enters the window, stays flagged on the renewal day and remains
//! flagged afterwards as past due. The status is recomputed from `today` on
//! every call and never stored.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::Entry;

/// Where an entry stands relative to its renewal date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReminderStatus {
    /// Renewal is ahead but inside the reminder window
    Approaching,
    /// Renewal is today
    Due,
    /// Renewal date has passed
    PastDue,
}

impl ReminderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approaching => "Approaching",
            Self::Due => "Due",
            Self::PastDue => "Past Due",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the reminder worklist
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder<'a> {
    pub entry: &'a Entry,
    pub renew_date: NaiveDate,
    /// Whole days from `today` to the renewal date; negative once past
    pub days_until_renew: i64,
    pub status: ReminderStatus,
}

/// Days from `today` until the entry renews, when it has a parsable renew date
/// and its reminder is on
pub fn days_until_renew(entry: &Entry, today: NaiveDate) -> Option<i64> {
    if !entry.renew_date_reminder.is_enabled() {
        return None;
    }
    entry
        .parsed_renew_date()
        .map(|renew| renew.signed_duration_since(today).num_days())
}

/// Reminder status of a single entry, `None` when it is not (yet) flagged
pub fn reminder_status(entry: &Entry, today: NaiveDate) -> Option<ReminderStatus> {
    let days = days_until_renew(entry, today)?;
    let window = i64::from(entry.renew_date_reminder.days());

    match days {
        0 => Some(ReminderStatus::Due),
        d if d < 0 => Some(ReminderStatus::PastDue),
        d if d <= window => Some(ReminderStatus::Approaching),
        _ => None,
    }
}

/// Build the reminder worklist, ordered by renewal date (earliest first).
///
/// Entries with the reminder off or an unparsable renewal date never appear.
pub fn reminders<'a, I>(entries: I, today: NaiveDate) -> Vec<Reminder<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut rows: Vec<Reminder<'a>> = entries
        .into_iter()
        .filter_map(|entry| {
            let renew_date = entry.parsed_renew_date()?;
            let status = reminder_status(entry, today)?;
            Some(Reminder {
                entry,
                renew_date,
                days_until_renew: renew_date.signed_duration_since(today).num_days(),
                status,
            })
        })
        .collect();

    rows.sort_by_key(|r| r.renew_date);
    rows
}

/// Format the worklist for terminal display
pub fn format_terminal(rows: &[Reminder<'_>], currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<12} {:<12} {:>6} {:<24} {:<16} {:>14}\n",
        "Status", "Renew Date", "Days", "Name", "Property", "Amount"
    ));
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<12} {:<12} {:>6} {:<24} {:<16} {:>14}\n",
            row.status.label(),
            row.renew_date,
            row.days_until_renew,
            truncate(&row.entry.name, 24),
            truncate(&row.entry.property, 16),
            row.entry.amount.format_with_symbol(currency)
        ));
    }

    if rows.is_empty() {
        output.push_str("No renewals need attention.\n");
    }

    output
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
