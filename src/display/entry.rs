//! Entry display formatting
//!
//! Listing table and detail view for entries. The status column uses the
//! same reminder rules, and the same `today`, as the reminder report.

use chrono::NaiveDate;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Entry;
use crate::query::Page;
use crate::reports::{reminder_status, ReminderStatus};

/// One row of the entry listing
#[derive(Debug, Clone, Tabled)]
pub struct EntryRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Date")]
    pub date: String,
    #[tabled(rename = "Type")]
    pub entry_type: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Property")]
    pub property: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Renews")]
    pub renew_date: String,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl EntryRow {
    pub fn from_entry(entry: &Entry, currency: &str, today: NaiveDate) -> Self {
        Self {
            id: entry.id.short().to_string(),
            date: entry.date.clone(),
            entry_type: entry.entry_type.to_string(),
            name: truncate(&entry.name, 24),
            category: entry.category.clone(),
            property: entry.property.clone(),
            amount: entry.amount.format_with_symbol(currency),
            renew_date: entry.renew_date.clone(),
            status: status_label(reminder_status(entry, today)),
        }
    }
}

fn status_label(status: Option<ReminderStatus>) -> String {
    status.map(|s| s.label().to_string()).unwrap_or_default()
}

/// Format entries as a table
pub fn format_entry_table(entries: &[&Entry], currency: &str, today: NaiveDate) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let rows: Vec<EntryRow> = entries
        .iter()
        .map(|e| EntryRow::from_entry(e, currency, today))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format one page of the listing with a position footer
pub fn format_entry_page(page: &Page<&Entry>, currency: &str, today: NaiveDate) -> String {
    let mut output = format_entry_table(&page.items, currency, today);
    if page.total_items > 0 {
        output.push_str(&format!(
            "Page {} of {} ({} entries)\n",
            page.page, page.total_pages, page.total_items
        ));
    }
    output
}

/// Format entry details for display
pub fn format_entry_details(entry: &Entry, currency: &str, today: NaiveDate) -> String {
    let mut output = String::new();

    output.push_str(&format!("Entry:       {}\n", entry.id));
    output.push_str(&format!("Type:        {}\n", entry.entry_type));
    output.push_str(&format!("Name:        {}\n", entry.name));

    if !entry.contact.is_empty() {
        output.push_str(&format!("Contact:     {}\n", entry.contact));
    }

    output.push_str(&format!(
        "Date:        {} ({})\n",
        entry.date,
        if entry.month_year_label().is_empty() {
            "unparsable".to_string()
        } else {
            entry.month_year_label()
        }
    ));
    output.push_str(&format!(
        "Amount:      {}\n",
        entry.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("In words:    {}\n", entry.amount.in_words()));

    if !entry.category.is_empty() {
        output.push_str(&format!("Category:    {}\n", entry.category));
    }
    if !entry.property.is_empty() {
        output.push_str(&format!("Property:    {}\n", entry.property));
    }

    if !entry.renew_date.is_empty() {
        output.push_str(&format!("Renews:      {}\n", entry.renew_date));
        if entry.renew_date_reminder.is_enabled() {
            output.push_str(&format!(
                "Reminder:    {} days before\n",
                entry.renew_date_reminder
            ));
        }
        if let Some(status) = reminder_status(entry, today) {
            output.push_str(&format!("Status:      {}\n", status));
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryType, Money, ReminderWindow};
    use crate::query::paginate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn lease() -> Entry {
        let mut e = Entry::new("Asha Rao", EntryType::Income, Money::from_units(15000), today());
        e.property = "Flat 2B".into();
        e.renew_date = "2025-06-18".into();
        e.renew_date_reminder = ReminderWindow::FiveDays;
        e
    }

    #[test]
    fn test_table_shows_status_for_same_today() {
        let entry = lease();
        let table = format_entry_table(&[&entry], "₹", today());
        assert!(table.contains("Asha Rao"));
        assert!(table.contains("₹15000.00"));
        assert!(table.contains("Approaching"));

        let later = NaiveDate::from_ymd_opt(2025, 6, 19).unwrap();
        assert!(format_entry_table(&[&entry], "₹", later).contains("Past Due"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_entry_table(&[], "₹", today()), "No entries found.\n");
    }

    #[test]
    fn test_page_footer() {
        let entries: Vec<Entry> = (0..3).map(|_| lease()).collect();
        let refs: Vec<&Entry> = entries.iter().collect();
        let page = paginate(&refs, 2, 2).unwrap();
        let text = format_entry_page(&page, "₹", today());
        assert!(text.contains("Page 2 of 2 (3 entries)"));
    }

    #[test]
    fn test_details() {
        let text = format_entry_details(&lease(), "₹", today());
        assert!(text.contains("Fifteen Thousand"));
        assert!(text.contains("Jun-2025"));
        assert!(text.contains("Reminder:    5 days before"));
        assert!(text.contains("Status:      Approaching"));
    }
}
