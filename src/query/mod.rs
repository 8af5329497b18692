//! Entry query engine
//!
//! Pure, synchronous operations over an entry snapshot: filter, sort, page,
//! plus the derived dashboard views. Nothing here holds state between calls;
//! a new snapshot is simply queried again.
//!
//! Time-relative results (windows, reminders) take `today` from the caller.

pub mod filter;
pub mod page;
pub mod sort;
pub mod window;

pub use filter::{filter_entries, EntryFilter};
pub use page::{clamp_page, paginate, Page};
pub use sort::{sort_entries, EntrySort, SortDirection, SortKey};
pub use window::{DateRange, TimeWindow};

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::LedgerResult;
use crate::models::{Entry, EntryId, EntryType};
use crate::reports::{
    aggregate, group_by_property, reminders, PropertyTotal, Reminder, SummaryMetrics, Totals,
};

/// Entries whose stored dates do not parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataQuality {
    pub invalid_dates: Vec<EntryId>,
    /// Non-empty renew dates that do not parse
    pub invalid_renew_dates: Vec<EntryId>,
}

impl DataQuality {
    pub fn scan<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut quality = Self::default();
        for entry in entries {
            if entry.parsed_date().is_none() {
                quality.invalid_dates.push(entry.id.clone());
            }
            let renew_set = !entry.renew_date.trim().is_empty();
            if renew_set && entry.parsed_renew_date().is_none() {
                quality.invalid_renew_dates.push(entry.id.clone());
            }
        }
        quality
    }

    pub fn is_clean(&self) -> bool {
        self.invalid_dates.is_empty() && self.invalid_renew_dates.is_empty()
    }

    /// Report findings through the log
    pub fn log(&self) {
        if !self.invalid_dates.is_empty() {
            log::warn!(
                "{} entries have an unparsable date: {}",
                self.invalid_dates.len(),
                join_ids(&self.invalid_dates)
            );
        }
        if !self.invalid_renew_dates.is_empty() {
            log::warn!(
                "{} entries have an unparsable renew date: {}",
                self.invalid_renew_dates.len(),
                join_ids(&self.invalid_renew_dates)
            );
        }
    }
}

fn join_ids(ids: &[EntryId]) -> String {
    ids.iter()
        .map(|id| id.short().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A full query: filter, order and the page to show
#[derive(Debug, Clone)]
pub struct EntryQuery {
    pub filter: EntryFilter,
    pub sort: EntrySort,
    pub page: usize,
    pub page_size: usize,
}

impl Default for EntryQuery {
    fn default() -> Self {
        Self {
            filter: EntryFilter::default(),
            sort: EntrySort::default(),
            page: 1,
            page_size: 10,
        }
    }
}

/// Everything a dashboard shows for one snapshot
#[derive(Debug, Clone, Serialize)]
pub struct QueryView<'a> {
    pub page: Page<&'a Entry>,
    pub totals: Totals,
    pub summary: SummaryMetrics,
    pub income_by_property: Vec<PropertyTotal>,
    pub expense_by_property: Vec<PropertyTotal>,
    pub reminders: Vec<Reminder<'a>>,
    pub quality: DataQuality,
}

impl EntryQuery {
    pub fn new(filter: EntryFilter, sort: EntrySort) -> Self {
        Self {
            filter,
            sort,
            ..Self::default()
        }
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// The filtered entries in display order
    pub fn select<'a>(&self, entries: &'a [Entry], today: NaiveDate) -> Vec<&'a Entry> {
        let mut selected = filter_entries(entries, &self.filter, today);
        sort_entries(&mut selected, &self.sort);
        if self.sort.key.is_date_key() {
            log::debug!("Sorted {} entries by {:?}", selected.len(), self.sort.key);
        }
        selected
    }

    /// Run the whole pipeline against one snapshot.
    ///
    /// Totals, property breakdowns and reminders cover every filtered entry,
    /// not only the current page.
    pub fn run<'a>(&self, entries: &'a [Entry], today: NaiveDate) -> LedgerResult<QueryView<'a>> {
        let quality = DataQuality::scan(entries);
        quality.log();

        let selected = self.select(entries, today);
        let page = paginate(&selected, self.page, self.page_size)?;

        let totals = aggregate(selected.iter().copied());
        let summary = SummaryMetrics::from_totals(&totals);

        Ok(QueryView {
            page,
            totals,
            summary,
            income_by_property: group_by_property(selected.iter().copied(), EntryType::Income),
            expense_by_property: group_by_property(selected.iter().copied(), EntryType::Expense),
            reminders: reminders(selected.iter().copied(), today),
            quality,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, ReminderWindow};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entries(count: usize) -> Vec<Entry> {
        (0..count)
            .map(|i| {
                let entry_type = if i % 2 == 0 {
                    EntryType::Income
                } else {
                    EntryType::Expense
                };
                let mut e = Entry::new(
                    format!("Entry {}", i),
                    entry_type,
                    Money::from_units(100 * (i as i64 + 1)),
                    date(2025, 1, 1 + (i as u32 % 28)),
                );
                e.id = EntryId::from(format!("e{:02}", i));
                e.property = if i % 3 == 0 { "Villa".into() } else { "Flat 2B".into() };
                e
            })
            .collect()
    }

    #[test]
    fn test_pipeline_pages_and_totals() {
        let entries = entries(23);
        let query = EntryQuery::new(EntryFilter::new(), EntrySort::ascending(SortKey::Amount))
            .with_page(3, 10);

        let view = query.run(&entries, date(2025, 2, 1)).unwrap();
        assert_eq!(view.page.total_pages, 3);
        assert_eq!(view.page.items.len(), 3);
        assert_eq!(view.page.items[0].id.as_str(), "e20");

        // Aggregates cover the whole filtered set
        assert_eq!(view.summary.total_transactions, 23);
        assert_eq!(view.totals.income.count, 12);
        assert_eq!(view.income_by_property.len(), 2);
        assert!(view.quality.is_clean());
    }

    #[test]
    fn test_pipeline_respects_filter() {
        let entries = entries(10);
        let query = EntryQuery::new(
            EntryFilter::new().entry_type(EntryType::Expense),
            EntrySort::default(),
        );
        let view = query.run(&entries, date(2025, 2, 1)).unwrap();
        assert_eq!(view.page.total_items, 5);
        assert_eq!(view.totals.income.count, 0);
        assert!(view.page.items.iter().all(|e| e.is_expense()));
    }

    #[test]
    fn test_pipeline_reminders_and_quality() {
        let mut entries = entries(3);
        entries[0].renew_date = "2025-02-03".into();
        entries[0].renew_date_reminder = ReminderWindow::FiveDays;
        entries[1].date = "01/02/2025".into();
        entries[2].renew_date = "soon".into();

        let view = EntryQuery::default().run(&entries, date(2025, 2, 1)).unwrap();
        assert_eq!(view.reminders.len(), 1);
        assert_eq!(view.quality.invalid_dates, vec![EntryId::from("e01")]);
        assert_eq!(view.quality.invalid_renew_dates, vec![EntryId::from("e02")]);
        // Malformed dates still list when no date predicate is active, after dated entries
        assert_eq!(view.page.items.last().map(|e| e.id.as_str()), Some("e01"));
    }

    #[test]
    fn test_pipeline_rejects_zero_page_size() {
        let entries = entries(2);
        let query = EntryQuery::default().with_page(1, 0);
        assert!(query.run(&entries, date(2025, 2, 1)).is_err());
    }
}
