//! Entry filtering
//!
//! Every set predicate must hold (logical AND); unset predicates always pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::window::{DateRange, TimeWindow};
use crate::models::{Entry, EntryType, Money};

/// Declarative entry filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the contact
    pub contact: Option<String>,
    pub entry_type: Option<EntryType>,
    /// Case-insensitive category equality
    pub category: Option<String>,
    /// Inclusive lower amount bound
    pub min_amount: Option<Money>,
    /// Inclusive upper amount bound
    pub max_amount: Option<Money>,
    /// Inclusive date bounds
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Shortcut window, combined with the explicit bounds
    #[serde(default)]
    pub window: TimeWindow,
    /// Case-insensitive property equality
    pub property: Option<String>,
    /// Case-insensitive substring of any field, as rendered by
    /// [`Entry::field_strings`]. Amounts match in their two-decimal form with
    /// no symbol or grouping: 1500.5 is searchable as "1500.50" (and so "1500.5"),
    /// never as "1,500.50".
    pub search: Option<String>,
}

impl EntryFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by amount range; either bound may be open
    pub fn amount_range(mut self, min: Option<Money>, max: Option<Money>) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Filter by date range; either bound may be open
    pub fn date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    pub fn property(mut self, property: impl Into<String>) -> Self {
        self.property = Some(property.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// The effective date range: explicit bounds intersected with the window
    pub fn date_bounds(&self, today: NaiveDate) -> DateRange {
        DateRange::new(self.start_date, self.end_date).intersect(&self.window.resolve(today))
    }

    /// Whether any date predicate is active
    pub fn restricts_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some() || self.window != TimeWindow::All
    }

    /// Evaluate all predicates against one entry, with the date range already resolved
    pub fn matches(&self, entry: &Entry, dates: &DateRange) -> bool {
        if let Some(name) = non_blank(&self.name) {
            if !contains_ignore_case(&entry.name, name) {
                return false;
            }
        }

        if let Some(contact) = non_blank(&self.contact) {
            if !contains_ignore_case(&entry.contact, contact) {
                return false;
            }
        }

        if let Some(entry_type) = self.entry_type {
            if entry.entry_type != entry_type {
                return false;
            }
        }

        if let Some(category) = non_blank(&self.category) {
            if !entry.category.trim().eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }

        if let Some(min) = self.min_amount {
            if entry.amount < min {
                return false;
            }
        }

        if let Some(max) = self.max_amount {
            if entry.amount > max {
                return false;
            }
        }

        if !dates.is_unbounded() {
            match entry.parsed_date() {
                Some(date) if dates.contains(date) => {}
                _ => return false,
            }
        }

        if let Some(property) = non_blank(&self.property) {
            if !entry.property.trim().eq_ignore_ascii_case(property.trim()) {
                return false;
            }
        }

        if let Some(term) = non_blank(&self.search) {
            if !entry
                .field_strings()
                .iter()
                .any(|field| contains_ignore_case(field, term))
            {
                return false;
            }
        }

        true
    }
}

/// Keep the entries that satisfy every predicate of `filter`, in input order.
///
/// Entries with a malformed date are dropped whenever a date predicate is
/// active; they are logged here and listed by [`super::DataQuality`].
pub fn filter_entries<'a, I>(entries: I, filter: &EntryFilter, today: NaiveDate) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let dates = filter.date_bounds(today);

    entries
        .into_iter()
        .filter(|entry| {
            if !dates.is_unbounded() && entry.parsed_date().is_none() {
                log::warn!(
                    "Entry {} has an unparsable date '{}'; excluded from date filter",
                    entry.id,
                    entry.date
                );
                return false;
            }
            filter.matches(entry, &dates)
        })
        .collect()
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}
