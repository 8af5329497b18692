//! Stable entry sorting
//!
//! Date keys compare by calendar date, the amount compares numerically and
//! every other key compares the field's string form byte-wise (case-sensitive).
//! Entries whose date key does not parse sort after all dated entries, in
//! input order, whatever the direction.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Entry;

/// Sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Id,
    Name,
    Contact,
    Type,
    Category,
    Amount,
    Date,
    MonthYear,
    RenewDate,
    RenewDateReminder,
    Property,
}

impl SortKey {
    pub fn is_date_key(&self) -> bool {
        matches!(self, Self::Date | Self::MonthYear | Self::RenewDate)
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "contact" => Ok(Self::Contact),
            "type" => Ok(Self::Type),
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            "date" => Ok(Self::Date),
            "monthyear" | "month" => Ok(Self::MonthYear),
            "renewdate" => Ok(Self::RenewDate),
            "renewdatereminder" | "reminder" => Ok(Self::RenewDateReminder),
            "property" => Ok(Self::Property),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    /// The opposite direction, for column-header style toggling
    pub fn toggled(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// Sort order; defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for EntrySort {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Descending,
        }
    }
}

impl EntrySort {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn ascending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn descending(key: SortKey) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Selecting the current key flips the direction; a new key starts ascending
    pub fn select(&self, key: SortKey) -> Self {
        if key == self.key {
            Self::new(key, self.direction.toggled())
        } else {
            Self::ascending(key)
        }
    }

    /// Compare two entries under this order
    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let directed = |ord: Ordering| match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };

        match self.key {
            SortKey::Amount => directed(a.amount.cmp(&b.amount)),
            SortKey::Date => compare_dated(a.parsed_date(), b.parsed_date(), directed),
            SortKey::MonthYear => compare_dated(a.month_year(), b.month_year(), directed),
            SortKey::RenewDate => {
                compare_dated(a.parsed_renew_date(), b.parsed_renew_date(), directed)
            }
            key => directed(string_key(a, key).cmp(&string_key(b, key))),
        }
    }
}

/// Missing keys go last in either direction
fn compare_dated<T: Ord>(
    a: Option<T>,
    b: Option<T>,
    directed: impl Fn(Ordering) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn string_key(entry: &Entry, key: SortKey) -> String {
    match key {
        SortKey::Id => entry.id.to_string(),
        SortKey::Name => entry.name.clone(),
        SortKey::Contact => entry.contact.clone(),
        SortKey::Type => entry.entry_type.to_string(),
        SortKey::Category => entry.category.clone(),
        SortKey::RenewDateReminder => entry.renew_date_reminder.to_string(),
        SortKey::Property => entry.property.clone(),
        SortKey::Amount => entry.amount.to_string(),
        SortKey::Date => entry.date.clone(),
        SortKey::MonthYear => entry.month_year_label(),
        SortKey::RenewDate => entry.renew_date.clone(),
    }
}

/// Sort in place. The sort is stable: equal keys keep their input order.
pub fn sort_entries(entries: &mut [&Entry], sort: &EntrySort) {
    entries.sort_by(|a, b| sort.compare(a, b));
}
