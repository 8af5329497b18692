//! Entry model
//!
//! An entry is one income or expense record tied to a property. Dates are
//! kept in their stored string form: snapshots may carry malformed values,
//! and those must surface as data-quality findings rather than load failures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::EntryId;
use super::money::Money;
use super::period::MonthYear;

/// Storage and display format of entry dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date. A trailing time part (`2025-01-31T10:00:00Z`)
/// is tolerated and ignored.
pub fn parse_entry_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day = s.split_once('T').map(|(d, _)| d).unwrap_or(s);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}

/// Whether an entry records money coming in or going out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    #[serde(alias = "income", alias = "INCOME")]
    Income,
    #[serde(alias = "expense", alias = "EXPENSE")]
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Ok(Self::Income),
            "expense" | "out" => Ok(Self::Expense),
            other => Err(format!("Unknown entry type: {}", other)),
        }
    }
}

/// Days before the renewal date at which a reminder surfaces.
///
/// Only 0 (off), 5, 10 and 15 are meaningful. Anything else found in stored
/// data is normalized to `Off` while deserializing, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawReminder", into = "u8")]
pub enum ReminderWindow {
    #[default]
    Off,
    FiveDays,
    TenDays,
    FifteenDays,
}

impl ReminderWindow {
    /// Map a day count to a window; out-of-domain values become `Off`
    pub fn from_days(days: i64) -> Self {
        match days {
            5 => Self::FiveDays,
            10 => Self::TenDays,
            15 => Self::FifteenDays,
            _ => Self::Off,
        }
    }

    pub fn days(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::FiveDays => 5,
            Self::TenDays => 10,
            Self::FifteenDays => 15,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Off)
    }
}

impl From<ReminderWindow> for u8 {
    fn from(window: ReminderWindow) -> Self {
        window.days()
    }
}

impl fmt::Display for ReminderWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.days())
    }
}

impl FromStr for ReminderWindow {
    type Err = String;

    /// Strict parse for user input: only 0, 5, 10 and 15 are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Self::Off),
            "5" => Ok(Self::FiveDays),
            "10" => Ok(Self::TenDays),
            "15" => Ok(Self::FifteenDays),
            other => Err(format!(
                "Reminder must be one of 0, 5, 10 or 15 days, got '{}'",
                other
            )),
        }
    }
}

/// Whatever shape the stored reminder value has
#[derive(Deserialize)]
#[serde(untagged)]
enum RawReminder {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<RawReminder> for ReminderWindow {
    fn from(raw: RawReminder) -> Self {
        match raw {
            RawReminder::Int(days) => Self::from_days(days),
            RawReminder::Float(days) if days.fract() == 0.0 => Self::from_days(days as i64),
            RawReminder::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(Self::from_days)
                .unwrap_or(Self::Off),
            RawReminder::Float(_) | RawReminder::Other(_) => Self::Off,
        }
    }
}

/// A financial entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique identifier, assigned at creation
    pub id: EntryId,

    /// Counterparty name (tenant, vendor, ...)
    #[serde(default)]
    pub name: String,

    /// Counterparty contact details
    #[serde(default)]
    pub contact: String,

    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Category, expected to be one of the settings' categories for the type
    #[serde(default)]
    pub category: String,

    /// Non-negative amount
    pub amount: Money,

    /// Transaction date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,

    /// Renewal date for recurring obligations, `YYYY-MM-DD` or empty
    #[serde(default)]
    pub renew_date: String,

    #[serde(default)]
    pub renew_date_reminder: ReminderWindow,

    /// Associated property or location
    #[serde(default)]
    pub property: String,
}

impl Entry {
    /// Create a new entry with a fresh id
    pub fn new(
        name: impl Into<String>,
        entry_type: EntryType,
        amount: Money,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: EntryId::new(),
            name: name.into(),
            contact: String::new(),
            entry_type,
            category: String::new(),
            amount,
            date: date.format(DATE_FORMAT).to_string(),
            renew_date: String::new(),
            renew_date_reminder: ReminderWindow::Off,
            property: String::new(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }

    /// The transaction date, if it parses
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_entry_date(&self.date)
    }

    /// The renewal date, if it parses
    pub fn parsed_renew_date(&self) -> Option<NaiveDate> {
        parse_entry_date(&self.renew_date)
    }

    /// Calendar month of the transaction date
    pub fn month_year(&self) -> Option<MonthYear> {
        self.parsed_date().map(MonthYear::from_date)
    }

    /// "MMM-yyyy" of the transaction date, empty when the date is malformed
    pub fn month_year_label(&self) -> String {
        self.month_year().map(|m| m.label()).unwrap_or_default()
    }

    /// The string form of every field, in export column order.
    ///
    /// The amount uses `Money`'s display form ("1500.50"), which is what
    /// free-text search matches against.
    pub fn field_strings(&self) -> [String; 10] {
        [
            self.id.to_string(),
            self.name.clone(),
            self.contact.clone(),
            self.entry_type.to_string(),
            self.category.clone(),
            self.amount.to_string(),
            self.date.clone(),
            self.renew_date.clone(),
            self.renew_date_reminder.to_string(),
            self.property.clone(),
        ]
    }

    /// Validate the entry for the write path
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.name.trim().is_empty() {
            return Err(EntryValidationError::MissingName);
        }

        if self.amount.is_negative() {
            return Err(EntryValidationError::NegativeAmount(self.amount));
        }

        if self.parsed_date().is_none() {
            return Err(EntryValidationError::InvalidDate(self.date.clone()));
        }

        if self.renew_date.trim().is_empty() {
            if self.renew_date_reminder.is_enabled() {
                return Err(EntryValidationError::ReminderWithoutRenewDate);
            }
        } else if self.parsed_renew_date().is_none() {
            return Err(EntryValidationError::InvalidRenewDate(self.renew_date.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date, self.entry_type, self.name, self.amount
        )
    }
}

/// Validation errors for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    MissingName,
    NegativeAmount(Money),
    InvalidDate(String),
    InvalidRenewDate(String),
    ReminderWithoutRenewDate,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingName => write!(f, "Entry name cannot be empty"),
            Self::NegativeAmount(amount) => {
                write!(f, "Amount cannot be negative: {}", amount)
            }
            Self::InvalidDate(date) => {
                write!(f, "Invalid date '{}', expected YYYY-MM-DD", date)
            }
            Self::InvalidRenewDate(date) => {
                write!(f, "Invalid renew date '{}', expected YYYY-MM-DD", date)
            }
            Self::ReminderWithoutRenewDate => {
                write!(f, "A reminder needs a renew date")
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_entry() {
        let entry = Entry::new("Asha", EntryType::Income, Money::from_units(15000), date(2025, 3, 1));
        assert_eq!(entry.date, "2025-03-01");
        assert!(entry.is_income());
        assert_eq!(entry.renew_date_reminder, ReminderWindow::Off);
        assert_eq!(entry.month_year_label(), "Mar-2025");
    }

    #[test]
    fn test_deserialize_snapshot_record() {
        let json = r#"{
            "id": "k3J9x",
            "name": "Asha",
            "contact": "98450 00000",
            "type": "Income",
            "category": "Rent",
            "amount": 15000,
            "date": "2025-03-01",
            "renewDate": "2026-02-28",
            "renewDateReminder": 15,
            "property": "Flat 2B"
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id.as_str(), "k3J9x");
        assert_eq!(entry.entry_type, EntryType::Income);
        assert_eq!(entry.amount, Money::from_units(15000));
        assert_eq!(entry.renew_date_reminder, ReminderWindow::FifteenDays);
        assert_eq!(entry.parsed_renew_date(), Some(date(2026, 2, 28)));
    }

    #[test]
    fn test_reminder_normalized_on_read() {
        let cases = [
            ("7", ReminderWindow::Off),
            ("\"10\"", ReminderWindow::TenDays),
            ("5.0", ReminderWindow::FiveDays),
            ("5.5", ReminderWindow::Off),
            ("-5", ReminderWindow::Off),
            ("null", ReminderWindow::Off),
            ("\"soon\"", ReminderWindow::Off),
            ("[15]", ReminderWindow::Off),
        ];
        for (raw, expected) in cases {
            let json = format!(
                r#"{{"id":"a","type":"Expense","amount":0,"renewDateReminder":{}}}"#,
                raw
            );
            let entry: Entry = serde_json::from_str(&json).unwrap();
            assert_eq!(entry.renew_date_reminder, expected, "raw value {}", raw);
        }
    }

    #[test]
    fn test_reminder_serializes_as_number() {
        let mut entry = Entry::new("x", EntryType::Expense, Money::zero(), date(2025, 1, 1));
        entry.renew_date_reminder = ReminderWindow::TenDays;
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["renewDateReminder"], 10);
        assert_eq!(json["type"], "Expense");
    }

    #[test]
    fn test_parse_entry_date() {
        assert_eq!(parse_entry_date("2025-01-31"), Some(date(2025, 1, 31)));
        assert_eq!(parse_entry_date("2025-01-31T10:00:00Z"), Some(date(2025, 1, 31)));
        assert_eq!(parse_entry_date("31/01/2025"), None);
        assert_eq!(parse_entry_date(""), None);
    }

    #[test]
    fn test_validate() {
        let mut entry = Entry::new("Asha", EntryType::Income, Money::from_units(10), date(2025, 1, 1));
        assert!(entry.validate().is_ok());

        entry.renew_date_reminder = ReminderWindow::FiveDays;
        assert_eq!(
            entry.validate(),
            Err(EntryValidationError::ReminderWithoutRenewDate)
        );

        entry.renew_date = "next year".into();
        assert!(matches!(
            entry.validate(),
            Err(EntryValidationError::InvalidRenewDate(_))
        ));

        entry.renew_date = "2026-01-01".into();
        entry.amount = Money::from_cents(-1);
        assert!(matches!(
            entry.validate(),
            Err(EntryValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_entry_type_from_str() {
        assert_eq!("INCOME".parse::<EntryType>().unwrap(), EntryType::Income);
        assert_eq!("expense".parse::<EntryType>().unwrap(), EntryType::Expense);
        assert!("transfer".parse::<EntryType>().is_err());
    }
}
