//! Core data models for propledger
//!
//! Entries, money amounts, calendar months and the shared settings record.

pub mod entry;
pub mod ids;
pub mod money;
pub mod period;
pub mod settings_data;

pub use entry::{
    parse_entry_date, Entry, EntryType, EntryValidationError, ReminderWindow, DATE_FORMAT,
};
pub use ids::EntryId;
pub use money::Money;
pub use period::MonthYear;
pub use settings_data::SettingsData;
