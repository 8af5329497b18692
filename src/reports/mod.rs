//! Reports over entry sets
//!
//! Dashboard totals, per-property and per-month breakdowns, and the renewal
//! reminder worklist. Everything here is a pure function of its inputs.

pub mod monthly;
pub mod property;
pub mod reminders;
pub mod summary;

pub use monthly::{group_by_month, MonthlyTotals};
pub use property::{group_by_property, PropertyTotal};
pub use reminders::{reminder_status, reminders, Reminder, ReminderStatus};
pub use summary::{aggregate, SummaryMetrics, Totals, TypeTotal};
