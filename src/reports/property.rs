//! Per-property totals
//!
//! Dashboard breakdown of income or expense by property.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Entry, EntryType, Money};

/// Total of one entry type for one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyTotal {
    /// Property name as stored; may be empty
    pub property: String,
    pub total: Money,
    /// Number of entries of the requested type
    pub count: usize,
}

/// Group `entries` by property and total the amounts of `entry_type`.
///
/// Every distinct property present in the input gets a row, in order of first
/// appearance. A property that only occurs on entries of the other type shows
/// a zero total.
pub fn group_by_property<'a, I>(entries: I, entry_type: EntryType) -> Vec<PropertyTotal>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut rows: Vec<PropertyTotal> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for entry in entries {
        let slot = *index.entry(entry.property.as_str()).or_insert_with(|| {
            rows.push(PropertyTotal {
                property: entry.property.clone(),
                total: Money::zero(),
                count: 0,
            });
            rows.len() - 1
        });

        if entry.entry_type == entry_type {
            rows[slot].total += entry.amount;
            rows[slot].count += 1;
        }
    }

    rows
}

/// Format both breakdowns side by side for terminal display
pub fn format_terminal(income: &[PropertyTotal], expense: &[PropertyTotal], currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<30} {:>16} {:>16}\n",
        "Property", "Income", "Expense"
    ));
    output.push_str(&"-".repeat(64));
    output.push('\n');

    for row in income {
        let expense_total = expense
            .iter()
            .find(|e| e.property == row.property)
            .map(|e| e.total)
            .unwrap_or_default();
        let name = if row.property.trim().is_empty() {
            "(none)"
        } else {
            row.property.as_str()
        };
        output.push_str(&format!(
            "{:<30} {:>16} {:>16}\n",
            name,
            row.total.format_with_symbol(currency),
            expense_total.format_with_symbol(currency)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(entry_type: EntryType, units: i64, property: &str) -> Entry {
        let mut e = Entry::new(
            "x",
            entry_type,
            Money::from_units(units),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        e.property = property.to_string();
        e
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry(EntryType::Income, 15000, "Flat 2B"),
            entry(EntryType::Expense, 1200, "Villa"),
            entry(EntryType::Income, 5000, "Flat 2B"),
            entry(EntryType::Expense, 300, "Flat 2B"),
        ]
    }

    #[test]
    fn test_income_by_property() {
        let entries = sample();
        let rows = group_by_property(&entries, EntryType::Income);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].property, "Flat 2B");
        assert_eq!(rows[0].total, Money::from_units(20000));
        assert_eq!(rows[0].count, 2);
        // Villa only has expenses
        assert_eq!(rows[1].property, "Villa");
        assert_eq!(rows[1].total, Money::zero());
        assert_eq!(rows[1].count, 0);
    }

    #[test]
    fn test_expense_by_property() {
        let entries = sample();
        let rows = group_by_property(&entries, EntryType::Expense);
        assert_eq!(rows[0].total, Money::from_units(300));
        assert_eq!(rows[1].total, Money::from_units(1200));
    }

    #[test]
    fn test_absent_properties_are_omitted() {
        let entries = vec![entry(EntryType::Income, 10, "Villa")];
        let rows = group_by_property(&entries, EntryType::Expense);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].property, "Villa");

        let none: Vec<Entry> = Vec::new();
        assert!(group_by_property(&none, EntryType::Income).is_empty());
    }

    #[test]
    fn test_format_terminal() {
        let entries = vec![entry(EntryType::Income, 10, ""), entry(EntryType::Expense, 4, "")];
        let text = format_terminal(
            &group_by_property(&entries, EntryType::Income),
            &group_by_property(&entries, EntryType::Expense),
            "₹",
        );
        assert!(text.contains("(none)"));
        assert!(text.contains("₹10.00"));
        assert!(text.contains("₹4.00"));
    }
}
