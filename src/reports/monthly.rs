//! Month-by-month totals

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Entry, EntryType, Money, MonthYear};

/// Income and expense of one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTotals {
    pub month: MonthYear,
    pub income: Money,
    pub expense: Money,
    pub count: usize,
}

impl MonthlyTotals {
    fn new(month: MonthYear) -> Self {
        Self {
            month,
            income: Money::zero(),
            expense: Money::zero(),
            count: 0,
        }
    }

    pub fn net(&self) -> Money {
        self.income - self.expense
    }
}

/// Group entries by the month of their date, oldest month first.
/// Entries with an unparsable date are skipped.
pub fn group_by_month<'a, I>(entries: I) -> Vec<MonthlyTotals>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut months: BTreeMap<MonthYear, MonthlyTotals> = BTreeMap::new();

    for entry in entries {
        let Some(month) = entry.month_year() else {
            log::debug!("Skipping entry {} with unparsable date in monthly totals", entry.id);
            continue;
        };

        let totals = months
            .entry(month)
            .or_insert_with(|| MonthlyTotals::new(month));
        match entry.entry_type {
            EntryType::Income => totals.income += entry.amount,
            EntryType::Expense => totals.expense += entry.amount,
        }
        totals.count += 1;
    }

    months.into_values().collect()
}

/// Format for terminal display
pub fn format_terminal(rows: &[MonthlyTotals], currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:>16} {:>16} {:>16} {:>6}\n",
        "Month", "Income", "Expense", "Net", "Count"
    ));
    output.push_str(&"-".repeat(68));
    output.push('\n');

    for row in rows {
        output.push_str(&format!(
            "{:<10} {:>16} {:>16} {:>16} {:>6}\n",
            row.month.label(),
            row.income.format_with_symbol(currency),
            row.expense.format_with_symbol(currency),
            row.net().format_with_symbol(currency),
            row.count
        ));
    }

    output
}
