//! Totals and summary metrics
//!
//! Dashboard figures: income and expense partitions, net balance and
//! per-type averages.

use serde::Serialize;

use crate::models::{Entry, EntryType, Money};

/// Sum and count of one entry type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TypeTotal {
    pub sum: Money,
    pub count: usize,
}

impl TypeTotal {
    fn add(&mut self, amount: Money) {
        self.sum += amount;
        self.count += 1;
    }

    /// Average amount, zero for an empty partition
    pub fn average(&self) -> Money {
        self.sum.average_over(self.count)
    }
}

/// Income/expense partition of an entry set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: TypeTotal,
    pub expense: TypeTotal,
}

impl Totals {
    pub fn for_type(&self, entry_type: EntryType) -> &TypeTotal {
        match entry_type {
            EntryType::Income => &self.income,
            EntryType::Expense => &self.expense,
        }
    }
}

/// Partition entries by type and total each partition
pub fn aggregate<'a, I>(entries: I) -> Totals
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut totals = Totals::default();
    for entry in entries {
        match entry.entry_type {
            EntryType::Income => totals.income.add(entry.amount),
            EntryType::Expense => totals.expense.add(entry.amount),
        }
    }
    totals
}

/// Headline dashboard figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryMetrics {
    /// Income minus expense; may be negative
    pub net_balance: Money,
    pub avg_income: Money,
    pub avg_expense: Money,
    pub total_transactions: usize,
}

impl SummaryMetrics {
    pub fn from_totals(totals: &Totals) -> Self {
        Self {
            net_balance: totals.income.sum - totals.expense.sum,
            avg_income: totals.income.average(),
            avg_expense: totals.expense.average(),
            total_transactions: totals.income.count + totals.expense.count,
        }
    }

    /// Format for terminal display
    pub fn format_terminal(&self, totals: &Totals, currency: &str) -> String {
        let mut output = String::new();

        output.push_str("Summary\n");
        output.push_str(&"=".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>20}\n",
            format!("Income ({})", totals.income.count),
            totals.income.sum.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<22} {:>20}\n",
            format!("Expense ({})", totals.expense.count),
            totals.expense.sum.format_with_symbol(currency)
        ));
        output.push_str(&"-".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>20}\n",
            "Net Balance",
            self.net_balance.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<22} {:>20}\n",
            "Average Income",
            self.avg_income.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<22} {:>20}\n",
            "Average Expense",
            self.avg_expense.format_with_symbol(currency)
        ));
        output.push_str(&format!(
            "{:<22} {:>20}\n",
            "Transactions", self.total_transactions
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(entry_type: EntryType, units: i64) -> Entry {
        Entry::new(
            "x",
            entry_type,
            Money::from_units(units),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_aggregate_partitions() {
        let entries = vec![
            entry(EntryType::Income, 15000),
            entry(EntryType::Expense, 1200),
            entry(EntryType::Income, 5000),
            entry(EntryType::Expense, 800),
            entry(EntryType::Expense, 0),
        ];

        let totals = aggregate(&entries);
        assert_eq!(totals.income.sum, Money::from_units(20000));
        assert_eq!(totals.income.count, 2);
        assert_eq!(totals.expense.sum, Money::from_units(2000));
        assert_eq!(totals.expense.count, 3);
        assert_eq!(totals.income.count + totals.expense.count, entries.len());
    }

    #[test]
    fn test_summary_metrics() {
        let entries = vec![
            entry(EntryType::Income, 15000),
            entry(EntryType::Income, 5000),
            entry(EntryType::Expense, 30000),
        ];
        let totals = aggregate(&entries);
        let summary = SummaryMetrics::from_totals(&totals);

        assert_eq!(summary.net_balance, Money::from_units(-10000));
        assert_eq!(summary.avg_income, Money::from_units(10000));
        assert_eq!(summary.avg_expense, Money::from_units(30000));
        assert_eq!(summary.total_transactions, 3);
    }

    #[test]
    fn test_empty_set_has_zero_metrics() {
        let entries: Vec<Entry> = Vec::new();
        let totals = aggregate(&entries);
        assert_eq!(totals, Totals::default());

        let summary = SummaryMetrics::from_totals(&totals);
        assert_eq!(summary.avg_income, Money::zero());
        assert_eq!(summary.avg_expense, Money::zero());
        assert_eq!(summary.net_balance, Money::zero());
        assert_eq!(summary.total_transactions, 0);
    }

    #[test]
    fn test_only_one_type_present() {
        let entries = vec![entry(EntryType::Expense, 500)];
        let summary = SummaryMetrics::from_totals(&aggregate(&entries));
        assert_eq!(summary.avg_income, Money::zero());
        assert_eq!(summary.avg_expense, Money::from_units(500));
    }

    #[test]
    fn test_format_terminal() {
        let entries = vec![entry(EntryType::Income, 100)];
        let totals = aggregate(&entries);
        let text = SummaryMetrics::from_totals(&totals).format_terminal(&totals, "₹");
        assert!(text.contains("Net Balance"));
        assert!(text.contains("₹100.00"));
    }
}
