//! Calendar month representation
//!
//! `MonthYear` backs the "MMM-yyyy" column of exports, the `{{monthyear}}`
//! template token, the month-year time window and the monthly dashboard.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    year: i32,
    month: u32,
}

impl MonthYear {
    /// Create a month, validating that it maps to a real calendar date
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PeriodParseError::InvalidFormat(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        let next_month = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next_month
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The "MMM-yyyy" label, e.g. `Mar-2025`
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abbr = MONTH_ABBREVIATIONS[(self.month as usize).saturating_sub(1) % 12];
        write!(f, "{}-{:04}", abbr, self.year)
    }
}

impl FromStr for MonthYear {
    type Err = PeriodParseError;

    /// Accepts "Mar-2025" (case-insensitive) or "2025-03"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(PeriodParseError::InvalidFormat(s.to_string()));
        }

        if let Some(idx) = MONTH_ABBREVIATIONS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(parts[0]))
        {
            let year: i32 = parts[1]
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Self::new(year, idx as u32 + 1);
        }

        let year: i32 = parts[0]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_label() {
        let month = MonthYear::from_date(date(2025, 3, 14));
        assert_eq!(month.label(), "Mar-2025");
        assert_eq!(MonthYear::new(2024, 12).unwrap().to_string(), "Dec-2024");
    }

    #[test]
    fn test_bounds() {
        let feb = MonthYear::new(2024, 2).unwrap();
        assert_eq!(feb.start_date(), date(2024, 2, 1));
        assert_eq!(feb.end_date(), date(2024, 2, 29));

        let dec = MonthYear::new(2025, 12).unwrap();
        assert_eq!(dec.end_date(), date(2025, 12, 31));
        assert!(dec.contains(date(2025, 12, 31)));
        assert!(!dec.contains(date(2026, 1, 1)));
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "mar-2025".parse::<MonthYear>().unwrap(),
            MonthYear::new(2025, 3).unwrap()
        );
        assert_eq!(
            "2025-11".parse::<MonthYear>().unwrap(),
            MonthYear::new(2025, 11).unwrap()
        );
        assert_eq!(
            "2025-13".parse::<MonthYear>(),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!("March 2025".parse::<MonthYear>().is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = MonthYear::new(2024, 12).unwrap();
        let b = MonthYear::new(2025, 1).unwrap();
        assert!(a < b);
    }
}
