//! Time windows for date filtering
//!
//! Shortcut windows ("Last 7 Days", "Current Month", ...) resolve to an
//! inclusive date range relative to a caller-supplied `today`, so the same
//! query always gives the same answer for the same reference date.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::MonthYear;

/// Inclusive date range; a missing bound is unbounded on that side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// The unbounded range
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check if a date falls within the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (None, None) => true,
            (Some(s), None) => date >= s,
            (None, Some(e)) => date <= e,
            (Some(s), Some(e)) => date >= s && date <= e,
        }
    }

    /// Range satisfying both constraints
    pub fn intersect(&self, other: &DateRange) -> DateRange {
        let start = match (self.start, other.start) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let end = match (self.end, other.end) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        DateRange { start, end }
    }
}

/// Date window shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeWindow {
    /// No date restriction
    #[default]
    All,
    /// `[today - 7 days, today]`
    Last7Days,
    /// `[today - 30 days, today]`
    Last30Days,
    /// The calendar month containing `today`
    CurrentMonth,
    /// The calendar year containing `today`
    CurrentYear,
    /// Explicit bounds, either optional
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    /// A specific calendar month
    MonthYear { month: MonthYear },
}

impl TimeWindow {
    /// Resolve to a concrete range relative to `today`
    pub fn resolve(&self, today: NaiveDate) -> DateRange {
        match self {
            Self::All => DateRange::all(),
            Self::Last7Days => DateRange::new(Some(today - Duration::days(7)), Some(today)),
            Self::Last30Days => DateRange::new(Some(today - Duration::days(30)), Some(today)),
            Self::CurrentMonth => {
                let month = MonthYear::from_date(today);
                DateRange::new(Some(month.start_date()), Some(month.end_date()))
            }
            Self::CurrentYear => DateRange::new(
                NaiveDate::from_ymd_opt(today.year(), 1, 1),
                NaiveDate::from_ymd_opt(today.year(), 12, 31),
            ),
            Self::Custom { start, end } => DateRange::new(*start, *end),
            Self::MonthYear { month } => {
                DateRange::new(Some(month.start_date()), Some(month.end_date()))
            }
        }
    }

    /// Human-readable label
    pub fn description(&self) -> String {
        match self {
            Self::All => "All Time".to_string(),
            Self::Last7Days => "Last 7 Days".to_string(),
            Self::Last30Days => "Last 30 Days".to_string(),
            Self::CurrentMonth => "Current Month".to_string(),
            Self::CurrentYear => "Current Year".to_string(),
            Self::Custom { start, end } => match (start, end) {
                (Some(s), Some(e)) => format!("{} to {}", s, e),
                (Some(s), None) => format!("From {}", s),
                (None, Some(e)) => format!("Until {}", e),
                (None, None) => "Custom Range".to_string(),
            },
            Self::MonthYear { month } => month.label(),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description())
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    /// Accepts `all`, `7d`, `30d`, `month`, `year`, `<from>..<to>` with either
    /// side optional, or a month such as `Mar-2025` / `2025-03`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "all" | "" => return Ok(Self::All),
            "7d" | "last-7-days" | "week" => return Ok(Self::Last7Days),
            "30d" | "last-30-days" => return Ok(Self::Last30Days),
            "month" | "current-month" => return Ok(Self::CurrentMonth),
            "year" | "current-year" => return Ok(Self::CurrentYear),
            _ => {}
        }

        if let Some((from, to)) = s.split_once("..") {
            let parse = |part: &str| -> Result<Option<NaiveDate>, String> {
                if part.trim().is_empty() {
                    Ok(None)
                } else {
                    crate::models::parse_entry_date(part)
                        .map(Some)
                        .ok_or_else(|| format!("Invalid date in range: {}", part))
                }
            };
            return Ok(Self::Custom {
                start: parse(from)?,
                end: parse(to)?,
            });
        }

        s.parse::<MonthYear>()
            .map(|month| Self::MonthYear { month })
            .map_err(|e| format!("Unknown time window '{}': {}", s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_relative_windows() {
        let today = date(2025, 3, 10);

        let week = TimeWindow::Last7Days.resolve(today);
        assert_eq!(week.start, Some(date(2025, 3, 3)));
        assert_eq!(week.end, Some(today));
        assert!(!week.contains(date(2025, 3, 11)));

        let month = TimeWindow::Last30Days.resolve(today);
        assert_eq!(month.start, Some(date(2025, 2, 8)));
    }

    #[test]
    fn test_calendar_windows() {
        let today = date(2024, 2, 14);

        let month = TimeWindow::CurrentMonth.resolve(today);
        assert_eq!(month, DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 2, 29))));

        let year = TimeWindow::CurrentYear.resolve(today);
        assert!(year.contains(date(2024, 12, 31)));
        assert!(!year.contains(date(2025, 1, 1)));

        let march = TimeWindow::MonthYear {
            month: MonthYear::new(2023, 3).unwrap(),
        }
        .resolve(today);
        assert_eq!(march.start, Some(date(2023, 3, 1)));
        assert_eq!(march.end, Some(date(2023, 3, 31)));
    }

    #[test]
    fn test_open_ended_range() {
        let range = DateRange::new(None, Some(date(2025, 1, 1)));
        assert!(range.contains(date(1900, 1, 1)));
        assert!(!range.contains(date(2025, 1, 2)));
        assert!(DateRange::all().contains(NaiveDate::MAX));
    }

    #[test]
    fn test_intersect() {
        let a = DateRange::new(Some(date(2025, 1, 1)), None);
        let b = DateRange::new(Some(date(2024, 6, 1)), Some(date(2025, 6, 30)));
        assert_eq!(
            a.intersect(&b),
            DateRange::new(Some(date(2025, 1, 1)), Some(date(2025, 6, 30)))
        );
        assert_eq!(DateRange::all().intersect(&DateRange::all()), DateRange::all());
    }

    #[test]
    fn test_parse() {
        assert_eq!("7d".parse::<TimeWindow>().unwrap(), TimeWindow::Last7Days);
        assert_eq!("YEAR".parse::<TimeWindow>().unwrap(), TimeWindow::CurrentYear);
        assert_eq!(
            "2025-01-01..".parse::<TimeWindow>().unwrap(),
            TimeWindow::Custom {
                start: Some(date(2025, 1, 1)),
                end: None
            }
        );
        assert_eq!(
            "Mar-2025".parse::<TimeWindow>().unwrap().description(),
            "Mar-2025"
        );
        assert!("fortnight".parse::<TimeWindow>().is_err());
    }
}
