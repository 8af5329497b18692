//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths (i64) to avoid floating-point
//! precision issues. Entry amounts are non-negative; signed values only
//! appear in derived figures such as the net balance.
//!
//! On disk an amount is a plain decimal number of currency units (`15000`,
//! `1500.5`), which is what ledger snapshots carry.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

use crate::format::words::amount_in_words;

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use propledger::models::Money;
    /// let amount = Money::from_cents(150050); // 1500.50
    /// assert_eq!(amount.whole_units(), 1500);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units (no fractional part).
    ///
    /// Saturates at the representable range; use [`Money::checked_from_units`]
    /// for untrusted input.
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Whole units to Money, or `None` when the amount does not fit
    pub const fn checked_from_units(units: i64) -> Option<Self> {
        match units.checked_mul(100) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn whole_units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the fractional portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Divide by a count, rounding half away from zero. A zero count yields zero.
    pub fn average_over(&self, count: usize) -> Self {
        if count == 0 {
            return Self::zero();
        }
        let count = count as i128;
        let half = count / 2;
        let value = self.0 as i128;
        let rounded = if value >= 0 {
            (value + half) / count
        } else {
            (value - half) / count
        };
        // |rounded| <= |self.0|, so this always fits
        Self(rounded as i64)
    }

    /// English words for the whole-unit part, in the Indian numbering system.
    ///
    /// The fractional part is ignored. Negative amounts are outside the
    /// formatter's contract and render as their magnitude.
    pub fn in_words(&self) -> String {
        amount_in_words(self.whole_units().unsigned_abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₹10.50", "$10", "1,50,000.75"
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Drop any leading currency symbol and digit grouping separators
        let s: String = s
            .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '.')
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let (units, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (units.is_empty() && frac.is_empty()) || !all_digits(units) || !all_digits(frac) {
            return Err(MoneyParseError::InvalidFormat(s));
        }

        let units: i64 = if units.is_empty() {
            0
        } else {
            units
                .parse()
                .map_err(|_| MoneyParseError::OutOfRange(s.clone()))?
        };

        // Pad or truncate the fraction to 2 digits; all ASCII, so byte slicing is safe
        let frac_cents = match frac.len() {
            0 => 0,
            1 => i64::from(frac.as_bytes()[0] - b'0') * 10,
            _ => i64::from(frac.as_bytes()[0] - b'0') * 10 + i64::from(frac.as_bytes()[1] - b'0'),
        };

        let cents = units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or_else(|| MoneyParseError::OutOfRange(s.clone()))?;

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.whole_units().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.whole_units(), self.cents_part())
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal form without a currency symbol, e.g. `1500.50`
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.whole_units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.whole_units(), self.cents_part())
        }
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.whole_units())
        } else {
            serializer.serialize_f64(self.0 as f64 / 100.0)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Int(units) => Self::checked_from_units(units).ok_or_else(|| {
                serde::de::Error::custom(MoneyParseError::OutOfRange(units.to_string()))
            }),
            RawAmount::Float(units) => {
                let cents = (units * 100.0).round();
                // i64::MAX as f64 rounds up to 2^63, which itself does not fit
                if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
                    Ok(Self(cents as i64))
                } else {
                    Err(serde::de::Error::custom(MoneyParseError::OutOfRange(
                        units.to_string(),
                    )))
                }
            }
            RawAmount::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    /// Well-formed, but too large to represent
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
