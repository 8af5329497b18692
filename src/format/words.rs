//! Amounts in words, Indian numbering system
//!
//! Groups are crore (10^7), lakh (10^5), thousand, hundred and the final
//! 0-99 remainder. When more than one group is present, "and" precedes the
//! last one: `1234567` reads "Twelve Lakh Thirty Four Thousand Five Hundred
//! and Sixty Seven".

const UNITS: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten", "Eleven", "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen",
    "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;
const HUNDRED: u64 = 100;

/// Render a whole amount in English words.
///
/// ```
/// use propledger::format::words::amount_in_words;
/// assert_eq!(amount_in_words(100_005), "One Lakh and Five");
/// ```
pub fn amount_in_words(amount: u64) -> String {
    if amount == 0 {
        return "Zero".to_string();
    }

    let mut parts = group_parts(amount);
    if parts.len() > 1 {
        let last = parts.len() - 1;
        parts.insert(last, "and".to_string());
    }
    parts.join(" ")
}

/// One rendered part per non-zero group, most significant first
fn group_parts(amount: u64) -> Vec<String> {
    let crore = amount / CRORE;
    let lakh = (amount % CRORE) / LAKH;
    let thousand = (amount % LAKH) / THOUSAND;
    let hundred = (amount % THOUSAND) / HUNDRED;
    let rest = amount % HUNDRED;

    let mut parts = Vec::with_capacity(5);

    if crore > 0 {
        // Counts above 99 crore are spelled with the same grouping
        let count = if crore > 99 {
            group_parts(crore).join(" ")
        } else {
            two_digits(crore)
        };
        parts.push(format!("{} Crore", count));
    }
    if lakh > 0 {
        parts.push(format!("{} Lakh", two_digits(lakh)));
    }
    if thousand > 0 {
        parts.push(format!("{} Thousand", two_digits(thousand)));
    }
    if hundred > 0 {
        parts.push(format!("{} Hundred", UNITS[hundred as usize]));
    }
    if rest > 0 {
        parts.push(two_digits(rest));
    }

    parts
}

/// 1..=99 in words
fn two_digits(n: u64) -> String {
    let n = (n % 100) as usize;
    match n {
        0..=9 => UNITS[n].to_string(),
        10..=19 => TEENS[n - 10].to_string(),
        _ if n % 10 == 0 => TENS[n / 10].to_string(),
        _ => format!("{} {}", TENS[n / 10], UNITS[n % 10]),
    }
}
