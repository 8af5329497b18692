//! Receipt templates
//!
//! Literal `{{token}}` replacement over the receipt body and filename
//! templates. Unknown tokens stay as they are.

use serde::Serialize;

use crate::models::{Entry, SettingsData};

/// Tokens understood by [`render_template`]
pub const TEMPLATE_TOKENS: [&str; 13] = [
    "id",
    "name",
    "contact",
    "type",
    "category",
    "amount",
    "amountInWords",
    "date",
    "monthyear",
    "renewDate",
    "renewDateReminder",
    "property",
    "currency",
];

fn token_value(token: &str, entry: &Entry, currency: &str) -> Option<String> {
    let value = match token {
        "id" => entry.id.to_string(),
        "name" => entry.name.clone(),
        "contact" => entry.contact.clone(),
        "type" => entry.entry_type.to_string(),
        "category" => entry.category.clone(),
        "amount" => entry.amount.to_string(),
        "amountInWords" => entry.amount.in_words(),
        "date" => entry.date.clone(),
        "monthyear" => entry.month_year_label(),
        "renewDate" => entry.renew_date.clone(),
        "renewDateReminder" => entry.renew_date_reminder.to_string(),
        "property" => entry.property.clone(),
        "currency" => currency.to_string(),
        _ => return None,
    };
    Some(value)
}

/// Substitute every known token in `template` with the entry's values
pub fn render_template(template: &str, entry: &Entry, currency: &str) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let substituted = after_open.find("}}").and_then(|close| {
            token_value(&after_open[..close], entry, currency).map(|value| (value, close))
        });
        match substituted {
            Some((value, close)) => {
                output.push_str(&value);
                rest = &after_open[close + 2..];
            }
            // Not a token: keep the braces and rescan just past them
            None => {
                output.push_str("{{");
                rest = after_open;
            }
        }
    }

    output.push_str(rest);
    output
}

/// A rendered receipt, ready to be typeset or written out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub filename: String,
    pub body: String,
}

/// Render the receipt body and filename of one entry
pub fn render_receipt(entry: &Entry, settings: &SettingsData, currency: &str) -> Receipt {
    let body = render_template(&settings.pdf_template, entry, currency);
    let filename = sanitize_filename(&render_template(&settings.pdf_filename, entry, currency));

    Receipt { filename, body }
}

/// Replace path separators and reserved characters, and add `.txt` when
/// the name has no extension
pub fn sanitize_filename(raw: &str) -> String {
    let mut name: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    let name_trimmed = name.trim_matches('.').to_string();
    name = if name_trimmed.is_empty() {
        "receipt".to_string()
    } else {
        name_trimmed
    };

    if !has_extension(&name) {
        name.push_str(".txt");
    }
    name
}

fn has_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) => {
            !stem.is_empty()
                && (1..=5).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, EntryType, Money, ReminderWindow};
    use chrono::NaiveDate;

    fn entry() -> Entry {
        let mut e = Entry::new(
            "Asha Rao",
            EntryType::Income,
            Money::from_units(100005),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        );
        e.id = EntryId::from("k3J9x");
        e.contact = "98450 00000".into();
        e.category = "Rent".into();
        e.property = "Flat 2B".into();
        e.renew_date = "2026-02-28".into();
        e.renew_date_reminder = ReminderWindow::TenDays;
        e
    }

    #[test]
    fn test_all_tokens_substituted() {
        let template = TEMPLATE_TOKENS
            .iter()
            .map(|t| format!("{{{{{}}}}}", t))
            .collect::<Vec<_>>()
            .join("|");
        let rendered = render_template(&template, &entry(), "₹");
        assert_eq!(
            rendered,
            "k3J9x|Asha Rao|98450 00000|Income|Rent|100005.00|One Lakh and Five|2025-03-01|Mar-2025|2026-02-28|10|Flat 2B|₹"
        );
    }

    #[test]
    fn test_unknown_tokens_left_verbatim() {
        let rendered = render_template("{{name}} owes {{balance}} {{ unclosed", &entry(), "₹");
        assert_eq!(rendered, "Asha Rao owes {{balance}} {{ unclosed");
    }

    #[test]
    fn test_stray_opener_does_not_swallow_next_token() {
        let rendered = render_template("{{ Dear {{name}}", &entry(), "₹");
        assert_eq!(rendered, "{{ Dear Asha Rao");

        let rendered = render_template("{{{{name}} paid {{amount}}", &entry(), "₹");
        assert_eq!(rendered, "{{Asha Rao paid 100005.00");
    }

    #[test]
    fn test_repeated_tokens() {
        let rendered = render_template("{{currency}}{{amount}} / {{currency}}", &entry(), "$");
        assert_eq!(rendered, "$100005.00 / $");
    }

    #[test]
    fn test_render_receipt_default_templates() {
        let receipt = render_receipt(&entry(), &SettingsData::default(), "₹");
        assert_eq!(receipt.filename, "Asha Rao_Mar-2025_k3J9x.txt");
        assert!(receipt.body.contains("One Lakh and Five"));
        assert!(receipt.body.contains("₹100005.00"));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("../etc/passwd"), "_etc_passwd.txt");
        assert_eq!(sanitize_filename("a:b*c"), "a_b_c.txt");
        assert_eq!(sanitize_filename("receipt.pdf"), "receipt.pdf");
        assert_eq!(sanitize_filename("Dr. Rao_Mar-2025"), "Dr. Rao_Mar-2025.txt");
        assert_eq!(sanitize_filename("   "), "receipt.txt");
    }
}
