//! CSV export of entries
//!
//! One row per entry under a fixed header. Every field is quoted and
//! embedded quotes are doubled, so spreadsheet tools read names and
//! contacts with commas intact.

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::models::Entry;

/// Column order of the entry export
pub const CSV_COLUMNS: [&str; 12] = [
    "id",
    "date",
    "type",
    "category",
    "amount",
    "amountInWords",
    "name",
    "contact",
    "monthYear",
    "renewDate",
    "renewDateReminder",
    "property",
];

/// The export row of one entry, in [`CSV_COLUMNS`] order
pub fn entry_record(entry: &Entry) -> [String; 12] {
    [
        entry.id.to_string(),
        entry.date.clone(),
        entry.entry_type.to_string(),
        entry.category.clone(),
        entry.amount.to_string(),
        entry.amount.in_words(),
        entry.name.clone(),
        entry.contact.clone(),
        entry.month_year_label(),
        entry.renew_date.clone(),
        entry.renew_date_reminder.to_string(),
        entry.property.clone(),
    ]
}

/// Write entries as CSV, returning the number of data rows written
pub fn export_entries_csv<'a, I, W>(entries: I, writer: W) -> LedgerResult<usize>
where
    I: IntoIterator<Item = &'a Entry>,
    W: Write,
{
    let mut csv_writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    csv_writer
        .write_record(CSV_COLUMNS)
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    let mut rows = 0;
    for entry in entries {
        csv_writer
            .write_record(entry_record(entry))
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        rows += 1;
    }

    csv_writer
        .flush()
        .map_err(|e| LedgerError::Export(e.to_string()))?;

    log::debug!("Exported {} entries as CSV", rows);
    Ok(rows)
}
