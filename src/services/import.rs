//! CSV import service
//!
//! Reads files in the entry export layout back into the ledger. Columns are
//! located by header name, so reordered or partial exports still import as
//! long as the required columns are present.

use std::collections::{HashMap, HashSet};
use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    parse_entry_date, Entry, EntryId, EntryType, Money, ReminderWindow, DATE_FORMAT,
};
use crate::storage::Storage;

/// Columns that must be present in the header
const REQUIRED_COLUMNS: [&str; 4] = ["name", "type", "amount", "date"];

/// Header positions of the recognised columns
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    columns: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Map header names (case-insensitive) to positions
    pub fn from_headers(headers: &StringRecord) -> LedgerResult<Self> {
        let columns: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.trim().to_lowercase(), idx))
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !columns.contains_key(*c))
            .collect();
        if !missing.is_empty() {
            return Err(LedgerError::Import(format!(
                "Missing required column(s): {}",
                missing.join(", ")
            )));
        }

        Ok(Self { columns })
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        self.columns
            .get(&column.to_lowercase())
            .and_then(|&idx| record.get(idx))
            .map(str::trim)
            .unwrap_or("")
    }
}

/// A parsed data row
#[derive(Debug, Clone)]
pub struct ParsedRow {
    /// 1-based data row number, header excluded
    pub row_number: usize,
    pub entry: Result<Entry, String>,
}

/// What would happen to a row on import
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    New,
    /// Id already stored, or repeated earlier in the file
    Duplicate,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ImportPreviewEntry {
    pub row_number: usize,
    pub entry: Option<Entry>,
    pub status: ImportStatus,
}

/// Result of a completed import
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    pub errors: usize,
    pub imported_ids: Vec<EntryId>,
    /// Error messages by row number
    pub error_messages: HashMap<usize, String>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse CSV text with a header row into entries
    pub fn parse_csv<R: Read>(&self, reader: R) -> LedgerResult<Vec<ParsedRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mapping = ColumnMapping::from_headers(&headers)?;

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let row_number = idx + 1;
            let entry = match result {
                Ok(record) => parse_record(&record, &mapping),
                Err(e) => Err(format!("Error reading CSV record: {}", e)),
            };
            rows.push(ParsedRow { row_number, entry });
        }
        Ok(rows)
    }

    /// Classify parsed rows against what is already stored
    pub fn generate_preview(&self, parsed: &[ParsedRow]) -> LedgerResult<Vec<ImportPreviewEntry>> {
        let mut known: HashSet<EntryId> = self
            .storage
            .entries
            .snapshot()?
            .into_iter()
            .map(|e| e.id)
            .collect();

        let preview = parsed
            .iter()
            .map(|row| match &row.entry {
                Ok(entry) => {
                    let status = if known.insert(entry.id.clone()) {
                        ImportStatus::New
                    } else {
                        ImportStatus::Duplicate
                    };
                    ImportPreviewEntry {
                        row_number: row.row_number,
                        entry: Some(entry.clone()),
                        status,
                    }
                }
                Err(e) => ImportPreviewEntry {
                    row_number: row.row_number,
                    entry: None,
                    status: ImportStatus::Error(e.clone()),
                },
            })
            .collect();

        Ok(preview)
    }

    /// Store the new rows of a preview
    pub fn import_from_preview(&self, preview: &[ImportPreviewEntry]) -> LedgerResult<ImportResult> {
        let mut result = ImportResult::default();

        for row in preview {
            match (&row.status, &row.entry) {
                (ImportStatus::New, Some(entry)) => {
                    self.storage.entries.upsert(entry.clone())?;
                    result.imported += 1;
                    result.imported_ids.push(entry.id.clone());
                }
                (ImportStatus::Duplicate, _) => {
                    result.duplicates_skipped += 1;
                }
                (ImportStatus::Error(e), _) => {
                    log::warn!("Skipping CSV row {}: {}", row.row_number, e);
                    result.errors += 1;
                    result.error_messages.insert(row.row_number, e.clone());
                }
                (ImportStatus::New, None) => {
                    result.errors += 1;
                    result
                        .error_messages
                        .insert(row.row_number, "Row has no entry".to_string());
                }
            }
        }

        self.storage.entries.save()?;

        log::info!(
            "CSV import: {} imported, {} duplicates skipped, {} rejected",
            result.imported,
            result.duplicates_skipped,
            result.errors
        );
        Ok(result)
    }

    /// Parse, classify and import in one step
    pub fn import_csv<R: Read>(&self, reader: R) -> LedgerResult<ImportResult> {
        let parsed = self.parse_csv(reader)?;
        let preview = self.generate_preview(&parsed)?;
        self.import_from_preview(&preview)
    }
}

fn parse_record(record: &StringRecord, mapping: &ColumnMapping) -> Result<Entry, String> {
    let entry_type: EntryType = mapping.get(record, "type").parse()?;

    let amount_str = mapping.get(record, "amount");
    let amount = Money::parse(amount_str)
        .map_err(|e| format!("Could not parse amount '{}': {}", amount_str, e))?;

    let date = parse_date(mapping.get(record, "date"))?;

    let mut entry = Entry::new(mapping.get(record, "name"), entry_type, amount, date);

    let id = mapping.get(record, "id");
    if !id.is_empty() {
        entry.id = EntryId::from(id);
    }
    entry.contact = mapping.get(record, "contact").to_string();
    entry.category = mapping.get(record, "category").to_string();
    entry.property = mapping.get(record, "property").to_string();

    let renew = mapping.get(record, "renewDate");
    if !renew.is_empty() {
        entry.renew_date = parse_date(renew)?.format(DATE_FORMAT).to_string();
    }

    // Same leniency as stored data: unknown reminder values switch it off
    entry.renew_date_reminder = mapping
        .get(record, "renewDateReminder")
        .parse::<i64>()
        .map(ReminderWindow::from_days)
        .unwrap_or(ReminderWindow::Off);
    if entry.renew_date.is_empty() {
        entry.renew_date_reminder = ReminderWindow::Off;
    }

    entry.validate().map_err(|e| e.to_string())?;
    Ok(entry)
}

/// Parse a date using the storage format first, then common alternatives
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    if let Some(date) = parse_entry_date(s) {
        return Ok(date);
    }

    let formats = ["%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d %b %Y"];
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s.trim(), format) {
            return Ok(date);
        }
    }

    Err(format!("Could not parse date: '{}'", s))
}
