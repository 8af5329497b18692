//! JSON Export functionality
//!
//! Exports every entry plus the settings record to JSON with schema
//! versioning, and reads such a backup back with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, SettingsData};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All entries, in stored order
    pub entries: Vec<Entry>,

    /// Properties, categories and templates
    pub settings_data: SettingsData,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub entry_count: usize,
    pub income_count: usize,
    pub expense_count: usize,
    pub property_count: usize,

    /// Earliest parsable entry date
    pub earliest_entry: Option<String>,

    /// Latest parsable entry date
    pub latest_entry: Option<String>,
}

impl FullExport {
    /// Build an export from an entry snapshot and settings
    pub fn new(entries: Vec<Entry>, settings_data: SettingsData) -> Self {
        let dates: Vec<_> = entries.iter().filter_map(|e| e.parsed_date()).collect();
        let income_count = entries.iter().filter(|e| e.is_income()).count();

        let metadata = ExportMetadata {
            entry_count: entries.len(),
            income_count,
            expense_count: entries.len() - income_count,
            property_count: settings_data.properties.len(),
            earliest_entry: dates.iter().min().map(|d| d.to_string()),
            latest_entry: dates.iter().max().map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries,
            settings_data,
            metadata,
        }
    }

    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> LedgerResult<Self> {
        Ok(Self::new(
            storage.entries.snapshot()?,
            storage.settings_data.get()?,
        ))
    }

    /// Validate the export structure
    pub fn validate(&self) -> LedgerResult<()> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(LedgerError::Import(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            )));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.id.as_str().trim().is_empty() {
                return Err(LedgerError::Import("Entry with an empty id".to_string()));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(LedgerError::duplicate_entry(entry.id.as_str()));
            }
            if entry.amount.is_negative() {
                return Err(LedgerError::Import(format!(
                    "Entry {} has a negative amount",
                    entry.id
                )));
            }
        }

        Ok(())
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> LedgerResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export
pub fn import_from_json(json_str: &str) -> LedgerResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| LedgerError::Import(e.to_string()))?;

    export.validate()?;

    Ok(export)
}

/// Replace stored entries and settings with a validated backup
pub fn restore(storage: &Storage, export: FullExport) -> LedgerResult<usize> {
    let count = export.entries.len();
    storage.entries.replace_all(export.entries)?;
    storage.settings_data.set(export.settings_data)?;
    storage.save_all()?;

    log::info!("Restored {} entries from backup", count);
    Ok(count)
}
