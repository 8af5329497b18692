//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;

use super::{parse_today, FilterArgs};
use crate::config::settings::Settings;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_entries_csv, export_full_json, export_full_yaml, render_receipt};
use crate::query::{EntryQuery, EntrySort};
use crate::services::EntryService;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export filtered entries to CSV
    Csv {
        /// Output file path
        output: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Reference date for time windows (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },

    /// Export all data to JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export all data to YAML
    Yaml {
        /// Output file path
        output: PathBuf,
    },

    /// Render the receipt of one entry
    Receipt {
        /// Entry ID or unique ID prefix
        id: String,

        /// Directory to write the receipt into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Csv {
            output,
            filters,
            today,
        } => {
            let today = parse_today(today.as_deref())?;
            let entries = storage.entries.snapshot()?;
            let query = EntryQuery::new(filters.to_filter()?, EntrySort::default());
            let selected = query.select(&entries, today);

            let mut writer = create_output(&output)?;
            let count = export_entries_csv(selected.iter().copied(), &mut writer)?;
            flush(&mut writer)?;
            println!("Exported {} entries to: {}", count, output.display());
        }
        ExportCommands::Json { output, pretty } => {
            let mut writer = create_output(&output)?;
            export_full_json(storage, &mut writer, pretty)?;
            flush(&mut writer)?;
            println!("Full ledger exported to: {}", output.display());
        }
        ExportCommands::Yaml { output } => {
            let mut writer = create_output(&output)?;
            export_full_yaml(storage, &mut writer)?;
            flush(&mut writer)?;
            println!("Full ledger exported to: {}", output.display());
        }
        ExportCommands::Receipt { id, dir } => {
            let entry = EntryService::new(storage).find(&id)?;
            let settings_data = storage.settings_data.get()?;
            let receipt = render_receipt(&entry, &settings_data, &settings.currency_symbol);

            std::fs::create_dir_all(&dir).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", dir.display(), e))
            })?;
            let path = dir.join(&receipt.filename);
            std::fs::write(&path, receipt.body).map_err(|e| {
                LedgerError::Export(format!("Failed to write {}: {}", path.display(), e))
            })?;
            println!("Receipt written to: {}", path.display());
        }
    }

    Ok(())
}

fn create_output(output: &Path) -> LedgerResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        LedgerError::Export(format!(
            "Failed to create file {}: {}",
            output.display(),
            e
        ))
    })?;
    Ok(BufWriter::new(file))
}

fn flush(writer: &mut BufWriter<File>) -> LedgerResult<()> {
    writer
        .flush()
        .map_err(|e| LedgerError::Export(format!("Failed to flush output: {}", e)))
}
