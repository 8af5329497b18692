//! CLI commands for import
//!
//! CSV files in the export column layout are merged into the ledger.
//! JSON and YAML backups replace it.

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{import_from_json, import_from_yaml, restore, FullExport};
use crate::services::{ImportService, ImportStatus};
use crate::storage::Storage;

/// Import subcommands
#[derive(Subcommand, Debug)]
pub enum ImportCommands {
    /// Merge entries from a CSV file
    Csv {
        /// Path to CSV file
        file: PathBuf,
        /// Show what would be imported without storing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Restore a JSON backup, replacing all data
    Json {
        /// Path to JSON backup
        file: PathBuf,
        /// Overwrite existing data
        #[arg(short, long)]
        force: bool,
    },
    /// Restore a YAML backup, replacing all data
    Yaml {
        /// Path to YAML backup
        file: PathBuf,
        /// Overwrite existing data
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle import commands
pub fn handle_import_command(storage: &Storage, cmd: ImportCommands) -> LedgerResult<()> {
    match cmd {
        ImportCommands::Csv { file, dry_run } => handle_import_csv(storage, &file, dry_run),
        ImportCommands::Json { file, force } => {
            let export = import_from_json(&read_file(&file)?)?;
            handle_restore(storage, &file, export, force)
        }
        ImportCommands::Yaml { file, force } => {
            let export = import_from_yaml(&read_file(&file)?)?;
            handle_restore(storage, &file, export, force)
        }
    }
}

fn read_file(path: &Path) -> LedgerResult<String> {
    if !path.exists() {
        return Err(LedgerError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }
    std::fs::read_to_string(path)
        .map_err(|e| LedgerError::Import(format!("Failed to read file: {}", e)))
}

fn handle_import_csv(storage: &Storage, file: &Path, dry_run: bool) -> LedgerResult<()> {
    let import_service = ImportService::new(storage);
    let content = read_file(file)?;

    let parsed = import_service.parse_csv(content.as_bytes())?;
    if parsed.is_empty() {
        println!("No entries found in CSV file.");
        return Ok(());
    }

    let preview = import_service.generate_preview(&parsed)?;

    let new_count = preview.iter().filter(|e| e.status == ImportStatus::New).count();
    let dup_count = preview
        .iter()
        .filter(|e| e.status == ImportStatus::Duplicate)
        .count();
    let err_count = preview
        .iter()
        .filter(|e| matches!(e.status, ImportStatus::Error(_)))
        .count();

    println!("Import Preview for '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  New entries:        {}", new_count);
    println!("  Duplicates (skip):  {}", dup_count);
    println!("  Errors:             {}", err_count);
    println!();

    if dry_run {
        for row in &preview {
            if let ImportStatus::Error(msg) = &row.status {
                println!("  Row {}: {}", row.row_number, msg);
            }
        }
        println!("Dry run: nothing was imported.");
        return Ok(());
    }

    if new_count == 0 {
        println!("No new entries to import.");
        return Ok(());
    }

    let result = import_service.import_from_preview(&preview)?;

    println!("Import Complete!");
    println!("  Imported:    {}", result.imported);
    println!("  Skipped:     {}", result.duplicates_skipped);
    if !result.error_messages.is_empty() {
        println!("  Errors:      {}", result.errors);
        let mut rows: Vec<_> = result.error_messages.iter().collect();
        rows.sort_by_key(|(row, _)| **row);
        for (row, msg) in rows {
            println!("    Row {}: {}", row, msg);
        }
    }

    Ok(())
}

fn handle_restore(
    storage: &Storage,
    file: &Path,
    export: FullExport,
    force: bool,
) -> LedgerResult<()> {
    println!("Backup Information");
    println!("==================");
    println!("File: {}", file.display());
    println!(
        "Exported: {}",
        export.exported_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Schema version: {}", export.schema_version);
    println!("Entries: {}", export.metadata.entry_count);
    println!();

    if !force && storage.entries.count()? > 0 {
        println!("WARNING: This will overwrite ALL current data!");
        println!("To proceed, run again with --force flag.");
        return Ok(());
    }

    let count = restore(storage, export)?;
    println!("Restored {} entries.", count);
    Ok(())
}
