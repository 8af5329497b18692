//! YAML Export functionality
//!
//! Human-readable variant of the full backup.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, writer: &mut W) -> LedgerResult<()> {
    let export = FullExport::from_storage(storage)?;
    let io_err = |e: std::io::Error| LedgerError::Export(e.to_string());

    writeln!(writer, "# propledger full export").map_err(io_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(io_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(io_err)?;
    writeln!(writer, "#").map_err(io_err)?;
    writeln!(writer, "# Restore with: propledger import yaml <file>").map_err(io_err)?;
    writeln!(writer).map_err(io_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| LedgerError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
pub fn import_from_yaml(yaml_str: &str) -> LedgerResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| LedgerError::Import(e.to_string()))?;

    export.validate()?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use crate::models::{Entry, EntryType, Money, ReminderWindow};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_yaml_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        let mut lease = Entry::new(
            "Lease",
            EntryType::Income,
            Money::from_cents(1_500_050),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        );
        lease.renew_date = "2026-03-31".into();
        lease.renew_date_reminder = ReminderWindow::TenDays;
        storage.entries.upsert(lease.clone()).unwrap();

        let mut output = Vec::new();
        export_full_yaml(&storage, &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.starts_with("# propledger full export"));
        assert!(yaml.contains("Lease"));

        // Comment lines are valid YAML, so the file parses as written
        let imported = import_from_yaml(&yaml).unwrap();
        assert_eq!(imported.entries, vec![lease]);
    }
}
