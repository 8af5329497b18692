//! Entry repository for JSON storage
//!
//! Manages loading and saving entries to entries.json. Entries keep the
//! order they were added in, which is the order snapshots are handed out.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Entry, EntryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable entry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EntryData {
    entries: Vec<Entry>,
}

/// Repository for entry persistence
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<Vec<Entry>>,
}

impl EntryRepository {
    /// Create a new entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: EntryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        log::debug!(
            "Loaded {} entries from {}",
            file_data.entries.len(),
            self.path.display()
        );
        *data = file_data.entries;

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let file_data = EntryData {
            entries: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)?;
        log::debug!("Saved {} entries to {}", data.len(), self.path.display());
        Ok(())
    }

    /// The full ordered entry list
    pub fn snapshot(&self) -> Result<Vec<Entry>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Get an entry by ID
    pub fn get(&self, id: &EntryId) -> Result<Option<Entry>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|e| &e.id == id).cloned())
    }

    /// Find entries whose id starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Entry>, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .filter(|e| e.id.as_str().starts_with(prefix))
            .cloned()
            .collect())
    }

    pub fn contains(&self, id: &EntryId) -> Result<bool, LedgerError> {
        Ok(self.get(id)?.is_some())
    }

    /// Insert or update an entry. Updates keep the entry's position.
    pub fn upsert(&self, entry: Entry) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        match data.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => data.push(entry),
        }
        Ok(())
    }

    /// Replace every entry
    pub fn replace_all(&self, entries: Vec<Entry>) -> Result<(), LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *data = entries;
        Ok(())
    }

    /// Delete an entry, returning whether it existed
    pub fn delete(&self, id: &EntryId) -> Result<bool, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.len();
        data.retain(|e| &e.id != id);
        Ok(data.len() != before)
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryType, Money, ReminderWindow};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, EntryRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");
        let repo = EntryRepository::new(path);
        (temp_dir, repo)
    }

    fn entry(name: &str) -> Entry {
        Entry::new(
            name,
            EntryType::Income,
            Money::from_units(100),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_keeps_insertion_order() {
        let (_temp_dir, repo) = create_test_repo();
        let first = entry("First");
        let second = entry("Second");
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second.clone()).unwrap();

        let mut renamed = first.clone();
        renamed.name = "First (renamed)".into();
        repo.upsert(renamed).unwrap();

        let names: Vec<String> = repo.snapshot().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["First (renamed)", "Second"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let e = entry("Asha");
        let id = e.id.clone();
        repo.upsert(e).unwrap();
        repo.save().unwrap();

        let repo2 = EntryRepository::new(temp_dir.path().join("entries.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(&id).unwrap().map(|e| e.name), Some("Asha".to_string()));
    }

    #[test]
    fn test_out_of_domain_reminder_loads_as_off() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(
            temp_dir.path().join("entries.json"),
            r#"{"entries":[{"id":"x1","name":"Lease","type":"Income","amount":1200,
                "date":"2025-01-01","renewDate":"2026-01-01","renewDateReminder":"7"}]}"#,
        )
        .unwrap();

        repo.load().unwrap();
        let loaded = repo.get(&EntryId::from("x1")).unwrap().unwrap();
        assert_eq!(loaded.renew_date_reminder, ReminderWindow::Off);
    }

    #[test]
    fn test_delete_and_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        let mut e = entry("Asha");
        e.id = EntryId::from("abc123");
        repo.upsert(e).unwrap();

        assert_eq!(repo.find_by_prefix("abc").unwrap().len(), 1);
        assert!(repo.delete(&EntryId::from("abc123")).unwrap());
        assert!(!repo.delete(&EntryId::from("abc123")).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
