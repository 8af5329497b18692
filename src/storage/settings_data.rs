//! Settings data repository
//!
//! Properties, categories and receipt templates, stored in settings.json.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::SettingsData;

use super::file_io::{read_json, write_json_atomic};

pub struct SettingsDataRepository {
    path: PathBuf,
    data: RwLock<SettingsData>,
}

impl SettingsDataRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(SettingsData::default()),
        }
    }

    /// Load from disk; a missing file yields the default lists
    pub fn load(&self) -> Result<(), LedgerError> {
        let mut file_data: SettingsData = read_json(&self.path)?;
        file_data.normalize();

        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;
        Ok(())
    }

    pub fn save(&self) -> Result<(), LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    pub fn get(&self) -> Result<SettingsData, LedgerError> {
        let data = self
            .data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    pub fn set(&self, mut settings: SettingsData) -> Result<(), LedgerError> {
        settings.normalize();
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = settings;
        Ok(())
    }

    /// Apply a change and hand back its result
    pub fn update<R>(&self, change: impl FnOnce(&mut SettingsData) -> R) -> Result<R, LedgerError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let result = change(&mut data);
        data.normalize();
        Ok(result)
    }
}
