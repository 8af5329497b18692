//! Storage layer for propledger
//!
//! JSON file persistence with atomic writes and automatic directory
//! creation. Storage is the collaborator that hands the query engine its
//! snapshots; the engine itself never touches disk.

pub mod entries;
pub mod file_io;
pub mod settings_data;

pub use entries::EntryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use settings_data::SettingsDataRepository;

use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub entries: EntryRepository,
    pub settings_data: SettingsDataRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        Ok(Self {
            entries: EntryRepository::new(paths.entries_file()),
            settings_data: SettingsDataRepository::new(paths.settings_data_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), LedgerError> {
        self.entries.load()?;
        self.settings_data.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), LedgerError> {
        self.entries.save()?;
        self.settings_data.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}
