//! Service layer for propledger
//!
//! Business logic on top of the storage layer: validation on the write
//! path and bulk import.

pub mod entry;
pub mod import;

pub use entry::{CreateEntryInput, EntryService, UpdateEntryInput};
pub use import::{ImportResult, ImportService, ImportStatus};
