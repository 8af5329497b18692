//! propledger - property income and expense tracker
//!
//! This library provides the core functionality for the propledger command
//! line tool: a ledger of rent, deposits, repairs and other property entries
//! with dashboards, renewal reminders, CSV export and receipt rendering.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, money, months, settings data)
//! - `format`: Amount-in-words formatting
//! - `query`: Filtering, sorting and pagination over entry snapshots
//! - `reports`: Totals, property and monthly breakdowns, renewal reminders
//! - `export`: CSV, receipts and full JSON/YAML backups
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use propledger::config::paths::LedgerPaths;
//! use propledger::query::EntryQuery;
//! use propledger::storage::Storage;
//!
//! let mut storage = Storage::new(LedgerPaths::new()?)?;
//! storage.load_all()?;
//! let entries = storage.entries.snapshot()?;
//! let view = EntryQuery::default().run(&entries, chrono::Local::now().date_naive())?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod format;
pub mod models;
pub mod query;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
