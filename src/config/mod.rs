//! Configuration module for propledger
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User preference persistence

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{Settings, Theme};
