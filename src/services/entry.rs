//! Entry service
//!
//! The write path for entries: creation, partial updates and deletion, with
//! validation. Reads hand out snapshots for the query engine.

use chrono::NaiveDate;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Entry, EntryId, EntryType, Money, ReminderWindow, DATE_FORMAT};
use crate::storage::Storage;

/// Service for entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
}

/// Input for creating a new entry
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    pub name: String,
    pub entry_type: EntryType,
    pub amount: Money,
    pub date: NaiveDate,
    pub contact: Option<String>,
    pub category: Option<String>,
    pub property: Option<String>,
    pub renew_date: Option<NaiveDate>,
    pub reminder: ReminderWindow,
}

impl CreateEntryInput {
    pub fn new(name: impl Into<String>, entry_type: EntryType, amount: Money, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            entry_type,
            amount,
            date,
            contact: None,
            category: None,
            property: None,
            renew_date: None,
            reminder: ReminderWindow::Off,
        }
    }
}

/// Partial update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryInput {
    pub name: Option<String>,
    pub entry_type: Option<EntryType>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    pub contact: Option<String>,
    pub category: Option<String>,
    pub property: Option<String>,
    /// `Some(None)` clears the renew date
    pub renew_date: Option<Option<NaiveDate>>,
    pub reminder: Option<ReminderWindow>,
}

impl UpdateEntryInput {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.entry_type.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.contact.is_none()
            && self.category.is_none()
            && self.property.is_none()
            && self.renew_date.is_none()
            && self.reminder.is_none()
    }
}

impl<'a> EntryService<'a> {
    /// Create a new entry service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new entry
    pub fn create(&self, input: CreateEntryInput) -> LedgerResult<Entry> {
        let mut entry = Entry::new(input.name.trim(), input.entry_type, input.amount, input.date);
        entry.contact = input.contact.unwrap_or_default().trim().to_string();
        entry.category = input.category.unwrap_or_default().trim().to_string();
        entry.property = input.property.unwrap_or_default().trim().to_string();
        entry.renew_date = input
            .renew_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        entry.renew_date_reminder = input.reminder;

        entry
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.warn_unknown_references(&entry)?;

        self.storage.entries.upsert(entry.clone())?;
        self.storage.entries.save()?;

        log::info!("Created entry {} ({} {})", entry.id, entry.entry_type, entry.name);
        Ok(entry)
    }

    /// Get an entry by ID
    pub fn get(&self, id: &EntryId) -> LedgerResult<Option<Entry>> {
        self.storage.entries.get(id)
    }

    /// Find an entry by full id or a unique id prefix
    pub fn find(&self, identifier: &str) -> LedgerResult<Entry> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(LedgerError::Validation("Entry id cannot be empty".into()));
        }

        if let Some(entry) = self.storage.entries.get(&EntryId::from(identifier))? {
            return Ok(entry);
        }

        let mut matches = self.storage.entries.find_by_prefix(identifier)?;
        match matches.len() {
            0 => Err(LedgerError::entry_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            n => Err(LedgerError::Validation(format!(
                "Id prefix '{}' matches {} entries; use more characters",
                identifier, n
            ))),
        }
    }

    /// All entries in insertion order
    pub fn list(&self) -> LedgerResult<Vec<Entry>> {
        self.storage.entries.snapshot()
    }

    /// Apply a partial update
    pub fn update(&self, id: &EntryId, input: UpdateEntryInput) -> LedgerResult<Entry> {
        let mut entry = self
            .storage
            .entries
            .get(id)?
            .ok_or_else(|| LedgerError::entry_not_found(id.as_str()))?;

        if let Some(name) = input.name {
            entry.name = name.trim().to_string();
        }
        if let Some(entry_type) = input.entry_type {
            entry.entry_type = entry_type;
        }
        if let Some(amount) = input.amount {
            entry.amount = amount;
        }
        if let Some(date) = input.date {
            entry.date = date.format(DATE_FORMAT).to_string();
        }
        if let Some(contact) = input.contact {
            entry.contact = contact.trim().to_string();
        }
        if let Some(category) = input.category {
            entry.category = category.trim().to_string();
        }
        if let Some(property) = input.property {
            entry.property = property.trim().to_string();
        }
        if let Some(renew_date) = input.renew_date {
            entry.renew_date = renew_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default();
            if renew_date.is_none() && input.reminder.is_none() {
                entry.renew_date_reminder = ReminderWindow::Off;
            }
        }
        if let Some(reminder) = input.reminder {
            entry.renew_date_reminder = reminder;
        }

        entry
            .validate()
            .map_err(|e| LedgerError::Validation(e.to_string()))?;
        self.warn_unknown_references(&entry)?;

        self.storage.entries.upsert(entry.clone())?;
        self.storage.entries.save()?;

        log::info!("Updated entry {}", entry.id);
        Ok(entry)
    }

    /// Delete an entry
    pub fn delete(&self, id: &EntryId) -> LedgerResult<Entry> {
        let entry = self
            .storage
            .entries
            .get(id)?
            .ok_or_else(|| LedgerError::entry_not_found(id.as_str()))?;

        self.storage.entries.delete(id)?;
        self.storage.entries.save()?;

        log::info!("Deleted entry {} ({})", entry.id, entry.name);
        Ok(entry)
    }

    /// Categories and properties outside the settings lists are allowed but flagged
    fn warn_unknown_references(&self, entry: &Entry) -> LedgerResult<()> {
        let settings = self.storage.settings_data.get()?;

        if !entry.category.is_empty() && !settings.has_category(entry.entry_type, &entry.category) {
            log::warn!(
                "Category '{}' is not a known {} category",
                entry.category,
                entry.entry_type.as_str().to_lowercase()
            );
        }
        if !entry.property.is_empty() && !settings.has_property(&entry.property) {
            log::warn!("Property '{}' is not in the property list", entry.property);
        }
        Ok(())
    }
}
