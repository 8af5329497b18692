//! Shared settings record
//!
//! The list of properties, the category lists per entry type and the
//! receipt templates. The query engine only reads this; list maintenance
//! happens through the settings commands.

use serde::{Deserialize, Serialize};

use super::entry::EntryType;

/// Default receipt body. Tokens are replaced literally by the template renderer.
pub const DEFAULT_PDF_TEMPLATE: &str = "\
RECEIPT

Receipt No : {{id}}
Date       : {{date}}
Period     : {{monthyear}}

Received from {{name}} ({{contact}}) the sum of {{currency}}{{amount}}
({{amountInWords}} only) towards {{category}} for {{property}}.

Entry type : {{type}}
Renews on  : {{renewDate}} (reminder {{renewDateReminder}} days before)
";

/// Default receipt filename template
pub const DEFAULT_PDF_FILENAME: &str = "{{name}}_{{monthyear}}_{{id}}";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsData {
    #[serde(default)]
    pub properties: Vec<String>,

    #[serde(default)]
    pub income_categories: Vec<String>,

    #[serde(default)]
    pub expense_categories: Vec<String>,

    #[serde(default = "default_pdf_template")]
    pub pdf_template: String,

    #[serde(default = "default_pdf_filename")]
    pub pdf_filename: String,
}

fn default_pdf_template() -> String {
    DEFAULT_PDF_TEMPLATE.to_string()
}

fn default_pdf_filename() -> String {
    DEFAULT_PDF_FILENAME.to_string()
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            properties: Vec::new(),
            income_categories: vec!["Deposit".into(), "Rent".into()],
            expense_categories: vec![
                "Maintenance".into(),
                "Property Tax".into(),
                "Repairs".into(),
                "Utilities".into(),
            ],
            pdf_template: default_pdf_template(),
            pdf_filename: default_pdf_filename(),
        }
    }
}

impl SettingsData {
    /// Categories valid for an entry type
    pub fn categories_for(&self, entry_type: EntryType) -> &[String] {
        match entry_type {
            EntryType::Income => &self.income_categories,
            EntryType::Expense => &self.expense_categories,
        }
    }

    pub fn has_category(&self, entry_type: EntryType, name: &str) -> bool {
        contains_ignore_case(self.categories_for(entry_type), name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        contains_ignore_case(&self.properties, name)
    }

    /// Add a property. Returns false if it was already present.
    pub fn add_property(&mut self, name: &str) -> bool {
        insert_sorted(&mut self.properties, name)
    }

    /// Remove a property. Returns false if it was not present.
    pub fn remove_property(&mut self, name: &str) -> bool {
        remove_ignore_case(&mut self.properties, name)
    }

    pub fn add_category(&mut self, entry_type: EntryType, name: &str) -> bool {
        insert_sorted(self.categories_mut(entry_type), name)
    }

    pub fn remove_category(&mut self, entry_type: EntryType, name: &str) -> bool {
        remove_ignore_case(self.categories_mut(entry_type), name)
    }

    /// Sort and deduplicate every list, e.g. after loading hand-edited data
    pub fn normalize(&mut self) {
        for list in [
            &mut self.properties,
            &mut self.income_categories,
            &mut self.expense_categories,
        ] {
            let items = std::mem::take(list);
            for item in items {
                insert_sorted(list, &item);
            }
        }
    }

    fn categories_mut(&mut self, entry_type: EntryType) -> &mut Vec<String> {
        match entry_type {
            EntryType::Income => &mut self.income_categories,
            EntryType::Expense => &mut self.expense_categories,
        }
    }
}

fn contains_ignore_case(list: &[String], name: &str) -> bool {
    let name = name.trim();
    list.iter().any(|item| item.eq_ignore_ascii_case(name))
}

fn insert_sorted(list: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || contains_ignore_case(list, name) {
        return false;
    }
    let pos = list
        .iter()
        .position(|item| item.to_lowercase() > name.to_lowercase())
        .unwrap_or(list.len());
    list.insert(pos, name.to_string());
    true
}

fn remove_ignore_case(list: &mut Vec<String>, name: &str) -> bool {
    let before = list.len();
    let name = name.trim();
    list.retain(|item| !item.eq_ignore_ascii_case(name));
    list.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_property_keeps_sorted_and_unique() {
        let mut data = SettingsData::default();
        assert!(data.add_property("Villa"));
        assert!(data.add_property("apartment 4"));
        assert!(data.add_property("Flat 2B"));
        assert!(!data.add_property("flat 2b"));
        assert!(!data.add_property("   "));
        assert_eq!(data.properties, vec!["apartment 4", "Flat 2B", "Villa"]);
    }

    #[test]
    fn test_remove_category() {
        let mut data = SettingsData::default();
        assert!(data.has_category(EntryType::Expense, "repairs"));
        assert!(data.remove_category(EntryType::Expense, "REPAIRS"));
        assert!(!data.has_category(EntryType::Expense, "Repairs"));
        assert!(!data.remove_category(EntryType::Expense, "Repairs"));
    }

    #[test]
    fn test_categories_are_per_type() {
        let mut data = SettingsData::default();
        data.add_category(EntryType::Income, "Parking");
        assert!(data.has_category(EntryType::Income, "Parking"));
        assert!(!data.has_category(EntryType::Expense, "Parking"));
    }

    #[test]
    fn test_normalize() {
        let mut data = SettingsData {
            properties: vec!["b".into(), "A".into(), "a".into()],
            ..SettingsData::default()
        };
        data.normalize();
        assert_eq!(data.properties, vec!["A", "b"]);
    }

    #[test]
    fn test_missing_templates_use_defaults() {
        let data: SettingsData = serde_json::from_str(r#"{"properties":["Flat 2B"]}"#).unwrap();
        assert_eq!(data.pdf_filename, DEFAULT_PDF_FILENAME);
        assert!(data.pdf_template.contains("{{amountInWords}}"));
        assert!(data.income_categories.is_empty());
    }
}
