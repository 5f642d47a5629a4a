use serde_json::Value;

use crate::record::{Record, value_text};

/// Case-insensitive substring filter across every field of a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.trim().to_lowercase();
        Self { raw, needle }
    }

    /// Text as typed, untrimmed.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.is_empty() || record.values().any(|value| self.matches_value(value))
    }

    // Nested objects are searched field by field so their keys don't match.
    fn matches_value(&self, value: &Value) -> bool {
        match value {
            Value::Object(fields) => fields.values().any(|inner| self.matches_value(inner)),
            Value::Array(items) => items.iter().any(|inner| self.matches_value(inner)),
            _ => value_text(value).to_lowercase().contains(&self.needle),
        }
    }

    pub fn filter<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}
