//! Backend rows.
//!
//! The backend returns loosely shaped JSON objects that differ per entity, so a
//! row is kept as its JSON map. Columns address fields by key, with dotted keys
//! (`client.name`) reaching into nested objects.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ustr::Ustr;

/// Keys tried, in order, when looking for a row's identity.
pub const ID_KEYS: [&str; 2] = ["id", "_id"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// `None` unless `value` is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Identity from `id` or `_id`. Numeric ids are rendered as text.
    pub fn id(&self) -> Option<Ustr> {
        self.identity().map(|(_, value)| match value {
            Value::String(id) => Ustr::from(id),
            other => Ustr::from(&other.to_string()),
        })
    }

    /// Key and raw value the identity was read from.
    pub fn identity(&self) -> Option<(&'static str, &Value)> {
        ID_KEYS.iter().find_map(|key| match self.0.get(*key) {
            Some(value @ Value::String(id)) if !id.is_empty() => Some((*key, value)),
            Some(value @ Value::Number(_)) => Some((*key, value)),
            _ => None,
        })
    }

    pub fn has_id(&self, id: &str) -> bool {
        self.id().is_some_and(|own| own.as_str() == id)
    }

    /// Field lookup; `a.b.c` walks nested objects.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if let Some(value) = self.0.get(key) {
            return Some(value);
        }
        let mut parts = key.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Display text for a field; missing fields are empty.
    pub fn field_text(&self, key: &str) -> String {
        self.get(key).map(value_text).unwrap_or_default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Overwrites fields with those present in `other`.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Every top-level value, in field order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.0.values()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// String form of a JSON value as shown in a cell.
///
/// Strings are verbatim, `null` is empty, scalars use their JSON display and
/// containers are compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn id_prefers_id_then_underscore_id() {
        assert_eq!(record(json!({ "id": "a1", "_id": "b2" })).id(), Some(Ustr::from("a1")));
        assert_eq!(record(json!({ "_id": "b2" })).id(), Some(Ustr::from("b2")));
        assert_eq!(record(json!({ "id": 42 })).id(), Some(Ustr::from("42")));
        assert_eq!(record(json!({ "id": "" })).id(), None);
        assert_eq!(record(json!({ "name": "x" })).id(), None);
    }

    #[test]
    fn identity_keeps_key_and_raw_value() {
        let row = record(json!({ "_id": 7, "name": "x" }));
        assert_eq!(row.identity(), Some(("_id", &json!(7))));
        assert_eq!(record(json!({ "name": "x" })).identity(), None);
    }

    #[test]
    fn field_text_stringifies_scalars() {
        let row = record(json!({
            "title": "Retainer",
            "amount": 1250.5,
            "paid": false,
            "note": null,
            "tags": ["a", "b"],
        }));

        assert_eq!(row.field_text("title"), "Retainer");
        assert_eq!(row.field_text("amount"), "1250.5");
        assert_eq!(row.field_text("paid"), "false");
        assert_eq!(row.field_text("note"), "");
        assert_eq!(row.field_text("tags"), r#"["a","b"]"#);
        assert_eq!(row.field_text("missing"), "");
    }

    #[test]
    fn dotted_keys_reach_nested_objects() {
        let row = record(json!({ "client": { "name": "Acme", "address": { "city": "Oslo" } } }));
        assert_eq!(row.field_text("client.name"), "Acme");
        assert_eq!(row.field_text("client.address.city"), "Oslo");
        assert_eq!(row.field_text("client.phone"), "");
    }

    #[test]
    fn literal_dotted_key_wins_over_path() {
        let row = record(json!({ "client.name": "flat", "client": { "name": "nested" } }));
        assert_eq!(row.field_text("client.name"), "flat");
    }

    #[test]
    fn merge_overwrites_and_keeps_untouched_fields() {
        let mut row = record(json!({ "id": 1, "status": "draft", "total": 10 }));
        row.merge(record(json!({ "status": "sent" })));
        assert_eq!(row.field_text("status"), "sent");
        assert_eq!(row.field_text("total"), "10");
    }

    #[test]
    fn non_objects_are_not_records() {
        assert!(Record::from_value(json!([1, 2])).is_none());
        assert!(Record::from_value(json!("text")).is_none());
    }
}
