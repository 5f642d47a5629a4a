//! Edit/create form drafts built from a resource's form schema.

use chrono::NaiveDate;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use ustr::Ustr;

use crate::record::{Record, value_text};
use crate::schema::{FieldKind, FormField, ResourceSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    fn empty_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Checkbox => Self::Flag(false),
            _ => Self::Text(String::new()),
        }
    }

    fn from_json(kind: &FieldKind, value: &Value) -> Self {
        match kind {
            FieldKind::Checkbox => Self::Flag(match value {
                Value::Bool(flag) => *flag,
                Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
                Value::String(text) => matches!(text.as_str(), "true" | "1" | "yes"),
                _ => false,
            }),
            // Backends often send full timestamps for date fields.
            FieldKind::Date => {
                let mut text = value_text(value);
                if text.len() > 10 && text.is_char_boundary(10) {
                    text.truncate(10);
                }
                Self::Text(text)
            }
            _ => Self::Text(value_text(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub key: Ustr,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summary(&.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.key.as_str() == key)
            .map(|error| error.message.as_str())
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}: {}", error.key, error.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Editable values for one record, in form order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    resource: Ustr,
    record_id: Option<Ustr>,
    /// Key and raw value of the edited row's id.
    identity: Option<(&'static str, Value)>,
    entries: Vec<(FormField, FieldValue)>,
}

impl FormDraft {
    /// A blank draft for creating a record.
    pub fn empty(schema: &ResourceSchema) -> Self {
        Self {
            resource: schema.name,
            record_id: None,
            identity: None,
            entries: schema
                .form
                .iter()
                .map(|field| (field.clone(), FieldValue::empty_for(&field.kind)))
                .collect(),
        }
    }

    /// A draft pre-filled from an existing record.
    pub fn from_record(schema: &ResourceSchema, record: &Record) -> Self {
        Self {
            resource: schema.name,
            record_id: record.id(),
            identity: record
                .identity()
                .map(|(key, value)| (key, value.clone())),
            entries: schema
                .form
                .iter()
                .map(|field| {
                    let value = match record.get(&field.key) {
                        Some(v) => FieldValue::from_json(&field.kind, v),
                        None => FieldValue::empty_for(&field.kind),
                    };
                    (field.clone(), value)
                })
                .collect(),
        }
    }

    pub fn resource(&self) -> Ustr {
        self.resource
    }

    pub fn record_id(&self) -> Option<Ustr> {
        self.record_id
    }

    pub fn identity(&self) -> Option<(&'static str, &Value)> {
        self.identity.as_ref().map(|(key, value)| (*key, value))
    }

    pub fn is_new(&self) -> bool {
        self.record_id.is_none()
    }

    pub fn entries(&self) -> &[(FormField, FieldValue)] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = (&FormField, &mut FieldValue)> {
        self.entries.iter_mut().map(|(field, value)| (&*field, value))
    }

    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(field, _)| field.key.as_str() == key)
            .map(|(_, value)| value)
    }

    /// Sets a text-like field. Ignored for unknown keys.
    pub fn set_text(&mut self, key: &str, text: impl Into<String>) {
        if let Some((_, value)) = self.entries.iter_mut().find(|(f, _)| f.key.as_str() == key) {
            *value = FieldValue::Text(text.into());
        }
    }

    pub fn set_flag(&mut self, key: &str, flag: bool) {
        if let Some((_, value)) = self.entries.iter_mut().find(|(f, _)| f.key.as_str() == key) {
            *value = FieldValue::Flag(flag);
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = self
            .entries
            .iter()
            .filter_map(|(field, value)| {
                check(field, value).err().map(|message| FieldError {
                    key: field.key,
                    message,
                })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Request body for POST/PUT. Validates first.
    pub fn to_json(&self) -> Result<Value, ValidationErrors> {
        self.validate()?;

        let mut body = Map::new();
        for (field, value) in &self.entries {
            body.insert(field.key.to_string(), json_value(&field.kind, value));
        }
        Ok(Value::Object(body))
    }
}

fn check(field: &FormField, value: &FieldValue) -> Result<(), String> {
    let text = match value {
        FieldValue::Flag(_) => return Ok(()),
        FieldValue::Text(text) => text.trim(),
    };

    if text.is_empty() {
        return if field.required {
            Err("is required".to_owned())
        } else {
            Ok(())
        };
    }

    match &field.kind {
        FieldKind::Number => text
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|_| ())
            .ok_or_else(|| "must be a number".to_owned()),
        FieldKind::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_err| "must be a date (YYYY-MM-DD)".to_owned()),
        FieldKind::Email => {
            let valid = text
                .split_once('@')
                .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
            if valid {
                Ok(())
            } else {
                Err("must be an email address".to_owned())
            }
        }
        FieldKind::Select(options) => {
            if options.iter().any(|option| option.as_str() == text) {
                Ok(())
            } else {
                let choices: Vec<&str> = options.iter().map(Ustr::as_str).collect();
                Err(format!("must be one of: {}", choices.join(", ")))
            }
        }
        FieldKind::Text | FieldKind::Textarea | FieldKind::Checkbox | FieldKind::File => Ok(()),
    }
}

fn json_value(kind: &FieldKind, value: &FieldValue) -> Value {
    let text = match value {
        FieldValue::Flag(flag) => return Value::Bool(*flag),
        FieldValue::Text(text) => text.trim(),
    };

    if text.is_empty() {
        return Value::Null;
    }

    match kind {
        FieldKind::Number => text
            .parse::<i64>()
            .map(Value::from)
            .ok()
            .or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            })
            .unwrap_or(Value::Null),
        FieldKind::File => {
            // Only the file's name is sent; uploads go through a separate channel.
            let name = text.rsplit(['/', '\\']).next().unwrap_or(text);
            Value::String(name.to_owned())
        }
        _ => Value::String(text.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog;

    fn invoices() -> &'static ResourceSchema {
        catalog::find("invoices").unwrap()
    }

    #[test]
    fn empty_draft_is_new_and_blank() {
        let draft = FormDraft::empty(invoices());
        assert!(draft.is_new());
        assert_eq!(draft.value("amount"), Some(&FieldValue::Text(String::new())));
        assert_eq!(draft.value("recurring"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn from_record_fills_values() {
        let record = Record::from_value(json!({
            "_id": "inv-9",
            "invoice_number": "INV-009",
            "amount": 99.5,
            "issue_date": "2024-05-01T00:00:00.000Z",
            "recurring": true,
        }))
        .unwrap();

        let draft = FormDraft::from_record(invoices(), &record);
        assert_eq!(draft.record_id().unwrap().as_str(), "inv-9");
        assert_eq!(draft.identity(), Some(("_id", &json!("inv-9"))));
        assert_eq!(draft.value("amount"), Some(&FieldValue::Text("99.5".to_owned())));
        assert_eq!(
            draft.value("issue_date"),
            Some(&FieldValue::Text("2024-05-01".to_owned()))
        );
        assert_eq!(draft.value("recurring"), Some(&FieldValue::Flag(true)));
    }

    #[test]
    fn required_fields_are_reported() {
        let err = FormDraft::empty(invoices()).validate().unwrap_err();
        assert_eq!(err.for_field("invoice_number"), Some("is required"));
        assert_eq!(err.for_field("amount"), Some("is required"));
        assert_eq!(err.for_field("due_date"), None);
    }

    #[test]
    fn typed_fields_are_checked() {
        let mut draft = FormDraft::empty(invoices());
        draft.set_text("invoice_number", "INV-1");
        draft.set_text("amount", "ten");
        draft.set_text("issue_date", "09/03/2024");
        draft.set_text("status", "lost");

        let err = draft.validate().unwrap_err();
        assert_eq!(err.for_field("amount"), Some("must be a number"));
        assert_eq!(err.for_field("issue_date"), Some("must be a date (YYYY-MM-DD)"));
        assert!(err.for_field("status").unwrap().starts_with("must be one of"));
        assert!(err.to_string().contains("amount: must be a number"));
    }

    #[test]
    fn email_fields_need_at_and_domain() {
        let mut draft = FormDraft::empty(catalog::find("contacts").unwrap());
        draft.set_text("name", "Ada");
        draft.set_text("email", "ada");
        assert!(draft.validate().is_err());

        draft.set_text("email", "ada@example.com");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn to_json_types_values() {
        let mut draft = FormDraft::empty(invoices());
        draft.set_text("invoice_number", " INV-2 ");
        draft.set_text("amount", "1200");
        draft.set_text("issue_date", "2024-03-09");
        draft.set_text("status", "paid");
        draft.set_flag("recurring", true);

        assert_eq!(
            draft.to_json().unwrap(),
            json!({
                "invoice_number": "INV-2",
                "amount": 1200,
                "issue_date": "2024-03-09",
                "due_date": null,
                "status": "paid",
                "recurring": true,
            })
        );
    }

    #[test]
    fn file_fields_send_the_name() {
        let mut draft = FormDraft::empty(catalog::find("files").unwrap());
        draft.set_text("name", "Contract scan");
        draft.set_text("file", "/home/ada/scans/contract.pdf");
        let body = draft.to_json().unwrap();
        assert_eq!(body["file"], json!("contract.pdf"));
    }
}
