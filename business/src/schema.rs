//! Declarative description of one business entity: columns, form and endpoint.

use std::collections::BTreeMap;

use ustr::Ustr;

use crate::error::{ApiError, ApiResult};

/// Values for `{placeholder}` segments of an endpoint path.
pub type PathParams = BTreeMap<String, String>;

/// Key of the synthetic actions column. Never exported or printed.
pub const ACTIONS_COLUMN: &str = "actions";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub key: Ustr,
    pub label: Ustr,
}

impl Column {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: Ustr::from(key),
            label: Ustr::from(label),
        }
    }

    pub fn is_actions(&self) -> bool {
        self.key.as_str() == ACTIONS_COLUMN
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Email,
    /// `YYYY-MM-DD`.
    Date,
    Checkbox,
    Select(Vec<Ustr>),
    /// Sent as the chosen file's name.
    File,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: Ustr,
    pub label: Ustr,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: Ustr::from(key),
            label: Ustr::from(label),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Where a resource lives on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Relative path, may contain `{name}` placeholders (e.g. `/notifications/{user_id}`).
    pub path: &'static str,
    /// Array field of `{ success, <key>: [...] }` list responses.
    pub collection_key: Option<&'static str>,
    /// Object field of `{ success, <key>: {...} }` save responses.
    pub record_key: Option<&'static str>,
}

impl EndpointDescriptor {
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            collection_key: None,
            record_key: None,
        }
    }

    pub const fn keyed(
        path: &'static str,
        collection_key: &'static str,
        record_key: &'static str,
    ) -> Self {
        Self {
            path,
            collection_key: Some(collection_key),
            record_key: Some(record_key),
        }
    }

    /// Names of the `{placeholder}` segments, in order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.path
            .split('/')
            .filter_map(|segment| segment.strip_prefix('{')?.strip_suffix('}'))
            .collect()
    }

    /// Substitutes every placeholder. Values are percent-encoded.
    pub fn resolve(&self, params: &PathParams) -> ApiResult<String> {
        let segments = self
            .path
            .split('/')
            .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => params
                    .get(name)
                    .filter(|value| !value.is_empty())
                    .map(|value| urlencoding::encode(value).into_owned())
                    .ok_or_else(|| ApiError::MissingPathParam(name.to_owned())),
                None => Ok(segment.to_owned()),
            })
            .collect::<ApiResult<Vec<_>>>()?;
        Ok(segments.join("/"))
    }

    /// Path of a single record, `{path}/{id}`.
    pub fn resolve_record(&self, params: &PathParams, id: &str) -> ApiResult<String> {
        Ok(format!("{}/{}", self.resolve(params)?, urlencoding::encode(id)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Stable identifier, also used for export file names (`invoices`).
    pub name: Ustr,
    pub title: Ustr,
    pub endpoint: EndpointDescriptor,
    pub columns: Vec<Column>,
    pub form: Vec<FormField>,
    /// Read-only resources have no edit/delete/create actions.
    pub read_only: bool,
}

impl ResourceSchema {
    pub fn column_keys(&self) -> impl Iterator<Item = Ustr> + '_ {
        self.columns.iter().map(|column| column.key)
    }

    /// Data columns, without the actions column.
    pub fn data_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| !column.is_actions())
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.form.iter().find(|field| field.key.as_str() == key)
    }

    pub fn ensure_writable(&self) -> ApiResult<()> {
        if self.read_only {
            return Err(ApiError::ReadOnly(self.name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_path_resolves_unchanged() {
        let endpoint = EndpointDescriptor::new("/invoices");
        assert_eq!(endpoint.resolve(&PathParams::new()).unwrap(), "/invoices");
        assert!(endpoint.placeholders().is_empty());
    }

    #[test]
    fn placeholders_are_substituted() {
        let endpoint = EndpointDescriptor::new("/messages/user/{user_id}");
        assert_eq!(endpoint.placeholders(), ["user_id"]);

        let params = PathParams::from([("user_id".to_owned(), "u 7".to_owned())]);
        assert_eq!(endpoint.resolve(&params).unwrap(), "/messages/user/u%207");
    }

    #[test]
    fn missing_or_empty_param_is_an_error() {
        let endpoint = EndpointDescriptor::new("/notifications/{user_id}");
        let err = endpoint.resolve(&PathParams::new()).unwrap_err();
        assert!(matches!(err, ApiError::MissingPathParam(name) if name == "user_id"));

        let empty = PathParams::from([("user_id".to_owned(), String::new())]);
        assert!(endpoint.resolve(&empty).is_err());
    }

    #[test]
    fn record_path_appends_encoded_id() {
        let endpoint = EndpointDescriptor::new("/tasks");
        assert_eq!(
            endpoint.resolve_record(&PathParams::new(), "a/b").unwrap(),
            "/tasks/a%2Fb"
        );
    }

    #[test]
    fn non_ascii_ids_are_utf8_encoded() {
        let endpoint = EndpointDescriptor::new("/notes");
        assert_eq!(
            endpoint.resolve_record(&PathParams::new(), "café?").unwrap(),
            "/notes/caf%C3%A9%3F"
        );
    }
}
