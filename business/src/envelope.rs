//! The single deserialisation boundary for backend responses.
//!
//! Endpoints answer in several shapes:
//! - a bare array: `[{...}, ...]`
//! - `{ "success": true, "data": [...] }`
//! - `{ "success": true, "data": { "data": [...] } }`
//! - `{ "success": true, "invoices": [...] }`
//! - `{ "success": false, "message": "..." }`
//!
//! [`decode_collection`] and [`decode_record`] accept all of them and hand back
//! [`Record`]s or an [`ApiError`].

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ApiError, ApiResult};
use crate::record::Record;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<Value>),
    Wrapped(Envelope),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl Envelope {
    fn failure(&self) -> Option<ApiError> {
        (self.success == Some(false)).then(|| {
            ApiError::Envelope(
                self.message
                    .clone()
                    .unwrap_or_else(|| "backend reported failure".to_owned()),
            )
        })
    }

    fn collection(self, collection_key: Option<&str>) -> ApiResult<Vec<Value>> {
        if let Some(err) = self.failure() {
            return Err(err);
        }

        match self.data {
            Some(Value::Array(items)) => return Ok(items),
            Some(Value::Object(mut inner)) => {
                if let Some(Value::Array(items)) = inner.remove("data") {
                    return Ok(items);
                }
                if let Some(key) = collection_key
                    && let Some(Value::Array(items)) = inner.remove(key)
                {
                    return Ok(items);
                }
            }
            _ => {}
        }

        let mut rest = self.rest;
        if let Some(key) = collection_key {
            return match rest.remove(key) {
                Some(Value::Array(items)) => Ok(items),
                _ => Err(ApiError::Envelope(format!("no `{key}` array in response"))),
            };
        }

        let mut arrays = rest.into_iter().filter_map(|(_, value)| match value {
            Value::Array(items) => Some(items),
            _ => None,
        });
        match (arrays.next(), arrays.next()) {
            (Some(items), None) => Ok(items),
            (None, _) => Err(ApiError::Envelope("no collection in response".to_owned())),
            (Some(_), Some(_)) => Err(ApiError::Envelope(
                "ambiguous response: more than one array field".to_owned(),
            )),
        }
    }
}

fn into_records(items: Vec<Value>) -> ApiResult<Vec<Record>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::from_value(item)
                .ok_or_else(|| ApiError::Envelope(format!("item {index} is not an object")))
        })
        .collect()
}

/// Decodes a list response into rows.
///
/// `collection_key` names the array field of `{ success, <key>: [...] }` envelopes.
/// Without it, a single array field is accepted.
pub fn decode_collection(body: &[u8], collection_key: Option<&str>) -> ApiResult<Vec<Record>> {
    match serde_json::from_slice::<Payload>(body)? {
        Payload::Bare(items) => into_records(items),
        Payload::Wrapped(envelope) => into_records(envelope.collection(collection_key)?),
    }
}

/// Decodes a create/update response into the saved row, if the backend sent one.
///
/// An empty body or an envelope without a record (`{ "success": true }`) is `Ok(None)`.
pub fn decode_record(body: &[u8], record_key: Option<&str>) -> ApiResult<Option<Record>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let Value::Object(mut object) = serde_json::from_slice::<Value>(body)? else {
        return Err(ApiError::Envelope("expected a JSON object".to_owned()));
    };

    if object.get("success") == Some(&Value::Bool(false)) {
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("backend reported failure")
            .to_owned();
        return Err(ApiError::Envelope(message));
    }

    if let Some(Value::Object(mut data)) = object.remove("data") {
        if let Some(Value::Object(inner)) = data.remove("data") {
            return Ok(Some(Record::new(inner)));
        }
        return Ok(Some(Record::new(data)));
    }

    if let Some(key) = record_key
        && let Some(Value::Object(inner)) = object.remove(key)
    {
        return Ok(Some(Record::new(inner)));
    }

    if object.contains_key("success") {
        return Ok(None);
    }

    Ok(Some(Record::new(object)))
}

/// Best-effort error text from a failed response body.
pub fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn bytes(value: Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.id().map(|id| id.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn bare_array() {
        let rows = decode_collection(&bytes(json!([{ "id": 1 }, { "id": 2 }])), None).unwrap();
        assert_eq!(ids(&rows), ["1", "2"]);
    }

    #[test]
    fn success_data_array() {
        let body = bytes(json!({ "success": true, "data": [{ "id": "a" }] }));
        assert_eq!(ids(&decode_collection(&body, None).unwrap()), ["a"]);
    }

    #[test]
    fn nested_data_data() {
        let body = bytes(json!({ "success": true, "data": { "data": [{ "id": "n" }], "total": 1 } }));
        assert_eq!(ids(&decode_collection(&body, None).unwrap()), ["n"]);
    }

    #[test]
    fn named_collection_key() {
        let body = bytes(json!({ "success": true, "invoices": [{ "id": 7 }], "count": 1 }));
        assert_eq!(ids(&decode_collection(&body, Some("invoices")).unwrap()), ["7"]);
        // A lone array is found without a key too.
        assert_eq!(ids(&decode_collection(&body, None).unwrap()), ["7"]);
    }

    #[test]
    fn wrong_collection_key_is_an_error() {
        let body = bytes(json!({ "success": true, "tasks": [] }));
        assert!(matches!(
            decode_collection(&body, Some("invoices")),
            Err(ApiError::Envelope(_))
        ));
    }

    #[test]
    fn ambiguous_arrays_are_rejected() {
        let body = bytes(json!({ "notes": [], "files": [] }));
        assert!(matches!(decode_collection(&body, None), Err(ApiError::Envelope(_))));
    }

    #[test]
    fn failure_envelope_carries_message() {
        let body = bytes(json!({ "success": false, "message": "not allowed" }));
        let err = decode_collection(&body, None).unwrap_err();
        assert_eq!(err.to_string(), "unexpected response shape: not allowed");
    }

    #[test]
    fn non_object_items_are_rejected() {
        let body = bytes(json!([{ "id": 1 }, 2]));
        assert!(matches!(decode_collection(&body, None), Err(ApiError::Envelope(_))));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        assert!(matches!(decode_collection(b"{not json", None), Err(ApiError::Decode(_))));
    }

    #[test]
    fn empty_array_is_empty_collection() {
        assert!(decode_collection(b"[]", None).unwrap().is_empty());
        let body = bytes(json!({ "success": true, "data": [] }));
        assert!(decode_collection(&body, None).unwrap().is_empty());
    }

    #[test]
    fn record_shapes() {
        let plain = decode_record(&bytes(json!({ "id": 1, "name": "x" })), None).unwrap();
        assert_eq!(plain.unwrap().field_text("name"), "x");

        let wrapped = decode_record(&bytes(json!({ "success": true, "data": { "id": 2 } })), None);
        assert_eq!(wrapped.unwrap().unwrap().id().unwrap().as_str(), "2");

        let keyed =
            decode_record(&bytes(json!({ "success": true, "invoice": { "id": 3 } })), Some("invoice"));
        assert_eq!(keyed.unwrap().unwrap().id().unwrap().as_str(), "3");

        let bare_ack = decode_record(&bytes(json!({ "success": true, "message": "ok" })), None);
        assert!(bare_ack.unwrap().is_none());

        assert!(decode_record(b"", None).unwrap().is_none());
        assert!(decode_record(b"  \n", None).unwrap().is_none());
    }

    #[test]
    fn record_failure_envelope() {
        let body = bytes(json!({ "success": false, "message": "duplicate" }));
        assert!(matches!(decode_record(&body, None), Err(ApiError::Envelope(m)) if m == "duplicate"));
    }

    #[test]
    fn error_message_reads_message_or_error() {
        assert_eq!(error_message(br#"{"message":"nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message(br#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(error_message(b"<html>"), None);
    }
}
