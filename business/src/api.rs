//! REST calls for resource collections.
//!
//! All functions are async and platform-neutral (see [`crate::http`]). They attach
//! the bearer token from [`BusinessConfig`] when one is configured and map every
//! failure into an [`ApiError`]; callers turn those into compute updates.

use serde_json::Value;

use crate::config::BusinessConfig;
use crate::envelope::{decode_collection, decode_record, error_message};
use crate::error::{ApiError, ApiResult};
use crate::http::{Client, RequestBuilder, Response};
use crate::record::Record;
use crate::schema::{PathParams, ResourceSchema};

fn authorized(config: &BusinessConfig, request: RequestBuilder) -> RequestBuilder {
    request
        .header("accept", "application/json")
        .bearer_auth(config.auth_token.as_deref())
}

fn ensure_success(response: &Response) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }
    let message = error_message(&response.body).unwrap_or_else(|| {
        let text = response.text();
        let text = text.trim();
        if text.is_empty() || text.len() > 200 {
            format!("HTTP {}", response.status)
        } else {
            text.to_owned()
        }
    });
    Err(ApiError::Status {
        status: response.status,
        message,
    })
}

/// GET `{base}{path}`
pub async fn list_records(
    config: &BusinessConfig,
    schema: &ResourceSchema,
    params: &PathParams,
) -> ApiResult<Vec<Record>> {
    let url = config.url(&schema.endpoint.resolve(params)?);
    let response = authorized(config, Client::get(url)).send().await?;
    ensure_success(&response)?;
    let records = decode_collection(&response.body, schema.endpoint.collection_key)?;
    log::debug!("{}: fetched {} records", schema.name, records.len());
    Ok(records)
}

/// POST `{base}{path}`
///
/// Returns the created record when the backend echoes it.
pub async fn create_record(
    config: &BusinessConfig,
    schema: &ResourceSchema,
    params: &PathParams,
    body: &Value,
) -> ApiResult<Option<Record>> {
    schema.ensure_writable()?;
    let url = config.url(&schema.endpoint.resolve(params)?);
    let response = authorized(config, Client::post(url)).json(body)?.send().await?;
    ensure_success(&response)?;
    decode_record(&response.body, schema.endpoint.record_key)
}

/// PUT `{base}{path}/{id}`
pub async fn update_record(
    config: &BusinessConfig,
    schema: &ResourceSchema,
    params: &PathParams,
    id: &str,
    body: &Value,
) -> ApiResult<Option<Record>> {
    schema.ensure_writable()?;
    let url = config.url(&schema.endpoint.resolve_record(params, id)?);
    let response = authorized(config, Client::put(url)).json(body)?.send().await?;
    ensure_success(&response)?;
    decode_record(&response.body, schema.endpoint.record_key)
}

/// DELETE `{base}{path}/{id}`
pub async fn delete_record(
    config: &BusinessConfig,
    schema: &ResourceSchema,
    params: &PathParams,
    id: &str,
) -> ApiResult<()> {
    schema.ensure_writable()?;
    let url = config.url(&schema.endpoint.resolve_record(params, id)?);
    let response = authorized(config, Client::delete(url)).send().await?;
    ensure_success(&response)?;

    // `{ "success": false }` with a 200 still means the row is there.
    if let Ok(body) = response.json::<Value>()
        && body.get("success") == Some(&Value::Bool(false))
    {
        let message = error_message(&response.body)
            .unwrap_or_else(|| "backend reported failure".to_owned());
        return Err(ApiError::Envelope(message));
    }
    Ok(())
}
