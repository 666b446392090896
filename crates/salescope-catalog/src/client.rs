//! HTTP client for the third-party catalog dump.
//!
//! The catalog is a single JSON document: a top-level array of sale records.
//! Anything else is surfaced as [`CatalogError::MalformedPayload`].

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::CatalogError;

/// Fetches the raw catalog array.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads `url` and returns its items without validating them.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure.
    /// - [`CatalogError::UnexpectedStatus`] on a non-2xx response.
    /// - [`CatalogError::Deserialize`] if the body is not JSON.
    /// - [`CatalogError::MalformedPayload`] if the JSON is not an array.
    pub async fn fetch_records(&self, url: &str) -> Result<Vec<Value>, CatalogError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let payload: Value =
            serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        match payload {
            Value::Array(items) => {
                tracing::debug!(url, items = items.len(), "catalog fetched");
                Ok(items)
            }
            other => Err(CatalogError::MalformedPayload {
                found: json_kind(&other),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
