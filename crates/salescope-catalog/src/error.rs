use salescope_core::{RecordError, StoreError};
use thiserror::Error;

/// Errors returned by the catalog client.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog host answered with a non-2xx status.
    #[error("catalog at {url} returned HTTP {status}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body parsed as JSON but is not an array of records.
    #[error("catalog payload is not an array (found {found})")]
    MalformedPayload { found: &'static str },
}

/// Errors from a full fetch, validate, replace cycle.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Invalid(#[from] RecordError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
