use axum::{extract::State, Extension, Json};
use salescope_catalog::{seed_from_catalog, CatalogError, SeedError};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct SeedResult {
    inserted: u64,
}

/// Replace the whole store with a fresh copy of the catalog.
pub(super) async fn seed(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SeedResult>>, ApiError> {
    let inserted = seed_from_catalog(&state.catalog, &state.catalog_url, state.store.as_ref())
        .await
        .map_err(|e| map_seed_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(SeedResult { inserted }, req_id.0)))
}

fn map_seed_error(request_id: String, error: &SeedError) -> ApiError {
    match error {
        SeedError::Catalog(CatalogError::MalformedPayload { .. }) => {
            tracing::warn!(error = %error, "catalog payload rejected");
            ApiError::new(request_id, "bad_request", "catalog payload is not an array")
        }
        SeedError::Catalog(e) => {
            tracing::error!(error = %e, "catalog fetch failed");
            ApiError::new(request_id, "upstream_error", "catalog fetch failed")
        }
        SeedError::Invalid(e) => {
            tracing::warn!(error = %e, "catalog record rejected");
            ApiError::new(request_id, "validation_error", e.to_string())
        }
        SeedError::Store(e) => map_store_error(request_id, e),
    }
}
