use axum::{extract::State, Extension, Json};
use salescope_core::SaleRecord;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

/// Every stored record, unfiltered.
pub(super) async fn list_transactions(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<Vec<SaleRecord>>>, ApiError> {
    let records = state
        .store
        .list_all()
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(records, req_id.0)))
}
