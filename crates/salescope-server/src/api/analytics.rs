use axum::{
    extract::{Query, State},
    Extension, Json,
};
use salescope_analytics::{
    category_breakdown_or_empty, combined, price_histogram_or_zero, sales_summary,
    CombinedReport, MonthQuery, PriceHistogram, SalesSummary,
};
use salescope_core::CategoryCount;

use crate::middleware::RequestId;

use super::{map_analytics_error, ApiError, ApiResponse, AppState};

pub(super) async fn statistics(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ApiResponse<SalesSummary>>, ApiError> {
    let summary = sales_summary(state.store.as_ref(), &query)
        .await
        .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(summary, req_id.0)))
}

pub(super) async fn combined_data(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ApiResponse<CombinedReport>>, ApiError> {
    let report = combined(state.store.clone(), query, state.policy)
        .await
        .map_err(|e| map_analytics_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(report, req_id.0)))
}

/// Always 200: failures degrade to an all-zero histogram.
pub(super) async fn price_range_data(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MonthQuery>,
) -> Json<ApiResponse<PriceHistogram>> {
    let histogram = price_histogram_or_zero(state.store.as_ref(), &query).await;
    Json(ApiResponse::new(histogram, req_id.0))
}

/// Always 200: failures degrade to an empty list.
pub(super) async fn category_data(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<MonthQuery>,
) -> Json<ApiResponse<Vec<CategoryCount>>> {
    let categories = category_breakdown_or_empty(state.store.as_ref(), &query).await;
    Json(ApiResponse::new(categories, req_id.0))
}
