//! Per-category record counts for one month.

use salescope_core::{CategoryCount, MonthInterval, RecordStore};

use crate::{AnalyticsError, MonthQuery};

/// Category breakdown for `query`, one entry per category observed in the
/// month, in store order.
///
/// Absent month or year short-circuits to an empty list without touching the
/// store.
///
/// # Errors
///
/// Returns [`AnalyticsError::Interval`] for malformed parameters or
/// [`AnalyticsError::Store`] if the store read fails.
pub async fn category_breakdown(
    store: &dyn RecordStore,
    query: &MonthQuery,
) -> Result<Vec<CategoryCount>, AnalyticsError> {
    if query.parts().is_none() {
        return Ok(Vec::new());
    }
    let interval = query.resolve()?;
    categories_for(store, interval).await
}

/// Like [`category_breakdown`], but any failure degrades to an empty list.
pub async fn category_breakdown_or_empty(
    store: &dyn RecordStore,
    query: &MonthQuery,
) -> Vec<CategoryCount> {
    category_breakdown(store, query).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "category breakdown failed; returning empty list");
        Vec::new()
    })
}

/// Category breakdown for an already-resolved interval.
///
/// # Errors
///
/// Returns [`AnalyticsError::Store`] if the store read fails.
pub async fn categories_for(
    store: &dyn RecordStore,
    interval: MonthInterval,
) -> Result<Vec<CategoryCount>, AnalyticsError> {
    Ok(store.count_by_category(interval).await?)
}
