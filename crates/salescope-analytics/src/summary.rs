//! Sales totals for one month.

use rust_decimal::Decimal;
use salescope_core::{MonthInterval, RecordStore};
use serde::Serialize;

use crate::{AnalyticsError, MonthQuery};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    /// Sum of `price` over sold records only.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_sales: Decimal,
    pub total_sold_items: i64,
    pub total_not_sold_items: i64,
}

/// Sales summary for `query`.
///
/// Unlike the histogram and category reducers this never substitutes a
/// default: missing or malformed parameters and store failures are returned.
///
/// # Errors
///
/// Returns [`AnalyticsError::MissingParameters`], [`AnalyticsError::Interval`]
/// or [`AnalyticsError::Store`].
pub async fn sales_summary(
    store: &dyn RecordStore,
    query: &MonthQuery,
) -> Result<SalesSummary, AnalyticsError> {
    let interval = query.resolve()?;
    summarize(store, interval).await
}

/// Sales summary for an already-resolved interval.
///
/// Reads the interval once and partitions by `sold` locally, so both totals
/// come from the same snapshot of the store.
///
/// # Errors
///
/// Returns [`AnalyticsError::Store`] if the store read fails.
pub async fn summarize(
    store: &dyn RecordStore,
    interval: MonthInterval,
) -> Result<SalesSummary, AnalyticsError> {
    let records = store.find_by_date_range(interval, None).await?;

    let summary = records
        .iter()
        .fold(SalesSummary::default(), |mut acc, record| {
            if record.sold {
                acc.total_sales += record.price;
                acc.total_sold_items += 1;
            } else {
                acc.total_not_sold_items += 1;
            }
            acc
        });

    tracing::debug!(
        start = %interval.start(),
        matched = records.len(),
        sold = summary.total_sold_items,
        "sales summary computed"
    );
    Ok(summary)
}
