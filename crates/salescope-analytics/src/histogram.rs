//! Price-range histogram for one month.

use salescope_core::{MonthInterval, PriceBucket, RecordStore};
use serde::Serialize;

use crate::{AnalyticsError, MonthQuery};

/// Record counts per [`PriceBucket`], always six slots in bucket order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceHistogram([i64; PriceBucket::COUNT]);

impl PriceHistogram {
    #[must_use]
    pub fn counts(&self) -> &[i64; PriceBucket::COUNT] {
        &self.0
    }

    #[must_use]
    pub fn count(&self, bucket: PriceBucket) -> i64 {
        self.0[bucket.index()]
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        self.0.iter().sum()
    }

    /// `(label, count)` pairs in bucket order.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        PriceBucket::ALL
            .into_iter()
            .map(|bucket| (bucket.label(), self.count(bucket)))
    }
}

impl From<[i64; PriceBucket::COUNT]> for PriceHistogram {
    fn from(counts: [i64; PriceBucket::COUNT]) -> Self {
        Self(counts)
    }
}

/// Price histogram for `query`.
///
/// Absent month or year short-circuits to an all-zero histogram without
/// touching the store.
///
/// # Errors
///
/// Returns [`AnalyticsError::Interval`] for malformed parameters or
/// [`AnalyticsError::Store`] if the store read fails.
pub async fn price_histogram(
    store: &dyn RecordStore,
    query: &MonthQuery,
) -> Result<PriceHistogram, AnalyticsError> {
    if query.parts().is_none() {
        return Ok(PriceHistogram::default());
    }
    let interval = query.resolve()?;
    histogram_for(store, interval).await
}

/// Like [`price_histogram`], but any failure degrades to all zeros.
pub async fn price_histogram_or_zero(
    store: &dyn RecordStore,
    query: &MonthQuery,
) -> PriceHistogram {
    price_histogram(store, query).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "price histogram failed; returning zeros");
        PriceHistogram::default()
    })
}

/// Price histogram for an already-resolved interval.
///
/// # Errors
///
/// Returns [`AnalyticsError::Store`] if the store read fails.
pub async fn histogram_for(
    store: &dyn RecordStore,
    interval: MonthInterval,
) -> Result<PriceHistogram, AnalyticsError> {
    let mut histogram = PriceHistogram::default();
    for group in store.count_by_price_bucket(interval).await? {
        histogram.0[group.bucket.index()] += group.count;
    }
    Ok(histogram)
}
