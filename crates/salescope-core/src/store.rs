//! The record store seam between the analytics reducers and persistence.

pub mod memory;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::buckets::PriceBucket;
use crate::interval::MonthInterval;
use crate::records::{NewSaleRecord, SaleRecord};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("record store returned an unexpected value: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn unavailable<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unavailable(Box::new(error))
    }
}

/// Number of interval records whose price falls into `bucket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketCount {
    pub bucket: PriceBucket,
    pub count: i64,
}

/// Number of interval records carrying `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

/// Durable collection of sale records.
///
/// Interval queries only match records whose `date_of_sale` is present and
/// inside `[interval.start(), interval.end())`. Group counts only contain
/// keys that actually occur; callers fill in absent keys themselves.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Cheap liveness probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Every stored record, ordered by id.
    async fn list_all(&self) -> Result<Vec<SaleRecord>, StoreError>;

    /// Records in `interval`, optionally restricted to one `sold` state.
    async fn find_by_date_range(
        &self,
        interval: MonthInterval,
        sold: Option<bool>,
    ) -> Result<Vec<SaleRecord>, StoreError>;

    async fn count_by_price_bucket(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<BucketCount>, StoreError>;

    async fn count_by_category(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<CategoryCount>, StoreError>;

    /// Delete every stored record and insert `records` in their place.
    ///
    /// Returns the number of records inserted.
    async fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<u64, StoreError>;
}
