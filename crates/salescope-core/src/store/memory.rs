//! In-process [`RecordStore`] backed by a `Vec`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::buckets::PriceBucket;
use crate::interval::MonthInterval;
use crate::records::{NewSaleRecord, SaleRecord};

use super::{BucketCount, CategoryCount, RecordStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    records: Vec<SaleRecord>,
    next_id: i64,
}

/// Record store kept entirely in memory.
///
/// `replace_all` swaps the collection under a single write lock, so readers
/// never observe a half-replaced collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with already-persisted records, including ones
    /// with a missing `date_of_sale`.
    #[must_use]
    pub fn with_records(records: Vec<SaleRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0);
        Self {
            inner: RwLock::new(Inner { records, next_id }),
        }
    }

    async fn in_interval(&self, interval: MonthInterval) -> Vec<SaleRecord> {
        let inner = self.inner.read().await;
        inner
            .records
            .iter()
            .filter(|r| r.date_of_sale.is_some_and(|ts| interval.contains(ts)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<SaleRecord>, StoreError> {
        Ok(self.inner.read().await.records.clone())
    }

    async fn find_by_date_range(
        &self,
        interval: MonthInterval,
        sold: Option<bool>,
    ) -> Result<Vec<SaleRecord>, StoreError> {
        let mut records = self.in_interval(interval).await;
        if let Some(sold) = sold {
            records.retain(|r| r.sold == sold);
        }
        Ok(records)
    }

    async fn count_by_price_bucket(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<BucketCount>, StoreError> {
        let mut counts: BTreeMap<PriceBucket, i64> = BTreeMap::new();
        for record in self.in_interval(interval).await {
            *counts.entry(PriceBucket::for_price(record.price)).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(bucket, count)| BucketCount { bucket, count })
            .collect())
    }

    async fn count_by_category(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<CategoryCount>, StoreError> {
        let mut counts: BTreeMap<String, i64> = BTreeMap::new();
        for record in self.in_interval(interval).await {
            *counts.entry(record.category).or_default() += 1;
        }
        Ok(counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect())
    }

    async fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let mut next_id = inner.next_id;
        let replaced: Vec<SaleRecord> = records
            .into_iter()
            .map(|r| {
                next_id += 1;
                SaleRecord {
                    id: next_id,
                    title: r.title,
                    description: r.description,
                    price: r.price,
                    category: r.category,
                    date_of_sale: Some(r.date_of_sale),
                    sold: r.sold,
                    image: r.image,
                }
            })
            .collect();
        let inserted = u64::try_from(replaced.len())
            .map_err(|_| StoreError::Corrupt("batch too large".to_string()))?;
        inner.records = replaced;
        inner.next_id = next_id;
        Ok(inserted)
    }
}
