//! Shared fixtures for analytics integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use salescope_core::{
    BucketCount, CategoryCount, MemoryStore, MonthInterval, NewSaleRecord, RecordStore,
    SaleRecord, StoreError,
};

pub fn record(
    year: i32,
    month: u32,
    day: u32,
    price: &str,
    sold: bool,
    category: &str,
) -> NewSaleRecord {
    NewSaleRecord {
        title: format!("{category} {price}"),
        description: "fixture".to_string(),
        price: price.parse::<Decimal>().expect("decimal literal"),
        category: category.to_string(),
        date_of_sale: Utc.with_ymd_and_hms(year, month, day, 9, 30, 0).unwrap(),
        sold,
        image: "https://example.com/fixture.png".to_string(),
    }
}

/// The March 2022 scenario: two 45-priced records (one sold) and a sold 300.
pub fn march_scenario() -> Vec<NewSaleRecord> {
    vec![
        record(2022, 3, 2, "45", true, "electronics"),
        record(2022, 3, 10, "45", false, "jewelery"),
        record(2022, 3, 28, "300", true, "electronics"),
    ]
}

pub async fn seeded(records: Vec<NewSaleRecord>) -> MemoryStore {
    let store = MemoryStore::new();
    store.replace_all(records).await.expect("seed memory store");
    store
}

/// Which store operations should fail.
#[derive(Debug, Default, Clone, Copy)]
pub struct Failures {
    pub find: bool,
    pub buckets: bool,
    pub categories: bool,
}

/// Wraps a [`MemoryStore`], failing selected operations and counting calls.
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryStore,
    failures: Failures,
    calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new(inner: MemoryStore, failures: Failures) -> Self {
        Self {
            inner,
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn outage(&self, fail: bool) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if fail {
            Err(StoreError::unavailable(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "store offline",
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordStore for FlakyStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    async fn list_all(&self) -> Result<Vec<SaleRecord>, StoreError> {
        self.inner.list_all().await
    }

    async fn find_by_date_range(
        &self,
        interval: MonthInterval,
        sold: Option<bool>,
    ) -> Result<Vec<SaleRecord>, StoreError> {
        self.outage(self.failures.find)?;
        self.inner.find_by_date_range(interval, sold).await
    }

    async fn count_by_price_bucket(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<BucketCount>, StoreError> {
        self.outage(self.failures.buckets)?;
        self.inner.count_by_price_bucket(interval).await
    }

    async fn count_by_category(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<CategoryCount>, StoreError> {
        self.outage(self.failures.categories)?;
        self.inner.count_by_category(interval).await
    }

    async fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<u64, StoreError> {
        self.inner.replace_all(records).await
    }
}
