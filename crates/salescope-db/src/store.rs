//! Postgres-backed [`RecordStore`].

use async_trait::async_trait;
use salescope_core::{
    BucketCount, CategoryCount, MonthInterval, NewSaleRecord, RecordStore, SaleRecord, StoreError,
};
use sqlx::PgPool;

use crate::DbError;

/// Record store over a shared Postgres pool. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<DbError> for StoreError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::UnknownBucket(index) => {
                StoreError::Corrupt(format!("price bucket index {index} out of range"))
            }
            other => StoreError::unavailable(other),
        }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::ping(&self.pool).await?)
    }

    async fn list_all(&self) -> Result<Vec<SaleRecord>, StoreError> {
        let rows = crate::list_records(&self.pool).await?;
        Ok(rows.into_iter().map(SaleRecord::from).collect())
    }

    async fn find_by_date_range(
        &self,
        interval: MonthInterval,
        sold: Option<bool>,
    ) -> Result<Vec<SaleRecord>, StoreError> {
        let rows = crate::find_records_in_range(&self.pool, interval, sold).await?;
        Ok(rows.into_iter().map(SaleRecord::from).collect())
    }

    async fn count_by_price_bucket(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<BucketCount>, StoreError> {
        Ok(crate::count_records_by_price_bucket(&self.pool, interval).await?)
    }

    async fn count_by_category(
        &self,
        interval: MonthInterval,
    ) -> Result<Vec<CategoryCount>, StoreError> {
        Ok(crate::count_records_by_category(&self.pool, interval).await?)
    }

    async fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<u64, StoreError> {
        Ok(crate::replace_all_records(&self.pool, &records).await?)
    }
}
