//! Database operations for the `sale_records` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use salescope_core::{
    BucketCount, CategoryCount, MonthInterval, NewSaleRecord, PriceBucket, SaleRecord,
};
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `sale_records` table.
///
/// `date_of_sale` is nullable in the schema; rows without it are still
/// listed but never match a month interval.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SaleRecordRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub date_of_sale: Option<DateTime<Utc>>,
    pub sold: bool,
    pub image: String,
}

impl From<SaleRecordRow> for SaleRecord {
    fn from(row: SaleRecordRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            price: row.price,
            category: row.category,
            date_of_sale: row.date_of_sale,
            sold: row.sold,
            image: row.image,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BucketCountRow {
    bucket_index: i64,
    count: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryCountRow {
    category: String,
    count: i64,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns every sale record ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_records(pool: &PgPool) -> Result<Vec<SaleRecordRow>, DbError> {
    let rows = sqlx::query_as::<_, SaleRecordRow>(
        "SELECT id, title, description, price, category, date_of_sale, sold, image \
         FROM sale_records \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns records sold within `interval`, optionally filtered by `sold`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_records_in_range(
    pool: &PgPool,
    interval: MonthInterval,
    sold: Option<bool>,
) -> Result<Vec<SaleRecordRow>, DbError> {
    let rows = sqlx::query_as::<_, SaleRecordRow>(
        "SELECT id, title, description, price, category, date_of_sale, sold, image \
         FROM sale_records \
         WHERE date_of_sale >= $1 \
           AND date_of_sale < $2 \
           AND ($3::BOOLEAN IS NULL OR sold = $3) \
         ORDER BY id",
    )
    .bind(interval.start())
    .bind(interval.end())
    .bind(sold)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Counts interval records per price bucket.
///
/// The `CASE` ladder is bound from [`PriceBucket::upper_bound`] so the SQL
/// and in-process bucketing cannot drift apart. Only buckets with at least
/// one record are returned.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or [`DbError::UnknownBucket`]
/// if the database yields an index outside the taxonomy.
pub async fn count_records_by_price_bucket(
    pool: &PgPool,
    interval: MonthInterval,
) -> Result<Vec<BucketCount>, DbError> {
    let mut query = sqlx::query_as::<_, BucketCountRow>(
        "SELECT \
             CASE \
                 WHEN price <= $3 THEN 0 \
                 WHEN price <= $4 THEN 1 \
                 WHEN price <= $5 THEN 2 \
                 WHEN price <= $6 THEN 3 \
                 WHEN price <= $7 THEN 4 \
                 ELSE 5 \
             END::BIGINT AS bucket_index, \
             COUNT(*) AS count \
         FROM sale_records \
         WHERE date_of_sale >= $1 \
           AND date_of_sale < $2 \
         GROUP BY bucket_index \
         ORDER BY bucket_index",
    )
    .bind(interval.start())
    .bind(interval.end());

    for upper in PriceBucket::ALL.into_iter().filter_map(PriceBucket::upper_bound) {
        query = query.bind(upper);
    }

    let rows = query.fetch_all(pool).await?;

    rows.into_iter()
        .map(|row| {
            usize::try_from(row.bucket_index)
                .ok()
                .and_then(PriceBucket::from_index)
                .map(|bucket| BucketCount {
                    bucket,
                    count: row.count,
                })
                .ok_or(DbError::UnknownBucket(row.bucket_index))
        })
        .collect()
}

/// Counts interval records per category, in no particular order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_records_by_category(
    pool: &PgPool,
    interval: MonthInterval,
) -> Result<Vec<CategoryCount>, DbError> {
    let rows = sqlx::query_as::<_, CategoryCountRow>(
        "SELECT category, COUNT(*) AS count \
         FROM sale_records \
         WHERE date_of_sale >= $1 \
           AND date_of_sale < $2 \
         GROUP BY category",
    )
    .bind(interval.start())
    .bind(interval.end())
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| CategoryCount {
            category: row.category,
            count: row.count,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Replace the whole collection with `records`.
///
/// The delete and the bulk insert run in one transaction, so concurrent
/// readers see either the old collection or the new one. Returns the number
/// of inserted rows.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any statement fails; the transaction is
/// rolled back and the previous contents remain.
pub async fn replace_all_records(
    pool: &PgPool,
    records: &[NewSaleRecord],
) -> Result<u64, DbError> {
    let mut titles: Vec<String> = Vec::with_capacity(records.len());
    let mut descriptions: Vec<String> = Vec::with_capacity(records.len());
    let mut prices: Vec<Decimal> = Vec::with_capacity(records.len());
    let mut categories: Vec<String> = Vec::with_capacity(records.len());
    let mut dates: Vec<DateTime<Utc>> = Vec::with_capacity(records.len());
    let mut sold_flags: Vec<bool> = Vec::with_capacity(records.len());
    let mut images: Vec<String> = Vec::with_capacity(records.len());

    for record in records {
        titles.push(record.title.clone());
        descriptions.push(record.description.clone());
        prices.push(record.price);
        categories.push(record.category.clone());
        dates.push(record.date_of_sale);
        sold_flags.push(record.sold);
        images.push(record.image.clone());
    }

    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM sale_records")
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let inserted = sqlx::query(
        "INSERT INTO sale_records \
             (title, description, price, category, date_of_sale, sold, image) \
         SELECT * FROM UNNEST(\
              $1::text[], $2::text[], $3::numeric[], $4::text[], \
              $5::timestamptz[], $6::bool[], $7::text[])",
    )
    .bind(&titles)
    .bind(&descriptions)
    .bind(&prices)
    .bind(&categories)
    .bind(&dates)
    .bind(&sold_flags)
    .bind(&images)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;

    tracing::info!(deleted, inserted, "sale_records replaced");
    Ok(inserted)
}
