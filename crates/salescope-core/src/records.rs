//! Sale record types and validation of upstream seed payloads.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A stored sale record.
///
/// `date_of_sale` is `None` when the stored timestamp is missing; it is
/// serialized as `null` rather than failing the read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub date_of_sale: Option<DateTime<Utc>>,
    pub sold: bool,
    pub image: String,
}

/// A validated record ready to be written to a record store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSaleRecord {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub date_of_sale: DateTime<Utc>,
    pub sold: bool,
    pub image: String,
}

/// Raw record shape of the third-party catalog dump.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub date_of_sale: String,
    pub sold: bool,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record {index} is malformed: {reason}")]
    Malformed { index: usize, reason: String },
    #[error("record {index} has an unparseable dateOfSale")]
    UnparseableDate { index: usize },
    #[error("record {index} has a negative price")]
    NegativePrice { index: usize },
}

impl SeedRecord {
    /// Validate into a [`NewSaleRecord`]. `index` is the position in the batch
    /// and is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UnparseableDate`] or [`RecordError::NegativePrice`].
    pub fn validate(self, index: usize) -> Result<NewSaleRecord, RecordError> {
        if self.price < Decimal::ZERO {
            return Err(RecordError::NegativePrice { index });
        }
        let date_of_sale =
            parse_sale_date(&self.date_of_sale).ok_or(RecordError::UnparseableDate { index })?;

        Ok(NewSaleRecord {
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            date_of_sale,
            sold: self.sold,
            image: self.image,
        })
    }
}

/// Parse a `dateOfSale` value.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]` (read as UTC) and a
/// bare `YYYY-MM-DD` (UTC midnight).
#[must_use]
pub fn parse_sale_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Validate a whole seed batch. The first bad item rejects the batch.
///
/// # Errors
///
/// Returns the [`RecordError`] of the first item that fails to deserialize
/// or validate.
pub fn parse_seed_batch(items: Vec<Value>) -> Result<Vec<NewSaleRecord>, RecordError> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<SeedRecord>(item)
                .map_err(|e| RecordError::Malformed {
                    index,
                    reason: e.to_string(),
                })?
                .validate(index)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn seed_item(date: &str, price: f64) -> Value {
        json!({
            "id": 1,
            "title": "Fjallraven Backpack",
            "description": "Fits 15 inch laptops",
            "price": price,
            "category": "men's clothing",
            "dateOfSale": date,
            "sold": false,
            "image": "https://example.com/bag.jpg"
        })
    }

    #[test]
    fn parses_rfc3339_with_offset_into_utc() {
        let ts = parse_sale_date("2021-11-27T20:29:54+05:30").expect("rfc3339");
        assert_eq!(ts, Utc.with_ymd_and_hms(2021, 11, 27, 14, 59, 54).unwrap());
    }

    #[test]
    fn parses_naive_and_date_only_forms_as_utc() {
        assert_eq!(
            parse_sale_date("2022-03-05T10:00:00").unwrap(),
            Utc.with_ymd_and_hms(2022, 3, 5, 10, 0, 0).unwrap()
        );
        assert_eq!(
            parse_sale_date("2022-03-05").unwrap(),
            Utc.with_ymd_and_hms(2022, 3, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(parse_sale_date("not a date").is_none());
        assert!(parse_sale_date("2022-13-45").is_none());
        assert!(parse_sale_date("").is_none());
    }

    #[test]
    fn seed_batch_validates_every_item() {
        let batch = vec![
            seed_item("2022-03-01T00:00:00Z", 45.0),
            seed_item("2022-03-15T12:00:00Z", 329.85),
        ];
        let records = parse_seed_batch(batch).expect("valid batch");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].price, "329.85".parse::<Decimal>().unwrap());
        assert_eq!(records[0].category, "men's clothing");
    }

    #[test]
    fn seed_batch_reports_index_of_bad_date() {
        let batch = vec![
            seed_item("2022-03-01T00:00:00Z", 45.0),
            seed_item("yesterday", 45.0),
        ];
        assert_eq!(
            parse_seed_batch(batch),
            Err(RecordError::UnparseableDate { index: 1 })
        );
    }

    #[test]
    fn seed_batch_rejects_negative_price() {
        let batch = vec![seed_item("2022-03-01", -1.0)];
        assert_eq!(
            parse_seed_batch(batch),
            Err(RecordError::NegativePrice { index: 0 })
        );
    }

    #[test]
    fn seed_batch_rejects_missing_fields() {
        let batch = vec![json!({ "title": "only a title" })];
        assert!(matches!(
            parse_seed_batch(batch),
            Err(RecordError::Malformed { index: 0, .. })
        ));
    }

    #[test]
    fn sale_record_serializes_camel_case_with_numeric_price() {
        let record = SaleRecord {
            id: 7,
            title: "Mens Casual Slim Fit".to_string(),
            description: "Cotton".to_string(),
            price: "15.99".parse().unwrap(),
            category: "men's clothing".to_string(),
            date_of_sale: None,
            sold: true,
            image: "https://example.com/shirt.jpg".to_string(),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["dateOfSale"], Value::Null);
        assert_eq!(json["price"].as_f64(), Some(15.99));
        assert_eq!(json["sold"], Value::Bool(true));
    }
}
