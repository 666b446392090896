//! Monthly analytics over the sale record store.
//!
//! Three reducers (sales summary, price histogram, category breakdown) each
//! resolve a [`MonthQuery`] into a UTC month interval and aggregate the
//! records inside it. [`combined`] fans the three out concurrently and
//! applies a [`CombinePolicy`] to decide which failures abort the response.

pub mod categories;
pub mod combined;
pub mod error;
pub mod histogram;
pub mod query;
pub mod summary;

pub use categories::{category_breakdown, category_breakdown_or_empty, categories_for};
pub use combined::{combined, CombinePolicy, CombinedReport, FieldPolicy};
pub use error::AnalyticsError;
pub use histogram::{histogram_for, price_histogram, price_histogram_or_zero, PriceHistogram};
pub use query::MonthQuery;
pub use summary::{sales_summary, summarize, SalesSummary};
