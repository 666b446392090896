pub mod app_config;
pub mod buckets;
pub mod config;
pub mod interval;
pub mod records;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use buckets::PriceBucket;
pub use config::{load_app_config, load_app_config_from_env};
pub use interval::{parse_month, parse_year, resolve_month, IntervalError, MonthInterval};
pub use records::{
    parse_sale_date, parse_seed_batch, NewSaleRecord, RecordError, SaleRecord, SeedRecord,
};
pub use store::{memory::MemoryStore, BucketCount, CategoryCount, RecordStore, StoreError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
