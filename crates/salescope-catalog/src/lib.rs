//! Client for the third-party sale record catalog.

pub mod client;
pub mod error;
pub mod seed;

pub use client::CatalogClient;
pub use error::{CatalogError, SeedError};
pub use seed::seed_from_catalog;
