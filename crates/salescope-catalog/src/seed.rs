//! Fetch, validate and replace in one call.

use salescope_core::{parse_seed_batch, RecordStore};

use crate::{CatalogClient, SeedError};

/// Reseed `store` from the catalog at `url`.
///
/// The whole batch is validated before the store is touched; the first
/// invalid item aborts with nothing replaced. Returns the inserted count.
///
/// # Errors
///
/// Returns [`SeedError::Catalog`] if the fetch fails, [`SeedError::Invalid`]
/// if an item fails validation, or [`SeedError::Store`] if the replace fails.
pub async fn seed_from_catalog(
    client: &CatalogClient,
    url: &str,
    store: &dyn RecordStore,
) -> Result<u64, SeedError> {
    let items = client.fetch_records(url).await?;
    let fetched = items.len();
    let records = parse_seed_batch(items)?;
    let inserted = store.replace_all(records).await?;

    tracing::info!(url, fetched, inserted, "store reseeded from catalog");
    Ok(inserted)
}
