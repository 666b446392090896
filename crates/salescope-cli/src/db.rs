//! `db` subcommand handlers.

use salescope_catalog::{seed_from_catalog, CatalogClient};
use salescope_core::AppConfig;
use salescope_db::PgRecordStore;
use sqlx::PgPool;

pub(crate) async fn run_ping(pool: &PgPool) -> anyhow::Result<()> {
    salescope_db::ping(pool).await?;
    tracing::info!("database ping succeeded");
    println!("database reachable");
    Ok(())
}

pub(crate) async fn run_migrate(pool: &PgPool) -> anyhow::Result<()> {
    let applied = salescope_db::run_migrations(pool).await?;
    tracing::info!(applied, "migrations complete");
    println!("applied {applied} migration(s)");
    Ok(())
}

/// Fetch the catalog and replace every stored record with it.
///
/// Migrations are applied first so a fresh database can be seeded directly.
///
/// # Errors
///
/// Returns an error if migrations fail, the catalog cannot be fetched, any
/// catalog item is invalid, or the replace fails. Nothing is replaced unless
/// every item validates.
pub(crate) async fn run_seed(
    pool: &PgPool,
    config: &AppConfig,
    url: Option<&str>,
) -> anyhow::Result<()> {
    let applied = salescope_db::run_migrations(pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations before seeding");
    }

    let url = url.unwrap_or(&config.catalog_url);
    let client = CatalogClient::new(config.catalog_timeout_secs, &config.catalog_user_agent)?;
    let store = PgRecordStore::new(pool.clone());

    tracing::info!(url, "fetching catalog");
    let inserted = seed_from_catalog(&client, url, &store).await?;
    println!("seeded {inserted} record(s) from {url}");
    Ok(())
}
