//! `report` subcommand: the combined dashboard payload on stdout.

use std::sync::Arc;

use salescope_analytics::{combined, CombinePolicy, MonthQuery};
use salescope_core::AppConfig;
use salescope_db::PgRecordStore;
use sqlx::PgPool;

pub(crate) async fn run_report(
    pool: PgPool,
    config: &AppConfig,
    month: &str,
    year: &str,
) -> anyhow::Result<()> {
    let store = Arc::new(PgRecordStore::new(pool));
    let policy = CombinePolicy::from_strict_flag(config.strict_aggregation);

    tracing::info!(month, year, strict = config.strict_aggregation, "building combined report");
    let report = combined(store, MonthQuery::new(month, year), policy).await?;
    tracing::debug!(
        categories = report.category_data.len(),
        histogram_total = report.price_range_data.total(),
        "combined report ready"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
