mod api;
mod middleware;

use std::sync::Arc;

use salescope_analytics::CombinePolicy;
use salescope_catalog::CatalogClient;
use salescope_db::PgRecordStore;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = salescope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = salescope_db::PoolConfig::from_app_config(&config);
    let pool = salescope_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = salescope_db::run_migrations(&pool).await?;
    tracing::info!(applied, env = %config.env, "database ready");

    let catalog = CatalogClient::new(config.catalog_timeout_secs, &config.catalog_user_agent)?;
    let policy = CombinePolicy::from_strict_flag(config.strict_aggregation);
    if config.strict_aggregation {
        tracing::info!("strict aggregation enabled; any reducer failure aborts combined-data");
    }

    let state = AppState {
        store: Arc::new(PgRecordStore::new(pool.clone())),
        catalog,
        catalog_url: Arc::from(config.catalog_url.as_str()),
        policy,
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
