mod db;
mod report;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "salescope-cli")]
#[command(about = "Salescope command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database maintenance
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Print the combined monthly report as JSON
    Report {
        /// Three-letter month abbreviation, e.g. `Mar`
        #[arg(long)]
        month: String,
        /// Four-digit year
        #[arg(long)]
        year: String,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
    /// Replace all sale records with a fresh copy of the catalog
    Seed {
        /// Catalog URL; defaults to `SALESCOPE_CATALOG_URL`
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("salescope-cli: pass --help for available commands");
        return Ok(());
    };

    let config = salescope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let pool_config = salescope_db::PoolConfig::from_app_config(&config);
    let pool = salescope_db::connect_pool(&config.database_url, pool_config).await?;

    let outcome = match command {
        Commands::Db { command } => match command {
            DbCommands::Ping => db::run_ping(&pool).await,
            DbCommands::Migrate => db::run_migrate(&pool).await,
            DbCommands::Seed { url } => db::run_seed(&pool, &config, url.as_deref()).await,
        },
        Commands::Report { month, year } => {
            report::run_report(pool.clone(), &config, &month, &year).await
        }
    };

    pool.close().await;
    outcome
}

#[cfg(test)]
mod tests;
