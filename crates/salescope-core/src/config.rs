use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

pub const DEFAULT_CATALOG_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(invalid(var, format!("expected a boolean, got \"{raw}\""))),
        }
    };

    let database_url = require("DATABASE_URL")?;
    let env = parse_environment(&or_default("SALESCOPE_ENV", "development"))?;

    let bind_addr = parse_addr("SALESCOPE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SALESCOPE_LOG_LEVEL", "info");

    let db_max_connections = parse_u32("SALESCOPE_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("SALESCOPE_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("SALESCOPE_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let catalog_url = or_default("SALESCOPE_CATALOG_URL", DEFAULT_CATALOG_URL);
    let catalog_timeout_secs = parse_u64("SALESCOPE_CATALOG_TIMEOUT_SECS", "30")?;
    let catalog_user_agent = or_default(
        "SALESCOPE_CATALOG_USER_AGENT",
        "salescope/0.1 (catalog-seed)",
    );

    let strict_aggregation = parse_bool("SALESCOPE_STRICT_AGGREGATION", "false")?;

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        catalog_url,
        catalog_timeout_secs,
        catalog_user_agent,
        strict_aggregation,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SALESCOPE_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}
