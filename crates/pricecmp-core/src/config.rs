use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound the shopping-search provider accepts for `num`.
const PROVIDER_MAX_RESULTS: u32 = 100;

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
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let search_api_key = require("SERPAPI_API_KEY")?;

    let env = parse_environment(&or_default("PRICECMP_ENV", "development"));
    let log_level = or_default("PRICECMP_LOG_LEVEL", "info");

    let search_base_url = or_default("PRICECMP_SEARCH_BASE_URL", "https://serpapi.com/");
    let search_timeout_secs = parse_u64("PRICECMP_SEARCH_TIMEOUT_SECS", "30")?;
    let search_user_agent = or_default(
        "PRICECMP_SEARCH_USER_AGENT",
        "pricecmp/0.1 (price-aggregation)",
    );
    let search_max_results =
        parse_u32("PRICECMP_SEARCH_MAX_RESULTS", "100")?.clamp(1, PROVIDER_MAX_RESULTS);
    let search_max_retries = parse_u32("PRICECMP_SEARCH_MAX_RETRIES", "1")?;
    let search_backoff_base_ms = parse_u64("PRICECMP_SEARCH_BACKOFF_BASE_MS", "500")?;

    let target_store_count = parse_usize("PRICECMP_TARGET_STORE_COUNT", "50")?;
    let marketplace_listing_cap = parse_usize("PRICECMP_MARKETPLACE_LISTING_CAP", "15")?;
    if marketplace_listing_cap == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PRICECMP_MARKETPLACE_LISTING_CAP".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let max_concurrent_queries = parse_usize("PRICECMP_MAX_CONCURRENT_QUERIES", "4")?.max(1);

    let rules_path = lookup("PRICECMP_RULES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        search_api_key,
        search_base_url,
        search_timeout_secs,
        search_user_agent,
        search_max_results,
        search_max_retries,
        search_backoff_base_ms,
        target_store_count,
        marketplace_listing_cap,
        max_concurrent_queries,
        rules_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
