use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SERPAPI_API_KEY", "test-key");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(parse_environment("development"), Environment::Development);
    assert_eq!(parse_environment("test"), Environment::Test);
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_api_key() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SERPAPI_API_KEY"),
        "expected MissingEnvVar(SERPAPI_API_KEY), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_key_as_missing() {
    let mut map = HashMap::new();
    map.insert("SERPAPI_API_KEY", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.search_api_key, "test-key");
    assert_eq!(cfg.search_base_url, "https://serpapi.com/");
    assert_eq!(cfg.search_timeout_secs, 30);
    assert_eq!(cfg.search_user_agent, "pricecmp/0.1 (price-aggregation)");
    assert_eq!(cfg.search_max_results, 100);
    assert_eq!(cfg.search_max_retries, 1);
    assert_eq!(cfg.search_backoff_base_ms, 500);
    assert_eq!(cfg.target_store_count, 50);
    assert_eq!(cfg.marketplace_listing_cap, 15);
    assert_eq!(cfg.max_concurrent_queries, 4);
    assert!(cfg.rules_path.is_none());
}

#[test]
fn build_app_config_clamps_max_results_to_provider_limit() {
    let mut map = full_env();
    map.insert("PRICECMP_SEARCH_MAX_RESULTS", "500");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.search_max_results, 100);
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = full_env();
    map.insert("PRICECMP_SEARCH_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICECMP_SEARCH_TIMEOUT_SECS"),
        "expected InvalidEnvVar(PRICECMP_SEARCH_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_marketplace_cap() {
    let mut map = full_env();
    map.insert("PRICECMP_MARKETPLACE_LISTING_CAP", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PRICECMP_MARKETPLACE_LISTING_CAP")
    );
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = full_env();
    map.insert("PRICECMP_ENV", "production");
    map.insert("PRICECMP_TARGET_STORE_COUNT", "20");
    map.insert("PRICECMP_MAX_CONCURRENT_QUERIES", "0");
    map.insert("PRICECMP_RULES_PATH", "./config/rules.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.target_store_count, 20);
    assert_eq!(cfg.max_concurrent_queries, 1);
    assert_eq!(
        cfg.rules_path.as_deref(),
        Some(std::path::Path::new("./config/rules.yaml"))
    );
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"));
    assert!(rendered.contains("[redacted]"));
}
