use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub search_api_key: String,
    pub search_base_url: String,
    pub search_timeout_secs: u64,
    pub search_user_agent: String,
    /// Raw results requested per provider call, clamped to `1..=100`.
    pub search_max_results: u32,
    pub search_max_retries: u32,
    pub search_backoff_base_ms: u64,
    /// Distinct-store count below which a shortened variant query is issued.
    pub target_store_count: usize,
    pub marketplace_listing_cap: usize,
    pub max_concurrent_queries: usize,
    pub rules_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("search_api_key", &"[redacted]")
            .field("search_base_url", &self.search_base_url)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("search_user_agent", &self.search_user_agent)
            .field("search_max_results", &self.search_max_results)
            .field("search_max_retries", &self.search_max_retries)
            .field("search_backoff_base_ms", &self.search_backoff_base_ms)
            .field("target_store_count", &self.target_store_count)
            .field("marketplace_listing_cap", &self.marketplace_listing_cap)
            .field("max_concurrent_queries", &self.max_concurrent_queries)
            .field("rules_path", &self.rules_path)
            .finish()
    }
}
