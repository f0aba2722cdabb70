//! HTTP client for SerpApi's `google_shopping` engine.

use std::time::Duration;

use pricecmp_core::{AppConfig, RawOffer, SearchProvider, SearchRequest};
use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::normalize::normalize_results;
use crate::rate_limit::retry_with_backoff;
use crate::types::{ShoppingResponse, ShoppingResult};

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";

/// Google reports "no results" as an error envelope with HTTP 200.
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Client for the shopping-search provider.
///
/// 429 and 5xx responses and network failures are retried with backoff up
/// to `max_retries` additional attempts; other failures are typed errors.
/// Use [`SerpApiClient::with_base_url`] to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl SerpApiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SearchError> {
        Self::with_base_url(
            api_key,
            DEFAULT_BASE_URL,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
        )
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBaseUrl`] if the configured base URL does
    /// not parse, or [`SearchError::Http`] if the client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, SearchError> {
        Self::with_base_url(
            &config.search_api_key,
            &config.search_base_url,
            config.search_timeout_secs,
            &config.search_user_agent,
            config.search_max_retries,
            config.search_backoff_base_ms,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidBaseUrl`] if `base_url` is not a valid
    /// URL, or [`SearchError::Http`] if the client cannot be built.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Runs one shopping search and returns the provider's result rows.
    ///
    /// A "no results" envelope is returned as an empty list.
    ///
    /// # Errors
    ///
    /// - [`SearchError::RateLimited`]: HTTP 429 after all retries.
    /// - [`SearchError::UnexpectedStatus`]: other non-2xx status (5xx retried).
    /// - [`SearchError::Api`]: provider error envelope (bad key, quota).
    /// - [`SearchError::Http`]: network or TLS failure after all retries.
    /// - [`SearchError::Deserialize`]: body is not the expected JSON.
    pub async fn search_shopping(
        &self,
        query: &str,
        region: &str,
        max_results: u32,
    ) -> Result<Vec<ShoppingResult>, SearchError> {
        let url = self.search_url(query, region, max_results)?;
        // Never log or surface the key-bearing query string.
        let display_url = format!("{}{}", self.base_url, "search.json");

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            let display_url = display_url.clone();
            async move {
                let response = self
                    .client
                    .get(url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await
                    .map_err(|e| SearchError::Http(e.without_url()))?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(1);
                    return Err(SearchError::RateLimited { retry_after_secs });
                }

                let body = response
                    .text()
                    .await
                    .map_err(|e| SearchError::Http(e.without_url()))?;

                if !status.is_success() {
                    // Auth and quota failures come with an error envelope worth surfacing.
                    if status.is_client_error() {
                        if let Some(message) = serde_json::from_str::<ShoppingResponse>(&body)
                            .ok()
                            .and_then(|r| r.error)
                        {
                            return Err(SearchError::Api(message));
                        }
                    }
                    return Err(SearchError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: display_url,
                    });
                }

                let parsed = serde_json::from_str::<ShoppingResponse>(&body).map_err(|e| {
                    SearchError::Deserialize {
                        context: format!("shopping results for \"{query}\""),
                        source: e,
                    }
                })?;

                match parsed.error {
                    Some(message) if message.contains(NO_RESULTS_MARKER) => Ok(Vec::new()),
                    Some(message) => Err(SearchError::Api(message)),
                    None => Ok(parsed.shopping_results),
                }
            }
        })
        .await
    }

    /// Builds the `search.json` URL for one query.
    fn search_url(&self, query: &str, region: &str, max_results: u32) -> Result<Url, SearchError> {
        let mut url =
            self.base_url
                .join("search.json")
                .map_err(|e| SearchError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;

        url.query_pairs_mut()
            .append_pair("engine", "google_shopping")
            .append_pair("q", query)
            .append_pair("gl", region)
            .append_pair("hl", "en")
            .append_pair("num", &max_results.to_string())
            .append_pair("api_key", &self.api_key);

        Ok(url)
    }
}

impl SearchProvider for SerpApiClient {
    type Error = SearchError;

    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawOffer>, SearchError> {
        let results = self
            .search_shopping(&request.query, &request.region, request.max_results)
            .await?;
        Ok(normalize_results(results))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
