//! Response types for SerpApi's `google_shopping` engine.
//!
//! ## Observed shape
//!
//! ### `shopping_results`
//! Absent (not an empty array) when Google returned nothing. Modeled with
//! `#[serde(default)]`.
//!
//! ### `price` vs `extracted_price`
//! `price` is display text and may carry installment suffixes
//! (`"$28.00/mo"`) or ranges. `extracted_price` is a float the provider
//! derives from it and silently drops the suffix, so the aggregation core
//! works from `price` only.
//!
//! ### `source`
//! Free-text store label: `"Walmart"`, `"Walmart - Seller X"`, `"eBay"`,
//! `"Amazon.com"`, `"Best Buy"`. Occasionally a bare domain.
//!
//! ### `link` / `product_link`
//! `link` points at the merchant when present; `product_link` is the
//! Google product page and is used as a fallback.
//!
//! ### `error`
//! A top-level string. `"Google hasn't returned any results for this query."`
//! is reported as an error with HTTP 200 but means "zero results".

use serde::Deserialize;

/// Top-level response from `GET /search.json?engine=google_shopping`.
#[derive(Debug, Deserialize)]
pub struct ShoppingResponse {
    #[serde(default)]
    pub shopping_results: Vec<ShoppingResult>,

    #[serde(default)]
    pub error: Option<String>,
}

/// One result row.
#[derive(Debug, Clone, Deserialize)]
pub struct ShoppingResult {
    #[serde(default)]
    pub position: Option<u32>,

    /// Rows without a title are skipped, not rejected with the response.
    #[serde(default)]
    pub title: Option<String>,

    /// Store label. Rows without one cannot be attributed and are skipped.
    #[serde(default)]
    pub source: Option<String>,

    /// Display price text, e.g. `"$1,099.00"`.
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub extracted_price: Option<f64>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub product_link: Option<String>,

    #[serde(default)]
    pub thumbnail: Option<String>,
}
