//! The seam between the aggregation core and a concrete shopping-search backend.

use std::future::Future;

use crate::offers::RawOffer;

/// One call to the shopping-search provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// Two-letter region code; the aggregation core always asks for `"us"`.
    pub region: String,
    pub max_results: u32,
}

impl SearchRequest {
    #[must_use]
    pub fn us(query: impl Into<String>, max_results: u32) -> Self {
        Self {
            query: query.into(),
            region: "us".to_owned(),
            max_results,
        }
    }
}

/// A shopping-search backend returning raw result rows.
///
/// Implementations own their transport concerns (timeouts, bounded retry).
/// Any error is treated by the caller as "no results for this call".
pub trait SearchProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<Vec<RawOffer>, Self::Error>> + Send;
}
