//! Bounded retry with exponential backoff and jitter for provider calls.
//!
//! Rate limiting (429), server errors (5xx), and network-level failures are
//! retried. Everything else (4xx, malformed JSON, provider error envelopes)
//! is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::SearchError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` if `err` represents a transient condition worth retrying.
pub(crate) fn is_retriable(err: &SearchError) -> bool {
    match err {
        SearchError::RateLimited { .. } => true,
        SearchError::UnexpectedStatus { status, .. } => *status >= 500,
        SearchError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SearchError::Deserialize { .. }
        | SearchError::Api(_)
        | SearchError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The wait before the n-th retry is `backoff_base_ms * 2^(n-1)` ± 25 % jitter,
/// capped at 30 s. A `RateLimited` error's `Retry-After` is honoured when it
/// is longer than the computed delay (still subject to the cap).
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SearchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SearchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (computed as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let requested_ms = match &err {
                    SearchError::RateLimited { retry_after_secs } => {
                        retry_after_secs.saturating_mul(1_000)
                    }
                    _ => 0,
                };
                let delay_ms = jittered.max(requested_ms).min(MAX_DELAY_MS);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient search provider error; retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn server_error() -> SearchError {
        SearchError::UnexpectedStatus {
            status: 503,
            url: "/search.json".to_owned(),
        }
    }

    #[test]
    fn rate_limited_and_server_errors_are_retriable() {
        assert!(is_retriable(&SearchError::RateLimited {
            retry_after_secs: 0
        }));
        assert!(is_retriable(&server_error()));
    }

    #[test]
    fn client_errors_are_not_retriable() {
        assert!(!is_retriable(&SearchError::UnexpectedStatus {
            status: 401,
            url: "/search.json".to_owned(),
        }));
        assert!(!is_retriable(&SearchError::Api("Invalid API key".to_owned())));
    }

    #[test]
    fn deserialize_error_is_not_retriable() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(!is_retriable(&SearchError::Deserialize {
            context: "test".to_owned(),
            source,
        }));
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, SearchError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_server_error_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(1, 0, || {
            let c = Arc::clone(&c);
            async move {
                if c.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(server_error())
                } else {
                    Ok::<u32, SearchError>(7)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(1, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SearchError>(server_error())
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2, "one try plus one retry");
        assert!(matches!(
            result,
            Err(SearchError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn does_not_retry_api_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = Arc::clone(&calls);
        let result = retry_with_backoff(3, 0, || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err::<u32, SearchError>(SearchError::Api("Invalid API key".to_owned()))
            }
        })
        .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(SearchError::Api(_))));
    }
}
