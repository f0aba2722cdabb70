use thiserror::Error;

/// Caller-visible aggregation failures.
///
/// Provider failures are absorbed into an empty result and never appear here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("query must not be empty")]
    EmptyQuery,
}
