//! Google-Shopping-style search provider for `pricecmp`.
//!
//! Talks to SerpApi's `google_shopping` engine and turns each result row into
//! a [`pricecmp_core::RawOffer`]. Filtering and validation happen downstream
//! in `pricecmp-engine`.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod rate_limit;

pub use client::SerpApiClient;
pub use error::SearchError;
pub use normalize::normalize_results;
pub use types::{ShoppingResponse, ShoppingResult};
