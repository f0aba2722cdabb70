//! Price-aggregation core for `pricecmp`.
//!
//! Raw provider rows flow through the geographic allowlist, the relevance
//! classifier, the price validator, store resolution, and deduplication,
//! then get ranked into an [`pricecmp_core::AggregationResult`]. All rule
//! tables are built once and shared read-only across calls.

pub mod aggregate;
pub mod dedupe;
pub mod error;
pub mod geo;
pub mod pipeline;
pub mod plausibility;
pub mod price;
pub mod query;
pub mod rank;
pub mod relevance;
pub mod stores;

mod text;

pub use aggregate::{
    distinct_stores, merge_offers, variant_query, AggregateOptions, Aggregator,
    AggregatorSettings,
};
pub use dedupe::{Deduplicator, DEFAULT_MARKETPLACE_CAP};
pub use error::AggregateError;
pub use geo::GeoFilter;
pub use pipeline::OfferPipeline;
pub use plausibility::{Implausible, PriceValidator};
pub use price::{is_installment_text, parse_price};
pub use query::{CategoryRules, ModelVariant, ProductQuery};
pub use rank::Ranker;
pub use relevance::{Irrelevance, RelevanceClassifier};
pub use stores::{StoreDirectory, StoreEntry, UNRANKED_TIER};
