//! Aggregation orchestrator: one or two provider calls, filtering, merge,
//! and ranking for a single product query.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use pricecmp_core::{
    AggregationResult, AppConfig, RawOffer, SearchProvider, SearchRequest, ValidatedOffer,
};

use crate::error::AggregateError;
use crate::pipeline::OfferPipeline;
use crate::query::ProductQuery;
use crate::rank::Ranker;
use crate::text::{fold, tokens};

/// Per-call options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// Keep at most this many ranked offers. Summary fields describe the
    /// truncated list.
    pub limit: Option<usize>,
    /// Apply the geographic allowlist.
    pub domestic_only: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            limit: None,
            domestic_only: true,
        }
    }
}

/// Provider call sizing and the variant-query trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregatorSettings {
    /// Raw results requested per provider call.
    pub max_results: u32,
    /// Below this many distinct stores a specific query gets a second,
    /// broader provider call.
    pub target_store_count: usize,
}

impl AggregatorSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_results: config.search_max_results,
            target_store_count: config.target_store_count,
        }
    }
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            max_results: 100,
            target_store_count: 50,
        }
    }
}

/// Explicit orchestrator states. Each step consumes the current state and
/// yields the next; nothing survives the call.
enum Stage {
    PrimaryFetch,
    Filtering(Vec<RawOffer>),
    SecondaryFetch {
        primary: Vec<ValidatedOffer>,
        variant: String,
    },
    Merge {
        primary: Vec<ValidatedOffer>,
        secondary: Vec<ValidatedOffer>,
    },
    Ranked(Vec<ValidatedOffer>),
    Done(AggregationResult),
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::PrimaryFetch => "primary_fetch",
            Stage::Filtering(_) => "filtering",
            Stage::SecondaryFetch { .. } => "secondary_fetch",
            Stage::Merge { .. } => "merge",
            Stage::Ranked(_) => "ranked",
            Stage::Done(_) => "done",
        }
    }
}

/// Drives a [`SearchProvider`] through the filtering pipeline and ranker.
#[derive(Debug)]
pub struct Aggregator<P> {
    provider: P,
    pipeline: OfferPipeline,
    ranker: Ranker,
    settings: AggregatorSettings,
}

impl<P: SearchProvider> Aggregator<P> {
    /// The ranker shares the pipeline's store directory so resolution and
    /// tiers agree.
    #[must_use]
    pub fn new(provider: P, pipeline: OfferPipeline, settings: AggregatorSettings) -> Self {
        let ranker = Ranker::new(pipeline.directory().clone());
        Self {
            provider,
            pipeline,
            ranker,
            settings,
        }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    #[must_use]
    pub fn pipeline(&self) -> &OfferPipeline {
        &self.pipeline
    }

    /// Aggregates offers for `query`, stamping them with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::EmptyQuery`] for a blank query. Provider
    /// failures never error: a failed primary fetch yields an empty result
    /// and a failed secondary fetch is ignored.
    pub async fn aggregate(
        &self,
        query: &str,
        options: &AggregateOptions,
    ) -> Result<AggregationResult, AggregateError> {
        self.aggregate_at(query, options, Utc::now()).await
    }

    /// [`Self::aggregate`] with an explicit fetch timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::EmptyQuery`] for a blank query.
    pub async fn aggregate_at(
        &self,
        query: &str,
        options: &AggregateOptions,
        fetched_at: DateTime<Utc>,
    ) -> Result<AggregationResult, AggregateError> {
        if query.trim().is_empty() {
            return Err(AggregateError::EmptyQuery);
        }
        let query = ProductQuery::new(query);
        tracing::debug!(
            query = query.text(),
            category = %query.category(),
            "aggregating"
        );

        let mut stage = Stage::PrimaryFetch;
        loop {
            tracing::debug!(query = query.text(), stage = stage.name(), "stage");
            stage = match stage {
                Stage::PrimaryFetch => match self.fetch(query.text()).await {
                    Ok(raw) => Stage::Filtering(raw),
                    Err(e) => {
                        tracing::warn!(
                            query = query.text(),
                            error = %e,
                            "primary search failed; returning no offers"
                        );
                        return Ok(AggregationResult::empty());
                    }
                },

                Stage::Filtering(raw) => {
                    let primary = self
                        .pipeline
                        .run(&raw, &query, fetched_at, options.domestic_only);
                    let stores = distinct_stores(&primary);
                    match self.variant_query_for(&query, stores) {
                        Some(variant) => Stage::SecondaryFetch { primary, variant },
                        None => Stage::Ranked(primary),
                    }
                }

                Stage::SecondaryFetch { primary, variant } => match self.fetch(&variant).await {
                    Ok(raw) => {
                        // Variant results must still describe the original query.
                        let secondary =
                            self.pipeline
                                .run(&raw, &query, fetched_at, options.domestic_only);
                        Stage::Merge { primary, secondary }
                    }
                    Err(e) => {
                        tracing::debug!(
                            query = query.text(),
                            variant = %variant,
                            error = %e,
                            "variant search failed; keeping primary offers"
                        );
                        Stage::Ranked(primary)
                    }
                },

                Stage::Merge { primary, secondary } => {
                    Stage::Ranked(merge_offers(primary, secondary))
                }

                Stage::Ranked(offers) => {
                    let mut ranked = self.ranker.rank(offers);
                    if let Some(limit) = options.limit {
                        ranked.truncate(limit);
                    }
                    Stage::Done(AggregationResult::from_ranked(ranked))
                }

                Stage::Done(result) => {
                    tracing::info!(
                        query = query.text(),
                        stores = result.total_stores,
                        best_price = ?result.best_price,
                        best_store = ?result.best_store,
                        "aggregation complete"
                    );
                    return Ok(result);
                }
            };
        }
    }

    async fn fetch(&self, text: &str) -> Result<Vec<RawOffer>, P::Error> {
        let request = SearchRequest::us(text, self.settings.max_results);
        self.provider.search(&request).await
    }

    fn variant_query_for(&self, query: &ProductQuery, stores: usize) -> Option<String> {
        if stores >= self.settings.target_store_count {
            return None;
        }
        let variant = variant_query(query)?;
        tracing::debug!(
            query = query.text(),
            stores,
            target = self.settings.target_store_count,
            variant = %variant,
            "too few stores; trying variant query"
        );
        Some(variant)
    }
}

/// Number of distinct store identities in `offers`.
#[must_use]
pub fn distinct_stores(offers: &[ValidatedOffer]) -> usize {
    offers
        .iter()
        .map(|o| o.store.store_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// A shortened "brand + product type" query for a long or SKU-like query.
///
/// `"Lenovo ThinkPad X1 Carbon Gen 11"` becomes `"Lenovo laptop"`. When the
/// brand word already names the product type (`"iPhone"`), the model number
/// is kept instead: `"iPhone 17 Pro Max"` becomes `"iPhone 17"`. Returns
/// `None` for short queries, categories with no product-type noun, or when
/// the variant would repeat the query.
#[must_use]
pub fn variant_query(query: &ProductQuery) -> Option<String> {
    if !is_specific(query) {
        return None;
    }
    let noun = query.category().product_noun()?;
    let words: Vec<&str> = query.text().split_whitespace().collect();
    let first = *words.first()?;

    let variant = if fold(first).contains(noun) {
        words.iter().take(2).copied().collect::<Vec<_>>().join(" ")
    } else {
        format!("{first} {noun}")
    };

    (fold(&variant) != query.folded()).then_some(variant)
}

/// Long queries, and queries carrying a SKU-like token, are specific enough
/// to be worth broadening.
fn is_specific(query: &ProductQuery) -> bool {
    const LONG_QUERY_WORDS: usize = 4;

    query.word_count() >= LONG_QUERY_WORDS
        || tokens(query.folded()).into_iter().any(|t| {
            t.len() >= 5
                && t.chars().any(|c| c.is_ascii_digit())
                && t.chars().any(|c| c.is_ascii_alphabetic())
        })
}

/// Adds secondary offers only for stores the primary offers lack. A store
/// already found by the primary query keeps the primary price.
#[must_use]
pub fn merge_offers(
    primary: Vec<ValidatedOffer>,
    secondary: Vec<ValidatedOffer>,
) -> Vec<ValidatedOffer> {
    let known: HashSet<String> = primary.iter().map(|o| o.store.store_id.clone()).collect();
    let added: Vec<ValidatedOffer> = secondary
        .into_iter()
        .filter(|o| !known.contains(&o.store.store_id))
        .collect();

    tracing::debug!(
        primary = primary.len(),
        added = added.len(),
        "merged variant offers"
    );

    let mut merged = primary;
    merged.extend(added);
    merged
}
