//! The per-call filtering pipeline over one batch of raw offers.
//!
//! Stage order: geographic allowlist, relevance, price plausibility, store
//! resolution, deduplication. The cheap rejections run first so plausibility
//! and identity work is spent only on offers that can survive.

use chrono::{DateTime, Utc};
use pricecmp_core::{RawOffer, RuleOverrides, ValidatedOffer};

use crate::dedupe::Deduplicator;
use crate::geo::GeoFilter;
use crate::plausibility::PriceValidator;
use crate::query::ProductQuery;
use crate::relevance::RelevanceClassifier;
use crate::stores::StoreDirectory;

/// Currency of every offer in the domestic result set.
const CURRENCY: &str = "USD";

/// Immutable rule tables for one aggregator. Pure over its inputs.
#[derive(Debug, Clone)]
pub struct OfferPipeline {
    directory: StoreDirectory,
    geo: GeoFilter,
    relevance: RelevanceClassifier,
    prices: PriceValidator,
    dedupe: Deduplicator,
}

impl OfferPipeline {
    /// Built-in tables with the given per-marketplace listing cap.
    #[must_use]
    pub fn builtin(marketplace_cap: usize) -> Self {
        let directory = StoreDirectory::builtin();
        Self {
            geo: GeoFilter::for_directory(&directory),
            directory,
            relevance: RelevanceClassifier::builtin(),
            prices: PriceValidator::builtin(),
            dedupe: Deduplicator::new(marketplace_cap),
        }
    }

    /// Built-in tables extended by an operator rules file.
    #[must_use]
    pub fn from_overrides(overrides: &RuleOverrides, marketplace_cap: usize) -> Self {
        let directory = StoreDirectory::with_overrides(overrides);
        Self {
            geo: GeoFilter::for_directory(&directory),
            directory,
            relevance: RelevanceClassifier::builtin(),
            prices: PriceValidator::with_overrides(overrides),
            dedupe: Deduplicator::new(marketplace_cap),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &StoreDirectory {
        &self.directory
    }

    #[must_use]
    pub fn geo(&self) -> &GeoFilter {
        &self.geo
    }

    #[must_use]
    pub fn prices(&self) -> &PriceValidator {
        &self.prices
    }

    fn is_domestic(&self, raw: &RawOffer) -> bool {
        self.geo.is_domestic(&raw.source_label) && GeoFilter::link_is_domestic(&raw.link)
    }

    /// Filters, validates, resolves, and deduplicates `raws` for `query`.
    ///
    /// With `domestic_only` unset the geographic stage is skipped. Output
    /// keeps first-seen store order; ranking happens later.
    #[must_use]
    pub fn run(
        &self,
        raws: &[RawOffer],
        query: &ProductQuery,
        fetched_at: DateTime<Utc>,
        domestic_only: bool,
    ) -> Vec<ValidatedOffer> {
        let mut validated = Vec::with_capacity(raws.len());

        for raw in raws {
            if domestic_only && !self.is_domestic(raw) {
                tracing::trace!(store = %raw.source_label, stage = "geo", "dropped offer");
                continue;
            }

            if let Err(reason) = self.relevance.check(&raw.title, query) {
                tracing::trace!(
                    store = %raw.source_label,
                    title = %raw.title,
                    stage = "relevance",
                    reason = reason.as_str(),
                    "dropped offer"
                );
                continue;
            }

            let price = match self.prices.validate(&raw.price_text, query) {
                Ok(price) => price,
                Err(reason) => {
                    tracing::trace!(
                        store = %raw.source_label,
                        price = %raw.price_text,
                        stage = "price",
                        reason = reason.as_str(),
                        "dropped offer"
                    );
                    continue;
                }
            };

            validated.push(ValidatedOffer {
                store: self.directory.resolve(&raw.source_label),
                price,
                currency: CURRENCY.to_owned(),
                url: raw.link.clone(),
                image: raw.image_url.clone(),
                fetched_at,
            });
        }

        let before = validated.len();
        let offers = self.dedupe.dedupe(validated);
        tracing::debug!(
            query = query.text(),
            raw = raws.len(),
            validated = before,
            kept = offers.len(),
            "filtered offers"
        );
        offers
    }
}

impl Default for OfferPipeline {
    fn default() -> Self {
        Self::builtin(crate::dedupe::DEFAULT_MARKETPLACE_CAP)
    }
}
