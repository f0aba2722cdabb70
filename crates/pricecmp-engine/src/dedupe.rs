//! Per-store deduplication.
//!
//! Catalog stores collapse to their lowest price. Marketplace stores keep
//! up to `marketplace_cap` distinct listings in arrival order.

use std::collections::HashMap;

use pricecmp_core::ValidatedOffer;

/// Default number of listings kept per marketplace store.
pub const DEFAULT_MARKETPLACE_CAP: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deduplicator {
    marketplace_cap: usize,
}

impl Deduplicator {
    #[must_use]
    pub fn new(marketplace_cap: usize) -> Self {
        Self { marketplace_cap }
    }

    #[must_use]
    pub fn marketplace_cap(&self) -> usize {
        self.marketplace_cap
    }

    /// Collapses `offers` by store. Output keeps first-seen order: a catalog
    /// store stays at the position of its first offer even when a later,
    /// cheaper offer replaces it.
    #[must_use]
    pub fn dedupe(&self, offers: Vec<ValidatedOffer>) -> Vec<ValidatedOffer> {
        let mut kept: Vec<ValidatedOffer> = Vec::with_capacity(offers.len());
        let mut catalog_slot: HashMap<String, usize> = HashMap::new();
        let mut marketplace_count: HashMap<String, usize> = HashMap::new();

        for offer in offers {
            if offer.store.is_marketplace() {
                let count = marketplace_count
                    .entry(offer.store.store_id.clone())
                    .or_insert(0);
                if *count < self.marketplace_cap {
                    *count += 1;
                    kept.push(offer);
                } else {
                    tracing::trace!(
                        store = %offer.store.store_id,
                        cap = self.marketplace_cap,
                        "marketplace listing cap reached"
                    );
                }
                continue;
            }

            match catalog_slot.get(&offer.store.store_id) {
                Some(&slot) => {
                    if offer.price < kept[slot].price {
                        kept[slot] = offer;
                    }
                }
                None => {
                    catalog_slot.insert(offer.store.store_id.clone(), kept.len());
                    kept.push(offer);
                }
            }
        }

        kept
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(DEFAULT_MARKETPLACE_CAP)
    }
}
