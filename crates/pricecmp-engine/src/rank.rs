//! Display ordering: store priority tier, then price, then store name.

use std::cmp::Ordering;

use pricecmp_core::ValidatedOffer;

use crate::stores::StoreDirectory;

/// Orders offers by the store directory's tier table.
#[derive(Debug, Clone)]
pub struct Ranker {
    directory: StoreDirectory,
}

impl Ranker {
    #[must_use]
    pub fn new(directory: StoreDirectory) -> Self {
        Self { directory }
    }

    #[must_use]
    pub fn tier(&self, offer: &ValidatedOffer) -> u8 {
        self.directory.tier(&offer.store.store_id)
    }

    /// Sorts by ascending tier, then ascending price, then case-insensitive
    /// display name. The URL breaks any remaining tie so the order never
    /// depends on input order.
    #[must_use]
    pub fn rank(&self, mut offers: Vec<ValidatedOffer>) -> Vec<ValidatedOffer> {
        offers.sort_by(|a, b| self.compare(a, b));
        offers
    }

    fn compare(&self, a: &ValidatedOffer, b: &ValidatedOffer) -> Ordering {
        self.tier(a)
            .cmp(&self.tier(b))
            .then_with(|| a.price.cmp(&b.price))
            .then_with(|| {
                a.store
                    .display_name
                    .to_lowercase()
                    .cmp(&b.store.display_name.to_lowercase())
            })
            .then_with(|| a.url.cmp(&b.url))
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(StoreDirectory::builtin())
    }
}
