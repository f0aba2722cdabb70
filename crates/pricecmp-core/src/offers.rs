use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One unvalidated result row from the shopping-search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOffer {
    pub title: String,
    /// Free-text store label, e.g. `"Walmart - Seller X"` or `"Amazon.com"`.
    pub source_label: String,
    /// Price exactly as the provider rendered it, e.g. `"$1,099.00"` or `"$28.00/mo"`.
    pub price_text: String,
    pub link: String,
    pub image_url: Option<String>,
}

/// How a store sells: one controlling price, or many independent listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    Catalog,
    Marketplace,
}

/// Canonical identity a raw store label resolves to.
///
/// `store_id` doubles as the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreIdentity {
    pub store_id: String,
    pub display_name: String,
    pub kind: StoreKind,
}

impl StoreIdentity {
    #[must_use]
    pub fn is_marketplace(&self) -> bool {
        self.kind == StoreKind::Marketplace
    }
}

/// An offer that passed the relevance and plausibility checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedOffer {
    pub store: StoreIdentity,
    pub price: Decimal,
    /// ISO 4217 code; always `"USD"` for the domestic result set.
    pub currency: String,
    pub url: String,
    pub image: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Final ranked offer set for one product query.
///
/// `offers` is ranked; `total_stores == offers.len()`; `best_price` is the
/// minimum offer price when `offers` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub offers: Vec<ValidatedOffer>,
    pub total_stores: usize,
    pub best_price: Option<Decimal>,
    pub best_store: Option<String>,
    pub max_savings: Option<Decimal>,
}

impl AggregationResult {
    /// An empty result: "no data available", not an error.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_ranked(Vec::new())
    }

    /// Builds the result from an already-ranked offer list, computing the
    /// summary fields from exactly these offers.
    ///
    /// `best_store` is the first offer in ranked order carrying the minimum
    /// price.
    #[must_use]
    pub fn from_ranked(offers: Vec<ValidatedOffer>) -> Self {
        let best = offers.iter().fold(None::<&ValidatedOffer>, |best, offer| {
            match best {
                Some(current) if current.price <= offer.price => Some(current),
                _ => Some(offer),
            }
        });
        let max_price = offers.iter().map(|o| o.price).max();

        let best_price = best.map(|o| o.price);
        let best_store = best.map(|o| o.store.display_name.clone());
        let max_savings = best_price.zip(max_price).map(|(min, max)| max - min);

        Self {
            total_stores: offers.len(),
            offers,
            best_price,
            best_store,
            max_savings,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}
