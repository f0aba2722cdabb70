//! Store directory: label resolution, marketplace classification, and
//! display-priority tiers for well-known US retailers.

use std::collections::HashMap;

use pricecmp_core::{RuleOverrides, StoreIdentity, StoreKind};

use crate::text::{contains_any, fold, strip_punctuation};

/// Tier assigned to stores absent from the tier table.
pub const UNRANKED_TIER: u8 = 100;

/// Identity used when a label has nothing left after punctuation stripping.
const UNKNOWN_STORE: &str = "unknown";

/// Built-in retailers: `(id, display name, tier, kind, label patterns)`.
///
/// Order matters. A label is resolved by the first entry with a matching
/// pattern, so narrower names ("nordstrom rack", "whole foods") sit above
/// the broader names they contain. Patterns are folded (lowercase, no
/// apostrophes) and matched on word boundaries.
const BUILTIN_STORES: &[(&str, &str, Option<u8>, StoreKind, &[&str])] = &[
    // Tier 1: mass retailers.
    ("walmart", "Walmart", Some(1), StoreKind::Catalog, &["walmart"]),
    ("wholefoods", "Whole Foods Market", Some(3), StoreKind::Catalog, &["whole foods"]),
    ("amazon", "Amazon", Some(1), StoreKind::Catalog, &["amazon"]),
    ("target", "Target", Some(1), StoreKind::Catalog, &["target"]),
    ("costco", "Costco", Some(1), StoreKind::Catalog, &["costco"]),
    ("samsclub", "Sam's Club", Some(1), StoreKind::Catalog, &["sams club", "samsclub"]),
    // Tier 2: major department and specialty chains.
    ("bestbuy", "Best Buy", Some(2), StoreKind::Catalog, &["best buy", "bestbuy"]),
    ("homedepot", "The Home Depot", Some(2), StoreKind::Catalog, &["home depot", "the home depot", "homedepot"]),
    ("lowes", "Lowe's", Some(2), StoreKind::Catalog, &["lowes"]),
    ("apple", "Apple", Some(2), StoreKind::Catalog, &["apple store", "apple.com"]),
    ("macys", "Macy's", Some(2), StoreKind::Catalog, &["macys"]),
    ("kohls", "Kohl's", Some(2), StoreKind::Catalog, &["kohls"]),
    ("nordstromrack", "Nordstrom Rack", Some(3), StoreKind::Catalog, &["nordstrom rack"]),
    ("nordstrom", "Nordstrom", Some(2), StoreKind::Catalog, &["nordstrom"]),
    ("jcpenney", "JCPenney", Some(2), StoreKind::Catalog, &["jcpenney", "jc penney"]),
    ("ebay", "eBay", Some(2), StoreKind::Marketplace, &["ebay"]),
    ("staples", "Staples", Some(2), StoreKind::Catalog, &["staples"]),
    (
        "officedepot",
        "Office Depot",
        Some(2),
        StoreKind::Catalog,
        &["office depot", "officedepot", "officemax"],
    ),
    ("wayfair", "Wayfair", Some(2), StoreKind::Catalog, &["wayfair"]),
    ("cvs", "CVS Pharmacy", Some(2), StoreKind::Catalog, &["cvs"]),
    ("walgreens", "Walgreens", Some(2), StoreKind::Catalog, &["walgreens"]),
    ("kroger", "Kroger", Some(2), StoreKind::Catalog, &["kroger"]),
    (
        "dickssportinggoods",
        "Dick's Sporting Goods",
        Some(2),
        StoreKind::Catalog,
        &["dicks sporting goods", "dickssportinggoods"],
    ),
    // Tier 3: other recognized chains and brand stores.
    ("bjs", "BJ's Wholesale Club", Some(3), StoreKind::Catalog, &["bjs wholesale", "bjs"]),
    ("newegg", "Newegg", Some(3), StoreKind::Catalog, &["newegg"]),
    (
        "bhphoto",
        "B&H Photo-Video",
        Some(3),
        StoreKind::Catalog,
        &["b&h", "bhphotovideo"],
    ),
    ("adorama", "Adorama", Some(3), StoreKind::Catalog, &["adorama"]),
    ("gamestop", "GameStop", Some(3), StoreKind::Catalog, &["gamestop"]),
    ("samsung", "Samsung", Some(3), StoreKind::Catalog, &["samsung"]),
    ("dell", "Dell", Some(3), StoreKind::Catalog, &["dell"]),
    ("hp", "HP", Some(3), StoreKind::Catalog, &["hp store", "hp.com"]),
    ("lenovo", "Lenovo", Some(3), StoreKind::Catalog, &["lenovo"]),
    ("verizon", "Verizon", Some(3), StoreKind::Catalog, &["verizon"]),
    ("att", "AT&T", Some(3), StoreKind::Catalog, &["at&t", "att.com"]),
    ("tmobile", "T-Mobile", Some(3), StoreKind::Catalog, &["t-mobile", "tmobile"]),
    ("ikea", "IKEA", Some(3), StoreKind::Catalog, &["ikea"]),
    ("overstock", "Overstock", Some(3), StoreKind::Catalog, &["overstock"]),
    (
        "ashley",
        "Ashley",
        Some(3),
        StoreKind::Catalog,
        &["ashley furniture", "ashleyfurniture", "ashley homestore"],
    ),
    (
        "mattressfirm",
        "Mattress Firm",
        Some(3),
        StoreKind::Catalog,
        &["mattress firm", "mattressfirm"],
    ),
    ("sleepnumber", "Sleep Number", Some(3), StoreKind::Catalog, &["sleep number"]),
    ("safeway", "Safeway", Some(3), StoreKind::Catalog, &["safeway"]),
    ("albertsons", "Albertsons", Some(3), StoreKind::Catalog, &["albertsons"]),
    ("traderjoes", "Trader Joe's", Some(3), StoreKind::Catalog, &["trader joes"]),
    ("publix", "Publix", Some(3), StoreKind::Catalog, &["publix"]),
    ("heb", "H-E-B", Some(3), StoreKind::Catalog, &["h-e-b", "heb"]),
    ("meijer", "Meijer", Some(3), StoreKind::Catalog, &["meijer"]),
    ("gianteagle", "Giant Eagle", Some(3), StoreKind::Catalog, &["giant eagle"]),
    ("giant", "Giant Food", Some(3), StoreKind::Catalog, &["giant food", "giantfood"]),
    ("aldi", "Aldi", Some(3), StoreKind::Catalog, &["aldi"]),
    ("sprouts", "Sprouts Farmers Market", Some(3), StoreKind::Catalog, &["sprouts"]),
    ("riteaid", "Rite Aid", Some(3), StoreKind::Catalog, &["rite aid"]),
    ("ulta", "Ulta Beauty", Some(3), StoreKind::Catalog, &["ulta"]),
    ("sephora", "Sephora", Some(3), StoreKind::Catalog, &["sephora"]),
    ("dollargeneral", "Dollar General", Some(3), StoreKind::Catalog, &["dollar general"]),
    ("academy", "Academy Sports + Outdoors", Some(3), StoreKind::Catalog, &["academy sports"]),
    ("rei", "REI", Some(3), StoreKind::Catalog, &["rei", "rei.com"]),
    ("petsmart", "PetSmart", Some(3), StoreKind::Catalog, &["petsmart"]),
    ("petco", "Petco", Some(3), StoreKind::Catalog, &["petco"]),
    ("belk", "Belk", Some(3), StoreKind::Catalog, &["belk"]),
    ("dillards", "Dillard's", Some(3), StoreKind::Catalog, &["dillards"]),
    ("bloomingdales", "Bloomingdale's", Some(3), StoreKind::Catalog, &["bloomingdales"]),
    // Peer-to-peer and resale marketplaces, unranked.
    ("mercari", "Mercari", None, StoreKind::Marketplace, &["mercari"]),
    ("poshmark", "Poshmark", None, StoreKind::Marketplace, &["poshmark"]),
    ("offerup", "OfferUp", None, StoreKind::Marketplace, &["offerup"]),
    (
        "facebookmarketplace",
        "Facebook Marketplace",
        None,
        StoreKind::Marketplace,
        &["facebook marketplace", "facebook"],
    ),
    ("swappa", "Swappa", None, StoreKind::Marketplace, &["swappa"]),
    ("backmarket", "Back Market", None, StoreKind::Marketplace, &["back market", "backmarket"]),
    ("etsy", "Etsy", None, StoreKind::Marketplace, &["etsy"]),
];

/// One known retailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub id: String,
    pub name: String,
    /// Priority tier; `None` ranks as [`UNRANKED_TIER`].
    pub tier: Option<u8>,
    pub kind: StoreKind,
    pub patterns: Vec<String>,
}

impl StoreEntry {
    fn identity(&self) -> StoreIdentity {
        StoreIdentity {
            store_id: self.id.clone(),
            display_name: self.name.clone(),
            kind: self.kind,
        }
    }
}

/// Ordered table of known retailers.
///
/// Backs the resolver, the geographic allowlist, and the ranker's tier
/// lookup, so all three agree on which stores exist.
#[derive(Debug, Clone)]
pub struct StoreDirectory {
    entries: Vec<StoreEntry>,
    tiers: HashMap<String, u8>,
}

impl StoreDirectory {
    /// The built-in retailer table.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN_STORES
            .iter()
            .map(|(id, name, tier, kind, patterns)| StoreEntry {
                id: (*id).to_owned(),
                name: (*name).to_owned(),
                tier: *tier,
                kind: *kind,
                patterns: patterns.iter().map(|p| (*p).to_owned()).collect(),
            })
            .collect();
        Self::from_entries(entries)
    }

    /// The built-in table with operator overrides applied: extra stores are
    /// appended after the built-in entries, and listed store ids become
    /// marketplaces.
    #[must_use]
    pub fn with_overrides(overrides: &RuleOverrides) -> Self {
        let mut entries = Self::builtin().entries;

        entries.extend(overrides.extra_stores.iter().map(|extra| StoreEntry {
            id: extra.id.trim().to_owned(),
            name: extra.name.trim().to_owned(),
            tier: extra.tier,
            kind: if extra.marketplace {
                StoreKind::Marketplace
            } else {
                StoreKind::Catalog
            },
            patterns: vec![fold(extra.pattern.trim())],
        }));

        for entry in &mut entries {
            if overrides
                .marketplace_stores
                .iter()
                .any(|id| id.trim() == entry.id)
            {
                entry.kind = StoreKind::Marketplace;
            }
        }

        let mut directory = Self::from_entries(entries);
        directory.extra_marketplaces(&overrides.marketplace_stores);
        directory
    }

    fn from_entries(entries: Vec<StoreEntry>) -> Self {
        let mut tiers = HashMap::new();
        for entry in &entries {
            if let Some(tier) = entry.tier {
                tiers.entry(entry.id.clone()).or_insert(tier);
            }
        }
        Self { entries, tiers }
    }

    /// Marketplace ids that name no directory entry still apply to
    /// unknown-store identities with that id.
    fn extra_marketplaces(&mut self, ids: &[String]) {
        for id in ids {
            let id = id.trim();
            if !self.entries.iter().any(|e| e.id == id) {
                self.entries.push(StoreEntry {
                    id: id.to_owned(),
                    name: id.to_owned(),
                    tier: None,
                    kind: StoreKind::Marketplace,
                    patterns: Vec::new(),
                });
            }
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[StoreEntry] {
        &self.entries
    }

    /// Maps a free-text store label to its canonical identity.
    ///
    /// A label equal to a display name ("Apple", "HP") resolves to that
    /// store; otherwise the first entry with a matching pattern wins. Unknown
    /// labels become their own identity: the folded, punctuation-stripped
    /// label serves as both id and display name.
    #[must_use]
    pub fn resolve(&self, source_label: &str) -> StoreIdentity {
        let stripped = strip_punctuation(source_label);
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| strip_punctuation(&e.name) == stripped)
        {
            return entry.identity();
        }

        let folded = fold(source_label);
        if let Some(entry) = self
            .entries
            .iter()
            .find(|e| contains_any(&folded, &e.patterns))
        {
            return entry.identity();
        }

        let id = if stripped.is_empty() {
            UNKNOWN_STORE.to_owned()
        } else {
            stripped
        };
        let kind = self
            .entries
            .iter()
            .find(|e| e.id == id)
            .map_or(StoreKind::Catalog, |e| e.kind);
        StoreIdentity {
            store_id: id.clone(),
            display_name: id,
            kind,
        }
    }

    /// Priority tier for a canonical store id.
    #[must_use]
    pub fn tier(&self, store_id: &str) -> u8 {
        self.tiers.get(store_id).copied().unwrap_or(UNRANKED_TIER)
    }
}

impl Default for StoreDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
