//! Product relevance: does a result title describe the queried product?
//!
//! Electronics queries get a strict check (core keyword, model number,
//! variant). Everything else gets a looser keyword-overlap check with
//! per-category adjustments. Both tiers first drop accessories.

use pricecmp_core::{ProductCategory, RawOffer};

use crate::query::{
    ModelVariant, ProductQuery, ELECTRONICS_ACCESSORIES, ELECTRONICS_ADD_ONS,
    FURNITURE_ACCESSORIES, MATTRESS_ACCESSORIES, PRINTER_SUPPLIES,
};
use crate::text::{contains_any, contains_term, find_term, fold, tokens};

/// Words that mark a produce title as a derived product (a recipe, a drink,
/// a snack) rather than the produce itself.
const PRODUCE_DERIVATIVES: &[&str] = &[
    "recipe", "drink", "drinks", "shake", "shakes", "smoothie", "smoothies", "juice", "flavored",
    "flavor", "candy", "chips", "dried", "powder", "sauce", "jam", "jelly", "pie", "snack",
    "snacks", "syrup", "bread", "muffin", "baby food", "puree", "extract", "scented", "candle",
    "plush", "toy", "costume",
];

/// Words that introduce items packed with the product ("TV with Magic Remote").
const BUNDLE_WORDS: &[&str] = &["with", "w/", "includes", "including", "bundle"];

/// Edition and component names that reuse variant words without naming the
/// model line ("Windows 11 Pro", "Intel Core Ultra 7").
const VARIANT_NOISE: &[&str] = &[
    "windows 11 pro", "windows 10 pro", "win 11 pro", "win 10 pro", "windows pro", "core ultra",
    "mini led", "mini-led", "mini displayport", "ultra hd", "ultra-wide", "ultrawide",
];

/// A query model marker this long is a manufacturer SKU; titles may extend
/// it with region or color suffixes (`qn65q80c` → `qn65q80cafxza`).
const SKU_PREFIX_LEN: usize = 5;

/// Why a title was judged irrelevant. Used for drop logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Irrelevance {
    /// Title is an accessory the query did not ask for.
    Accessory,
    /// Title carries none of the query's core keywords.
    MissingKeyword,
    /// Title lacks the query's model number.
    ModelMismatch,
    /// Title names a different variant ("Pro" for a "Pro Max" query).
    VariantMismatch,
    /// Produce query matched a derived product ("banana chips").
    DerivedProduct,
}

impl Irrelevance {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Irrelevance::Accessory => "accessory",
            Irrelevance::MissingKeyword => "missing_keyword",
            Irrelevance::ModelMismatch => "model_mismatch",
            Irrelevance::VariantMismatch => "variant_mismatch",
            Irrelevance::DerivedProduct => "derived_product",
        }
    }
}

/// Title-vs-query relevance rules, keyed by product category.
#[derive(Debug, Clone)]
pub struct RelevanceClassifier {
    electronics_accessories: Vec<&'static str>,
    electronics_add_ons: Vec<&'static str>,
    printer_supplies: Vec<&'static str>,
    mattress_accessories: Vec<&'static str>,
    furniture_accessories: Vec<&'static str>,
    produce_derivatives: Vec<&'static str>,
}

impl RelevanceClassifier {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            electronics_accessories: ELECTRONICS_ACCESSORIES.to_vec(),
            electronics_add_ons: ELECTRONICS_ADD_ONS.to_vec(),
            printer_supplies: PRINTER_SUPPLIES.to_vec(),
            mattress_accessories: MATTRESS_ACCESSORIES.to_vec(),
            furniture_accessories: FURNITURE_ACCESSORIES.to_vec(),
            produce_derivatives: PRODUCE_DERIVATIVES.to_vec(),
        }
    }

    /// `true` if the offer's title describes the queried product.
    #[must_use]
    pub fn is_relevant(&self, raw: &RawOffer, query: &ProductQuery) -> bool {
        self.check(&raw.title, query).is_ok()
    }

    /// Checks a title against the query, naming the failed rule on rejection.
    ///
    /// # Errors
    ///
    /// Returns the [`Irrelevance`] reason when the title does not describe
    /// the queried product.
    pub fn check(&self, title: &str, query: &ProductQuery) -> Result<(), Irrelevance> {
        let title = fold(title);

        if self.is_unwanted_accessory(&title, query) {
            return Err(Irrelevance::Accessory);
        }

        if query.category().is_electronics() {
            check_electronics(&title, query)
        } else {
            self.check_general(&title, query)
        }
    }

    fn is_unwanted_accessory(&self, title: &str, query: &ProductQuery) -> bool {
        let Some(accessories) = self.accessories_for(query.category()) else {
            return false;
        };
        let add_ons: &[&str] = if query.category().is_electronics() {
            self.electronics_add_ons.as_slice()
        } else {
            &[]
        };

        // A query that itself names an accessory is shopping for one.
        if contains_any(query.folded(), accessories) || contains_any(query.folded(), add_ons) {
            return false;
        }
        if contains_any(title, accessories) {
            return true;
        }

        add_ons.iter().any(|term| {
            find_term(title, term).is_some_and(|at| !contains_any(&title[..at], BUNDLE_WORDS))
        })
    }

    fn accessories_for(&self, category: ProductCategory) -> Option<&[&'static str]> {
        match category {
            c if c.is_electronics() => Some(self.electronics_accessories.as_slice()),
            ProductCategory::Printer => Some(self.printer_supplies.as_slice()),
            ProductCategory::Mattress => Some(self.mattress_accessories.as_slice()),
            ProductCategory::Desk | ProductCategory::Chair | ProductCategory::Furniture => {
                Some(self.furniture_accessories.as_slice())
            }
            _ => None,
        }
    }

    fn check_general(&self, title: &str, query: &ProductQuery) -> Result<(), Irrelevance> {
        let category = query.category();

        if category == ProductCategory::Produce {
            let derived = self
                .produce_derivatives
                .iter()
                .any(|term| contains_term(title, term) && !contains_term(query.folded(), term));
            if derived {
                return Err(Irrelevance::DerivedProduct);
            }
        }

        if contains_any(title, category_nouns(category)) {
            return Ok(());
        }

        let title_stems: Vec<&str> = tokens(title).into_iter().map(stem).collect();
        let overlaps = |word: &str| title_stems.contains(&stem(word));

        let matched = if query.keywords().is_empty() {
            // Short queries ("tv", "ink") fall back to any two-letter word.
            tokens(query.folded())
                .into_iter()
                .filter(|t| t.chars().count() >= 2)
                .any(overlaps)
        } else {
            query.keywords().iter().any(|k| overlaps(k))
        };

        if matched {
            Ok(())
        } else {
            Err(Irrelevance::MissingKeyword)
        }
    }
}

impl Default for RelevanceClassifier {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_electronics(title: &str, query: &ProductQuery) -> Result<(), Irrelevance> {
    let keywords = query.keywords();
    if !keywords.is_empty() && !keywords.iter().any(|k| title.contains(k.as_str())) {
        return Err(Irrelevance::MissingKeyword);
    }

    if let Some(marker) = query.model_markers().first() {
        let title_tokens = tokens(title);
        let has_marker = title_tokens.iter().any(|t| {
            *t == marker.as_str()
                || (marker.len() >= SKU_PREFIX_LEN && t.starts_with(marker.as_str()))
                || keywords
                    .iter()
                    .any(|k| t.strip_prefix(k.as_str()) == Some(marker.as_str()))
        });
        if !has_marker {
            return Err(Irrelevance::ModelMismatch);
        }
    }

    // Screen-tech words ("mini-led") collide with variant names on TVs.
    if query.category() != ProductCategory::Television {
        let wanted = query.variant();
        let found = title_variant(title);
        // Only phone lines sell a distinct model under the bare base name.
        let base_must_match = wanted == ModelVariant::Base
            && query.category().is_phone()
            && !query.model_markers().is_empty();
        if (wanted != ModelVariant::Base || base_must_match) && found != wanted {
            return Err(Irrelevance::VariantMismatch);
        }
    }

    Ok(())
}

/// Variant named by the title's model line, ignoring edition and component
/// names.
fn title_variant(title: &str) -> ModelVariant {
    let mut cleaned = title.to_owned();
    for noise in VARIANT_NOISE {
        cleaned = cleaned.replace(noise, " ");
    }
    ModelVariant::detect(&cleaned)
}

/// Product-type nouns that make a title relevant on their own for loosely
/// matched categories.
fn category_nouns(category: ProductCategory) -> &'static [&'static str] {
    match category {
        ProductCategory::Printer => &["printer", "scanner"],
        ProductCategory::Mattress => &["mattress"],
        ProductCategory::Desk => &["desk"],
        ProductCategory::Chair => &["chair"],
        ProductCategory::Furniture => &["furniture"],
        _ => &[],
    }
}

/// Drops a plural `s` so `"bananas"` overlaps `"banana"`.
fn stem(word: &str) -> &str {
    if word.len() > 3 {
        word.strip_suffix('s').unwrap_or(word)
    } else {
        word
    }
}

#[cfg(test)]
#[path = "relevance_test.rs"]
mod tests;
