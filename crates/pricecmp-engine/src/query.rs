//! Query parsing: category inference plus the keyword, model-number, and
//! variant markers the relevance classifier compares titles against.

use pricecmp_core::ProductCategory;

use crate::text::{contains_any, fold, tokens};

/// Words that never count as a core keyword.
pub(crate) const STOP_WORDS: &[&str] = &[
    "with", "from", "that", "this", "pack", "count", "inch", "inches", "size", "brand", "unlocked",
    "renewed", "refurbished", "model", "edition", "version", "color", "black", "white", "silver",
    "gray", "grey", "blue", "best", "price", "cheap", "deal", "deals", "sale", "store",
];

/// Named model variants, checked in order. Multi-word variants come first so
/// `"pro max"` is never read as `"pro"`.
const VARIANTS: &[(ModelVariant, &[&str])] = &[
    (ModelVariant::ProMax, &["pro max", "promax"]),
    (ModelVariant::Ultra, &["ultra"]),
    (ModelVariant::Plus, &["plus"]),
    (ModelVariant::Mini, &["mini"]),
    (ModelVariant::Air, &["air"]),
    (ModelVariant::Pro, &["pro"]),
];

/// Accessory words for phones, tablets, laptops, and TVs.
pub(crate) const ELECTRONICS_ACCESSORIES: &[&str] = &[
    "case", "cases", "cover", "covers", "charger", "cable", "cables", "screen protector",
    "protector", "tempered glass", "skin", "holster", "adapter", "sleeve", "strap", "power bank",
    "battery pack", "wallet", "dock", "replacement", "compatible with", "earpads",
    "universal remote",
];

/// Items that ship with a device as often as they sell alone ("TV with
/// Magic Remote"). They mark an accessory unless a bundle word such as
/// "with" comes before them in the title.
pub(crate) const ELECTRONICS_ADD_ONS: &[&str] = &[
    "remote", "stand", "band", "bands", "stylus", "charging", "mount", "pen",
];

pub(crate) const PRINTER_SUPPLIES: &[&str] = &[
    "ink", "toner", "cartridge", "cartridges", "drum", "ribbon", "paper", "refill", "printhead",
];

pub(crate) const MATTRESS_ACCESSORIES: &[&str] = &[
    "protector", "topper", "pad", "sheet", "sheets", "cover", "encasement", "pillow", "pillows",
    "frame", "foundation", "box spring",
];

pub(crate) const FURNITURE_ACCESSORIES: &[&str] = &[
    "mat", "casters", "caster", "cushion", "slipcover", "cover", "armrest", "armrests", "pads",
    "glides", "wheels", "replacement", "hardware", "parts",
];

/// Named variant of an electronics model line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelVariant {
    Base,
    Pro,
    ProMax,
    Plus,
    Ultra,
    Mini,
    Air,
}

impl ModelVariant {
    /// Reads the variant named in folded text; `Base` when none is named.
    #[must_use]
    pub fn detect(folded: &str) -> Self {
        VARIANTS
            .iter()
            .find(|(_, markers)| contains_any(folded, markers))
            .map_or(ModelVariant::Base, |(variant, _)| *variant)
    }
}

/// One inference rule: the query must carry a word from `any_of`, a word
/// from `and_any_of` when that list is non-empty, and nothing from `none_of`.
#[derive(Debug, Clone)]
struct CategoryRule {
    category: ProductCategory,
    any_of: Vec<&'static str>,
    and_any_of: Vec<&'static str>,
    none_of: Vec<&'static str>,
}

impl CategoryRule {
    fn new(category: ProductCategory, any_of: &[&'static str]) -> Self {
        Self {
            category,
            any_of: any_of.to_vec(),
            and_any_of: Vec::new(),
            none_of: Vec::new(),
        }
    }

    fn and_any_of(mut self, words: &[&'static str]) -> Self {
        self.and_any_of = words.to_vec();
        self
    }

    fn none_of(mut self, words: &[&'static str]) -> Self {
        self.none_of = words.to_vec();
        self
    }

    fn matches(&self, folded: &str) -> bool {
        contains_any(folded, &self.any_of)
            && (self.and_any_of.is_empty() || contains_any(folded, &self.and_any_of))
            && !contains_any(folded, &self.none_of)
    }
}

/// Ordered keyword table for category inference. First matching rule wins.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    rules: Vec<CategoryRule>,
}

impl CategoryRules {
    /// The built-in inference table.
    #[must_use]
    pub fn builtin() -> Self {
        use ProductCategory as C;

        const PHONE_FAMILIES: &[&str] = &["iphone", "galaxy", "pixel"];
        const NOT_PHONES: &[&str] = &[
            "galaxy tab", "galaxy watch", "galaxy buds", "galaxy book", "pixel watch",
            "pixel buds", "pixel tablet",
        ];
        const DEVICE_FAMILIES: &[&str] = &[
            "iphone", "galaxy", "pixel", "ipad", "tablet", "laptop", "macbook", "airpods", "tv",
            "kindle", "switch",
        ];

        let accessory_words: Vec<&'static str> = ELECTRONICS_ACCESSORIES
            .iter()
            .chain(ELECTRONICS_ADD_ONS)
            .copied()
            .collect();

        let rules = vec![
            // Supplies before devices: "printer ink" is not a printer.
            CategoryRule::new(C::OfficeSupply, PRINTER_SUPPLIES)
                .and_any_of(&["printer", "ink", "toner", "cartridge", "cartridges", "printhead"]),
            // Accessory queries keep the strict relevance tier but carry no device floor.
            CategoryRule::new(C::OtherElectronics, DEVICE_FAMILIES)
                .and_any_of(&accessory_words)
                .none_of(&["tv stand", "tv console"]),
            CategoryRule::new(C::PhoneProMax, PHONE_FAMILIES)
                .and_any_of(&["pro max", "promax", "ultra"])
                .none_of(NOT_PHONES),
            CategoryRule::new(C::PhonePro, PHONE_FAMILIES)
                .and_any_of(&["pro"])
                .none_of(NOT_PHONES),
            CategoryRule::new(C::PhoneBase, PHONE_FAMILIES).none_of(NOT_PHONES),
            CategoryRule::new(
                C::Tablet,
                &[
                    "ipad", "tablet", "galaxy tab", "pixel tablet", "surface pro", "fire hd",
                    "kindle fire",
                ],
            ),
            CategoryRule::new(
                C::Laptop,
                &[
                    "laptop", "notebook", "macbook", "chromebook", "galaxy book", "thinkpad",
                    "ideapad", "zenbook",
                    "vivobook", "inspiron", "xps", "spectre", "surface laptop",
                ],
            )
            .none_of(&["paper", "spiral", "college ruled", "wide ruled"]),
            CategoryRule::new(C::Television, &["tv", "television", "oled tv", "qled"])
                .none_of(&["tv stand", "tv console"]),
            CategoryRule::new(
                C::OtherElectronics,
                &[
                    "airpods", "headphones", "earbuds", "smartwatch", "apple watch", "galaxy watch",
                    "galaxy buds", "pixel watch", "pixel buds", "playstation",
                    "ps5", "xbox", "nintendo switch", "camera", "monitor", "speaker", "soundbar",
                    "kindle", "drone", "router", "graphics card", "gpu",
                ],
            ),
            CategoryRule::new(
                C::Printer,
                &[
                    "printer", "scanner", "officejet", "laserjet", "deskjet", "ecotank", "pixma",
                ],
            ),
            CategoryRule::new(C::Mattress, &["mattress"]).none_of(MATTRESS_ACCESSORIES),
            CategoryRule::new(
                C::OfficeSupply,
                &[
                    "pen", "pens", "pencil", "pencils", "notebook", "notebooks", "stapler",
                    "binder", "binders", "folder",
                    "folders", "envelopes", "sticky notes", "highlighter", "highlighters",
                    "marker", "markers", "desk organizer", "tape", "paper clips", "printer paper",
                ],
            ),
            CategoryRule::new(C::Chair, &["chair", "chairs", "recliner"]),
            CategoryRule::new(C::Desk, &["desk", "desks", "workstation"]),
            CategoryRule::new(
                C::Furniture,
                &[
                    "sofa", "couch", "sectional", "loveseat", "futon", "table", "bookshelf",
                    "bookcase", "cabinet", "dresser", "nightstand", "bed frame", "ottoman",
                    "wardrobe", "tv stand", "tv console",
                ],
            ),
            CategoryRule::new(
                C::Produce,
                &[
                    "banana", "bananas", "apples", "avocado", "avocados", "strawberries",
                    "blueberries", "grapes", "lettuce", "spinach", "potatoes", "onions", "carrots",
                    "lemons", "limes", "broccoli", "cucumbers", "tomatoes", "peaches", "mangoes",
                    "kale", "celery", "produce",
                ],
            ),
            CategoryRule::new(
                C::Grocery,
                &[
                    "milk", "eggs", "bread", "cereal", "coffee", "rice", "pasta", "juice", "snacks",
                    "chips", "butter", "cheese", "yogurt", "flour", "sugar", "olive oil", "chicken",
                    "beef", "oatmeal", "grocery",
                ],
            ),
        ];

        Self { rules }
    }

    /// Infers the category of a query. Falls back to [`ProductCategory::General`].
    #[must_use]
    pub fn infer(&self, query: &str) -> ProductCategory {
        let folded = fold(query);
        self.rules
            .iter()
            .find(|r| r.matches(&folded))
            .map_or(ProductCategory::General, |r| r.category)
    }
}

impl Default for CategoryRules {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A product query with everything derived from its text.
///
/// Immutable for the lifetime of one aggregation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    text: String,
    folded: String,
    category: ProductCategory,
    keywords: Vec<String>,
    model_markers: Vec<String>,
    variant: ModelVariant,
}

impl ProductQuery {
    /// Parses `text` using the built-in category table.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::with_rules(text, &CategoryRules::builtin())
    }

    #[must_use]
    pub fn with_rules(text: &str, rules: &CategoryRules) -> Self {
        let text = text.trim().to_owned();
        let folded = fold(&text);
        let category = rules.infer(&text);
        let keywords = core_keywords(&folded);
        let model_markers = tokens(&folded)
            .into_iter()
            .filter(|t| is_model_marker(t))
            .map(str::to_owned)
            .collect();
        let variant = ModelVariant::detect(&folded);

        Self {
            text,
            folded,
            category,
            keywords,
            model_markers,
            variant,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lowercased, apostrophe-free query text.
    #[must_use]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    #[must_use]
    pub fn category(&self) -> ProductCategory {
        self.category
    }

    /// Query words longer than three characters that are neither stop words
    /// nor numeric (numbers are covered by [`Self::model_markers`]).
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Model-number tokens (`"17"`, `"s24"`, `"m3"`) in query order.
    /// Storage and size tokens (`"256gb"`, `"65in"`) are excluded.
    #[must_use]
    pub fn model_markers(&self) -> &[String] {
        &self.model_markers
    }

    #[must_use]
    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// Word count of the original text.
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Query words with more than three characters, minus stop words and
/// anything carrying a digit.
pub(crate) fn core_keywords(folded: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in tokens(folded) {
        if token.chars().count() > 3
            && !token.chars().any(|c| c.is_ascii_digit())
            && !STOP_WORDS.contains(&token)
            && !keywords.iter().any(|k| k == token)
        {
            keywords.push(token.to_owned());
        }
    }
    keywords
}

/// `true` for tokens that identify a model: contain a digit, are short, and
/// are not a storage capacity or a screen size.
fn is_model_marker(token: &str) -> bool {
    const UNIT_SUFFIXES: &[&str] = &[
        "gb", "tb", "mb", "in", "inch", "mm", "hz", "w", "mah", "oz", "lb", "ct", "pk",
    ];

    if !token.chars().any(|c| c.is_ascii_digit()) || token.len() > 8 {
        return false;
    }
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    // Leading digits followed by a unit ("256gb", "65in") describe size, not model.
    if digits_end > 0 && UNIT_SUFFIXES.contains(&&token[digits_end..]) {
        return false;
    }
    true
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
