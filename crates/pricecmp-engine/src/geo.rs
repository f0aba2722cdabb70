//! Geographic allowlist: keeps offers from known US retailers only.
//!
//! Two stages. A label or URL carrying a non-domestic marker is rejected
//! outright; otherwise it must match a known-domestic store. Anything that
//! matches neither list is rejected.

use crate::stores::StoreDirectory;
use crate::text::{contains_any, contains_term, fold, starts_with_term, strip_punctuation};

/// Country-code domain suffixes of non-US storefronts.
const FOREIGN_DOMAIN_SUFFIXES: &[&str] = &[
    ".co.uk", ".uk", ".ca", ".com.au", ".au", ".de", ".fr", ".es", ".it", ".nl", ".co.in", ".in",
    ".co.jp", ".jp", ".cn", ".com.mx", ".mx", ".com.br", ".br", ".ie", ".co.nz", ".nz", ".sg",
    ".hk", ".se", ".ch", ".pl", ".be", ".at", ".dk", ".no", ".kr",
];

/// Country names that retailers append to regional storefront labels
/// ("Amazon UK", "Best Buy Canada").
const FOREIGN_REGION_WORDS: &[&str] = &[
    "uk", "canada", "australia", "india", "mexico", "germany", "japan", "china", "europe",
];

/// Cross-border marketplaces that ship from outside the US.
const INTERNATIONAL_MARKETPLACES: &[&str] = &[
    "aliexpress", "alibaba", "dhgate", "banggood", "lightinthebox", "wish",
];

/// Allowlist of domestic store patterns, taken from a [`StoreDirectory`].
#[derive(Debug, Clone)]
pub struct GeoFilter {
    patterns: Vec<String>,
    /// Punctuation-stripped display names, matched against the whole label.
    names: Vec<String>,
}

impl GeoFilter {
    /// Allows every store in `directory`: a label must start with one of its
    /// patterns, carry `<pattern>.com`, or equal a display name.
    #[must_use]
    pub fn for_directory(directory: &StoreDirectory) -> Self {
        let mut patterns: Vec<String> = Vec::new();
        let mut names: Vec<String> = Vec::new();
        for entry in directory.entries() {
            for pattern in &entry.patterns {
                if !pattern.is_empty() && !patterns.contains(pattern) {
                    patterns.push(pattern.clone());
                }
            }
            let name = strip_punctuation(&entry.name);
            if !name.is_empty() && !names.contains(&name) {
                names.push(name);
            }
        }
        Self { patterns, names }
    }

    /// `true` if a store label or URL belongs to a known US retailer.
    #[must_use]
    pub fn is_domestic(&self, label_or_url: &str) -> bool {
        let folded = fold(label_or_url.trim());
        let subject = host_of(&folded).unwrap_or(&folded);

        if has_foreign_marker(subject) {
            return false;
        }

        let stripped = strip_punctuation(subject);
        if self.names.contains(&stripped) {
            return true;
        }

        self.patterns.iter().any(|pattern| {
            starts_with_term(subject, pattern)
                || (!pattern.contains(' ') && contains_term(subject, &format!("{pattern}.com")))
        })
    }

    /// `true` unless the link's host is a non-US storefront.
    ///
    /// Links are checked for foreign markers only: a US label with a link
    /// through a shopping redirect is still domestic.
    #[must_use]
    pub fn link_is_domestic(link: &str) -> bool {
        let folded = fold(link.trim());
        host_of(&folded).is_none_or(|host| !has_foreign_suffix(host))
    }
}

impl Default for GeoFilter {
    fn default() -> Self {
        Self::for_directory(&StoreDirectory::builtin())
    }
}

fn has_foreign_marker(folded: &str) -> bool {
    has_foreign_suffix(folded)
        || contains_any(folded, FOREIGN_REGION_WORDS)
        || contains_any(folded, INTERNATIONAL_MARKETPLACES)
}

/// `true` if a foreign suffix ends a domain in `folded`, i.e. is followed by
/// the end of text, a path, a port, or whitespace.
fn has_foreign_suffix(folded: &str) -> bool {
    FOREIGN_DOMAIN_SUFFIXES.iter().any(|suffix| {
        folded.match_indices(suffix).any(|(start, _)| {
            folded[start + suffix.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_alphanumeric() && c != '.')
        })
    })
}

/// Host portion of a URL, with any leading `www.` removed. `None` when the
/// text has no scheme.
fn host_of(folded: &str) -> Option<&str> {
    let (_, rest) = folded.split_once("://")?;
    let host = rest.split(['/', '?', '#', ':']).next().unwrap_or(rest);
    Some(host.strip_prefix("www.").unwrap_or(host))
}
