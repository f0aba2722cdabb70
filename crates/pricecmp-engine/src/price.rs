//! Price text parsing.
//!
//! Provider price text is display copy: `"$1,099.00"`, `"From $499.99"`,
//! `"$28.00/mo"`, `"1099"`. Only the first amount is read.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::text::{contains_any, fold};

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,3}(?:,\d{3})+|\d+)(\.\d+)?").expect("valid amount regex")
});

/// Slash-style installment suffixes; matched as plain substrings since
/// `"$28/mo"` has no word boundary before the slash.
const SLASH_MARKERS: &[&str] = &["/mo", "/month", "/wk", "/week"];

/// Worded installment markers, matched on word boundaries.
const WORD_MARKERS: &[&str] = &[
    "per month",
    "a month",
    "monthly",
    "mo.",
    "per week",
    "weekly",
];

/// Extracts the first amount from provider price text.
///
/// Returns `None` when the text carries no digits.
#[must_use]
pub fn parse_price(text: &str) -> Option<Decimal> {
    let caps = AMOUNT_RE.captures(text)?;
    let whole = caps.get(1)?.as_str().replace(',', "");
    let fraction = caps.get(2).map_or("", |m| m.as_str());
    Decimal::from_str(&format!("{whole}{fraction}")).ok()
}

/// `true` if the text describes a recurring payment rather than a sale price.
#[must_use]
pub fn is_installment_text(text: &str) -> bool {
    let folded = fold(text).replace("/ ", "/");
    SLASH_MARKERS.iter().any(|m| folded.contains(m)) || contains_any(&folded, WORD_MARKERS)
}
