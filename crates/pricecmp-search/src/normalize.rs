//! Conversion from SerpApi result rows to [`pricecmp_core::RawOffer`].

use pricecmp_core::RawOffer;

use crate::types::ShoppingResult;

/// Converts provider rows into raw offers, skipping rows with no title and
/// rows that cannot be attributed to a store, priced, or linked.
///
/// Rows keep their provider order.
#[must_use]
pub fn normalize_results(results: Vec<ShoppingResult>) -> Vec<RawOffer> {
    let total = results.len();
    let offers: Vec<RawOffer> = results.into_iter().filter_map(normalize_result).collect();

    if offers.len() < total {
        tracing::debug!(
            total,
            kept = offers.len(),
            "skipped incomplete shopping rows"
        );
    }
    offers
}

fn normalize_result(result: ShoppingResult) -> Option<RawOffer> {
    let title = non_blank(result.title)?;
    let source_label = non_blank(result.source)?;
    let price_text = non_blank(result.price)?;
    let link = non_blank(result.link).or_else(|| non_blank(result.product_link))?;

    Some(RawOffer {
        title,
        source_label,
        price_text,
        link,
        image_url: non_blank(result.thumbnail),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}
