use pricecmp_core::{parse_rule_overrides, StoreKind};

use super::*;

#[test]
fn resolves_seller_suffix_to_parent_store() {
    let dir = StoreDirectory::builtin();
    let id = dir.resolve("Walmart - Seller X");
    assert_eq!(id.store_id, "walmart");
    assert_eq!(id.display_name, "Walmart");
    assert_eq!(id.kind, StoreKind::Catalog);
}

#[test]
fn resolution_is_case_and_apostrophe_insensitive() {
    let dir = StoreDirectory::builtin();
    assert_eq!(dir.resolve("SAM'S CLUB").store_id, "samsclub");
    assert_eq!(dir.resolve("Kohl\u{2019}s").store_id, "kohls");
    assert_eq!(dir.resolve("BestBuy.com").store_id, "bestbuy");
    assert_eq!(dir.resolve("Best Buy").store_id, "bestbuy");
}

#[test]
fn narrower_names_win_over_broader_ones() {
    let dir = StoreDirectory::builtin();
    assert_eq!(dir.resolve("Nordstrom Rack").store_id, "nordstromrack");
    assert_eq!(dir.resolve("Nordstrom").store_id, "nordstrom");
    assert_eq!(dir.resolve("Giant Eagle").store_id, "gianteagle");
    assert_eq!(dir.resolve("Whole Foods Market").store_id, "wholefoods");
}

#[test]
fn patterns_match_whole_words_only() {
    let dir = StoreDirectory::builtin();
    // "shop" must not resolve to HP, "pineapple" must not resolve to Apple.
    assert_eq!(dir.resolve("Gadget Shop").store_id, "gadget shop");
    assert_eq!(dir.resolve("Pineapple Outlet").store_id, "pineapple outlet");
}

#[test]
fn brand_names_match_only_as_whole_labels() {
    let dir = StoreDirectory::builtin();
    assert_eq!(dir.resolve("Apple").store_id, "apple");
    assert_eq!(dir.resolve("HP").store_id, "hp");
    assert_eq!(dir.resolve("Ashley").store_id, "ashley");
    assert_eq!(dir.resolve("Apple Store - Fifth Ave").store_id, "apple");
    assert_eq!(dir.resolve("Ashley Furniture HomeStore").store_id, "ashley");
    assert_eq!(dir.resolve("Giant Food").store_id, "giant");

    assert_eq!(dir.resolve("Giant Tiger").store_id, "giant tiger");
    assert_eq!(dir.resolve("Apple Valley Hardware").store_id, "apple valley hardware");
    assert_eq!(dir.resolve("HP Tuners").store_id, "hp tuners");
    assert_eq!(dir.resolve("Ashley Boutique").store_id, "ashley boutique");
}

#[test]
fn marketplaces_are_flagged() {
    let dir = StoreDirectory::builtin();
    let ebay = dir.resolve("eBay - techdeals");
    assert_eq!(ebay.store_id, "ebay");
    assert!(ebay.is_marketplace());
    assert!(dir.resolve("Back Market").is_marketplace());
    assert!(!dir.resolve("Target").is_marketplace());
}

#[test]
fn unknown_label_is_its_own_identity() {
    let dir = StoreDirectory::builtin();
    let first = dir.resolve("Joe's Gadgets!!");
    let second = dir.resolve("  joes   gadgets ");
    assert_eq!(first.store_id, "joes gadgets");
    assert_eq!(first.display_name, "joes gadgets");
    assert_eq!(first, second);
}

#[test]
fn label_without_text_resolves_to_unknown() {
    let dir = StoreDirectory::builtin();
    assert_eq!(dir.resolve("***").store_id, "unknown");
}

#[test]
fn tiers_follow_table() {
    let dir = StoreDirectory::builtin();
    assert_eq!(dir.tier("walmart"), 1);
    assert_eq!(dir.tier("amazon"), 1);
    assert_eq!(dir.tier("bestbuy"), 2);
    assert_eq!(dir.tier("ebay"), 2);
    assert_eq!(dir.tier("newegg"), 3);
    assert_eq!(dir.tier("mercari"), UNRANKED_TIER);
    assert_eq!(dir.tier("joes gadgets"), UNRANKED_TIER);
}

#[test]
fn overrides_append_stores_and_mark_marketplaces() {
    let overrides = parse_rule_overrides(
        r#"
marketplace_stores: [walmart, reverb]
extra_stores:
  - pattern: "Micro Center"
    id: microcenter
    name: Micro Center
    tier: 3
"#,
    )
    .unwrap();
    let dir = StoreDirectory::with_overrides(&overrides);

    let micro = dir.resolve("Micro Center - Tustin");
    assert_eq!(micro.store_id, "microcenter");
    assert_eq!(micro.display_name, "Micro Center");
    assert_eq!(dir.tier("microcenter"), 3);

    assert!(dir.resolve("Walmart").is_marketplace());
    assert!(dir.resolve("Reverb").is_marketplace());
}

#[test]
fn extra_stores_do_not_shadow_builtin_entries() {
    let overrides = parse_rule_overrides(
        r#"
extra_stores:
  - pattern: "walmart"
    id: walmart-copy
    name: Walmart Copy
"#,
    )
    .unwrap();
    let dir = StoreDirectory::with_overrides(&overrides);
    assert_eq!(dir.resolve("Walmart").store_id, "walmart");
}
