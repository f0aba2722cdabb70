use super::*;

fn check(title: &str, query: &str) -> Result<(), Irrelevance> {
    RelevanceClassifier::builtin().check(title, &ProductQuery::new(query))
}

#[test]
fn phone_listing_matches_phone_query() {
    assert_eq!(check("Apple iPhone 17 Pro Max 256GB Cosmic Orange", "iPhone 17 Pro Max"), Ok(()));
    assert_eq!(check("iPhone17 Pro Max 512GB Unlocked", "iPhone 17 Pro Max"), Ok(()));
}

#[test]
fn accessory_is_dropped_for_device_query() {
    assert_eq!(
        check("iPhone 17 Pro Max case", "iPhone 17 Pro Max"),
        Err(Irrelevance::Accessory)
    );
    assert_eq!(
        check("Tempered Glass Screen Protector for iPhone 17 Pro Max", "iPhone 17 Pro Max"),
        Err(Irrelevance::Accessory)
    );
}

#[test]
fn accessory_query_keeps_accessories() {
    assert_eq!(check("OtterBox iPhone 17 Case", "iPhone 17 case"), Ok(()));
}

#[test]
fn wrong_variant_is_dropped() {
    assert_eq!(
        check("Apple iPhone 17 Pro 256GB", "iPhone 17 Pro Max"),
        Err(Irrelevance::VariantMismatch)
    );
    assert_eq!(
        check("Apple iPhone 15 Plus 128GB", "iPhone 15"),
        Err(Irrelevance::VariantMismatch)
    );
    assert_eq!(
        check("Apple iPhone 17 Pro Max 256GB", "iPhone 17 Pro"),
        Err(Irrelevance::VariantMismatch)
    );
}

#[test]
fn wrong_model_number_is_dropped() {
    assert_eq!(
        check("Apple iPhone 16 Pro Max 256GB", "iPhone 17 Pro Max"),
        Err(Irrelevance::ModelMismatch)
    );
    // "170" is not "17".
    assert_eq!(
        check("Apple iPhone 170 Pro Max", "iPhone 17 Pro Max"),
        Err(Irrelevance::ModelMismatch)
    );
}

#[test]
fn unrelated_electronics_title_is_dropped() {
    assert_eq!(
        check("Samsung Galaxy S24 Ultra", "iPhone 17 Pro Max"),
        Err(Irrelevance::MissingKeyword)
    );
}

#[test]
fn television_ignores_screen_tech_variant_words() {
    assert_eq!(
        check("Samsung 65\" Class QLED Q80C Mini LED 4K TV", "Samsung 65 inch Q80C TV"),
        Ok(())
    );
}

#[test]
fn printer_query_accepts_printer_noun_and_drops_supplies() {
    let query = "HP OfficeJet Pro 9015e printer";
    assert_eq!(check("HP All-in-One Wireless Printer", query), Ok(()));
    assert_eq!(
        check("HP 962 Ink Cartridge for OfficeJet Pro 9015e", query),
        Err(Irrelevance::Accessory)
    );
}

#[test]
fn mattress_protector_is_dropped_for_mattress_query() {
    let query = "queen memory foam mattress";
    assert_eq!(check("Zinus 12 Inch Green Tea Memory Foam Mattress, Queen", query), Ok(()));
    assert_eq!(
        check("Waterproof Queen Mattress Protector", query),
        Err(Irrelevance::Accessory)
    );
}

#[test]
fn chair_mat_is_dropped_for_chair_query() {
    assert_eq!(
        check("Office Chair Mat for Carpet", "ergonomic office chair"),
        Err(Irrelevance::Accessory)
    );
    assert_eq!(check("Mesh Ergonomic Chair with Lumbar Support", "ergonomic office chair"), Ok(()));
}

#[test]
fn produce_drops_derived_products() {
    assert_eq!(check("Fresh Bananas, each", "organic bananas"), Ok(()));
    assert_eq!(
        check("Banana Chips, 12 oz", "organic bananas"),
        Err(Irrelevance::DerivedProduct)
    );
    assert_eq!(
        check("Strawberry Banana Smoothie", "organic bananas"),
        Err(Irrelevance::DerivedProduct)
    );
}

#[test]
fn produce_query_naming_the_derivative_keeps_it() {
    assert_eq!(check("Dried Mango Slices", "dried mangoes"), Ok(()));
}

#[test]
fn general_query_needs_keyword_overlap() {
    assert_eq!(check("Flexzilla Garden Hose 50 ft", "garden hose"), Ok(()));
    assert_eq!(
        check("Sprinkler Head Set", "garden hose"),
        Err(Irrelevance::MissingKeyword)
    );
}

#[test]
fn short_query_falls_back_to_short_words() {
    assert_eq!(check("Sun Hat, Wide Brim", "sun hat"), Ok(()));
}

#[test]
fn is_relevant_reads_the_title() {
    let classifier = RelevanceClassifier::builtin();
    let raw = RawOffer {
        title: "Apple iPhone 15 128GB".to_owned(),
        source_label: "Walmart".to_owned(),
        price_text: "$699.00".to_owned(),
        link: "https://www.walmart.com/ip/1".to_owned(),
        image_url: None,
    };
    assert!(classifier.is_relevant(&raw, &ProductQuery::new("iPhone 15")));
}

#[test]
fn os_and_cpu_names_are_not_variants() {
    assert_eq!(
        check(
            "Lenovo ThinkPad X1 Carbon Gen 11 14\" Laptop, Intel Core i7, 16GB, Windows 11 Pro",
            "Lenovo ThinkPad X1 Carbon Gen 11"
        ),
        Ok(())
    );
    assert_eq!(
        check("Dell XPS 13 Laptop Intel Core Ultra 7 155H", "Dell XPS 13 laptop"),
        Ok(())
    );
    assert_eq!(
        check(
            "Samsung Galaxy Book 4 Pro 14\" Intel Core Ultra 7 Laptop",
            "Samsung Galaxy Book 4 Pro"
        ),
        Ok(())
    );
}

#[test]
fn laptop_variant_in_model_line_still_counts() {
    assert_eq!(
        check("Apple MacBook Pro 14 M3 Laptop", "MacBook Air M3"),
        Err(Irrelevance::VariantMismatch)
    );
}

#[test]
fn bundled_add_ons_do_not_make_an_accessory() {
    assert_eq!(
        check("LG 65 inch Class OLED evo C3 4K Smart TV with Magic Remote", "LG C3 OLED TV"),
        Ok(())
    );
    assert_eq!(
        check("Samsung Galaxy Tab S9 11\" 128GB with S Pen", "Samsung Galaxy Tab S9"),
        Ok(())
    );
}

#[test]
fn standalone_add_ons_are_accessories() {
    assert_eq!(
        check("Magic Remote MR23GN for LG OLED C3 TV", "LG C3 OLED TV"),
        Err(Irrelevance::Accessory)
    );
    assert_eq!(
        check("iPhone 17 Pro Max MagSafe Charging Stand", "iPhone 17 Pro Max"),
        Err(Irrelevance::Accessory)
    );
    assert_eq!(
        check("Stylus Pen for Samsung Galaxy Tab S9 with Palm Rejection", "Samsung Galaxy Tab S9"),
        Err(Irrelevance::Accessory)
    );
}

#[test]
fn sku_marker_matches_extended_title_sku() {
    assert_eq!(
        check("Samsung QN65Q80CAFXZA 65\" QLED 4K Smart TV", "Samsung QN65Q80C TV"),
        Ok(())
    );
    // Short markers still need an exact token.
    assert_eq!(
        check("Apple iPhone 170 Pro Max", "iPhone 17 Pro Max"),
        Err(Irrelevance::ModelMismatch)
    );
}
