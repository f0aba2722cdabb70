//! Price plausibility: rejects prices that cannot be the sale price of the
//! queried product.
//!
//! This is a heuristic safety net. Rejecting a genuine deal is acceptable;
//! accepting the price of an accessory or a payment plan is not.

use std::collections::HashMap;

use pricecmp_core::{ProductCategory, RuleOverrides};
use rust_decimal::Decimal;

use crate::price::{is_installment_text, parse_price};
use crate::query::ProductQuery;

/// Upper bound for any single offer.
const GENERAL_PRICE_CAP: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// Upper bound for produce and grocery offers.
const FOOD_PRICE_CAP: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Built-in minimum prices. Categories absent here have no floor.
const DEFAULT_FLOORS: &[(ProductCategory, u32)] = &[
    (ProductCategory::PhoneProMax, 600),
    (ProductCategory::PhonePro, 500),
    (ProductCategory::PhoneBase, 300),
    (ProductCategory::Mattress, 50),
    (ProductCategory::Printer, 50),
    (ProductCategory::Desk, 50),
    (ProductCategory::Chair, 30),
    (ProductCategory::Furniture, 30),
];

/// Why a price was rejected. Used for drop logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Implausible {
    /// Price text carries no amount.
    Unparseable,
    /// A monthly or weekly payment figure for a high-ticket product.
    Installment,
    /// Zero or negative.
    NotPositive,
    /// Below the category floor.
    BelowFloor,
    /// Above the general or food cap.
    AboveCap,
}

impl Implausible {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Implausible::Unparseable => "unparseable",
            Implausible::Installment => "installment",
            Implausible::NotPositive => "not_positive",
            Implausible::BelowFloor => "below_floor",
            Implausible::AboveCap => "above_cap",
        }
    }
}

/// Category floor table plus the general and food price caps.
#[derive(Debug, Clone)]
pub struct PriceValidator {
    floors: HashMap<ProductCategory, Decimal>,
}

impl PriceValidator {
    #[must_use]
    pub fn builtin() -> Self {
        let floors = DEFAULT_FLOORS
            .iter()
            .map(|(category, floor)| (*category, Decimal::from(*floor)))
            .collect();
        Self { floors }
    }

    /// The built-in floors with operator overrides layered on top. An
    /// override replaces the built-in floor for its category or adds one.
    #[must_use]
    pub fn with_overrides(overrides: &RuleOverrides) -> Self {
        let mut validator = Self::builtin();
        for floor in &overrides.price_floors {
            validator.floors.insert(floor.category, floor.min_price);
        }
        validator
    }

    #[must_use]
    pub fn floor(&self, category: ProductCategory) -> Option<Decimal> {
        self.floors.get(&category).copied()
    }

    /// `true` if `price` can be the sale price of the queried product.
    #[must_use]
    pub fn is_plausible(&self, price: Decimal, query: &ProductQuery) -> bool {
        self.check_amount(price, query.category()).is_ok()
    }

    /// Parses provider price text and checks it, returning the accepted price.
    ///
    /// # Errors
    ///
    /// Returns the [`Implausible`] reason when the text is an installment
    /// figure for a high-ticket product, carries no amount, or the amount
    /// fails the floor or cap checks.
    pub fn validate(&self, price_text: &str, query: &ProductQuery) -> Result<Decimal, Implausible> {
        let category = query.category();
        if category.is_high_ticket() && is_installment_text(price_text) {
            return Err(Implausible::Installment);
        }
        let price = parse_price(price_text).ok_or(Implausible::Unparseable)?;
        self.check_amount(price, category)?;
        Ok(price)
    }

    fn check_amount(&self, price: Decimal, category: ProductCategory) -> Result<(), Implausible> {
        if price <= Decimal::ZERO {
            return Err(Implausible::NotPositive);
        }
        let cap = if category.is_food() {
            FOOD_PRICE_CAP
        } else {
            GENERAL_PRICE_CAP
        };
        if price > cap {
            return Err(Implausible::AboveCap);
        }
        if self.floor(category).is_some_and(|floor| price < floor) {
            return Err(Implausible::BelowFloor);
        }
        Ok(())
    }
}

impl Default for PriceValidator {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pricecmp_core::parse_rule_overrides;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn phone_floors_by_tier() {
        let v = PriceValidator::builtin();
        let pro_max = ProductQuery::new("iPhone 17 Pro Max");
        let pro = ProductQuery::new("iPhone 17 Pro");
        let base = ProductQuery::new("iPhone 15");

        assert!(!v.is_plausible(dec("599.99"), &pro_max));
        assert!(v.is_plausible(dec("600"), &pro_max));
        assert!(!v.is_plausible(dec("499"), &pro));
        assert!(v.is_plausible(dec("500"), &pro));
        assert!(!v.is_plausible(dec("299.99"), &base));
        assert!(v.is_plausible(dec("300"), &base));
    }

    #[test]
    fn installment_text_is_rejected_for_high_ticket() {
        let v = PriceValidator::builtin();
        let query = ProductQuery::new("iPhone 15");
        assert_eq!(v.validate("$28.00/mo", &query), Err(Implausible::Installment));
        assert_eq!(v.validate("$699.00", &query), Ok(dec("699.00")));
    }

    #[test]
    fn installment_text_is_only_checked_for_high_ticket() {
        let v = PriceValidator::builtin();
        // A low-ticket subscription figure still reads as a price.
        let query = ProductQuery::new("garden hose");
        assert_eq!(v.validate("$28.00/mo", &query), Ok(dec("28.00")));
    }

    #[test]
    fn categories_without_floor_accept_any_positive_price() {
        let v = PriceValidator::builtin();
        let query = ProductQuery::new("garden hose");
        assert!(v.is_plausible(dec("0.99"), &query));
        assert!(!v.is_plausible(Decimal::ZERO, &query));
        assert!(!v.is_plausible(dec("-5"), &query));
    }

    #[test]
    fn caps_apply() {
        let v = PriceValidator::builtin();
        assert!(v.is_plausible(dec("50000"), &ProductQuery::new("garden hose")));
        assert!(!v.is_plausible(dec("50000.01"), &ProductQuery::new("garden hose")));
        assert!(v.is_plausible(dec("200"), &ProductQuery::new("organic bananas")));
        assert_eq!(
            v.validate("$250.00", &ProductQuery::new("whole milk")),
            Err(Implausible::AboveCap)
        );
    }

    #[test]
    fn furniture_floors() {
        let v = PriceValidator::builtin();
        assert!(!v.is_plausible(dec("29.99"), &ProductQuery::new("ergonomic office chair")));
        assert!(!v.is_plausible(dec("45"), &ProductQuery::new("standing desk")));
        assert!(!v.is_plausible(dec("19.99"), &ProductQuery::new("queen memory foam mattress")));
    }

    #[test]
    fn unparseable_text_is_rejected() {
        let v = PriceValidator::builtin();
        assert_eq!(
            v.validate("See website", &ProductQuery::new("garden hose")),
            Err(Implausible::Unparseable)
        );
    }

    #[test]
    fn overrides_replace_and_add_floors() {
        let overrides = parse_rule_overrides(
            r#"
price_floors:
  - category: phone_pro_max
    min_price: "700"
  - category: laptop
    min_price: "200"
"#,
        )
        .unwrap();
        let v = PriceValidator::with_overrides(&overrides);
        assert_eq!(v.floor(ProductCategory::PhoneProMax), Some(dec("700")));
        assert_eq!(v.floor(ProductCategory::Laptop), Some(dec("200")));
        assert_eq!(v.floor(ProductCategory::PhonePro), Some(dec("500")));
        assert!(!v.is_plausible(dec("650"), &ProductQuery::new("iPhone 17 Pro Max")));
        assert!(!v.is_plausible(dec("150"), &ProductQuery::new("Lenovo IdeaPad laptop")));
    }
}
