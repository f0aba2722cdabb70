use serde::{Deserialize, Serialize};

/// Product category inferred from the query text.
///
/// Drives which relevance tier, accessory table, and price floor apply.
/// Inference itself lives in `pricecmp-engine`; this type is shared so the
/// rule-override file can name categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Flagship phone, top variant ("Pro Max", "Ultra").
    PhoneProMax,
    /// Flagship phone, "Pro" variant.
    PhonePro,
    /// Flagship phone, base model.
    PhoneBase,
    Laptop,
    Tablet,
    Television,
    OtherElectronics,
    Mattress,
    /// Printers and scanners, not their supplies.
    Printer,
    Desk,
    Chair,
    Furniture,
    OfficeSupply,
    Produce,
    Grocery,
    General,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 16] = [
        ProductCategory::PhoneProMax,
        ProductCategory::PhonePro,
        ProductCategory::PhoneBase,
        ProductCategory::Laptop,
        ProductCategory::Tablet,
        ProductCategory::Television,
        ProductCategory::OtherElectronics,
        ProductCategory::Mattress,
        ProductCategory::Printer,
        ProductCategory::Desk,
        ProductCategory::Chair,
        ProductCategory::Furniture,
        ProductCategory::OfficeSupply,
        ProductCategory::Produce,
        ProductCategory::Grocery,
        ProductCategory::General,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::PhoneProMax => "phone_pro_max",
            ProductCategory::PhonePro => "phone_pro",
            ProductCategory::PhoneBase => "phone_base",
            ProductCategory::Laptop => "laptop",
            ProductCategory::Tablet => "tablet",
            ProductCategory::Television => "television",
            ProductCategory::OtherElectronics => "other_electronics",
            ProductCategory::Mattress => "mattress",
            ProductCategory::Printer => "printer",
            ProductCategory::Desk => "desk",
            ProductCategory::Chair => "chair",
            ProductCategory::Furniture => "furniture",
            ProductCategory::OfficeSupply => "office_supply",
            ProductCategory::Produce => "produce",
            ProductCategory::Grocery => "grocery",
            ProductCategory::General => "general",
        }
    }

    #[must_use]
    pub fn is_phone(self) -> bool {
        matches!(
            self,
            ProductCategory::PhoneProMax | ProductCategory::PhonePro | ProductCategory::PhoneBase
        )
    }

    /// Electronics-like categories use the strict relevance tier.
    #[must_use]
    pub fn is_electronics(self) -> bool {
        self.is_phone()
            || matches!(
                self,
                ProductCategory::Laptop
                    | ProductCategory::Tablet
                    | ProductCategory::Television
                    | ProductCategory::OtherElectronics
            )
    }

    /// Categories where an installment figure is never the sale price.
    #[must_use]
    pub fn is_high_ticket(self) -> bool {
        self.is_electronics()
            || matches!(
                self,
                ProductCategory::Mattress
                    | ProductCategory::Printer
                    | ProductCategory::Desk
                    | ProductCategory::Chair
                    | ProductCategory::Furniture
            )
    }

    #[must_use]
    pub fn is_food(self) -> bool {
        matches!(self, ProductCategory::Produce | ProductCategory::Grocery)
    }

    /// Generic product-type noun used to build a broader follow-up query.
    #[must_use]
    pub fn product_noun(self) -> Option<&'static str> {
        match self {
            ProductCategory::PhoneProMax | ProductCategory::PhonePro | ProductCategory::PhoneBase => {
                Some("phone")
            }
            ProductCategory::Laptop => Some("laptop"),
            ProductCategory::Tablet => Some("tablet"),
            ProductCategory::Television => Some("tv"),
            ProductCategory::Mattress => Some("mattress"),
            ProductCategory::Printer => Some("printer"),
            ProductCategory::Desk => Some("desk"),
            ProductCategory::Chair => Some("chair"),
            ProductCategory::OtherElectronics
            | ProductCategory::Furniture
            | ProductCategory::OfficeSupply
            | ProductCategory::Produce
            | ProductCategory::Grocery
            | ProductCategory::General => None,
        }
    }
}

impl std::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
