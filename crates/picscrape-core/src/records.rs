use rust_decimal::Decimal;
use serde::Serialize;

/// Loyalty-program bracket a product is redeemable against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointsTier {
    P100,
    P300,
    P700,
}

impl PointsTier {
    /// Tiers in the order the price report renders them.
    pub const ALL: [PointsTier; 3] = [PointsTier::P100, PointsTier::P300, PointsTier::P700];

    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            PointsTier::P100 => 100,
            PointsTier::P300 => 300,
            PointsTier::P700 => 700,
        }
    }
}

impl std::fmt::Display for PointsTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// One row of the price-per-point report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPriceRecord {
    /// Page `<title>`, or `"unknown"` when the page had none.
    pub title: String,
    pub price: Option<Decimal>,
    pub tier: PointsTier,
}

impl ProductPriceRecord {
    /// Price divided by the tier's point count, when a price was found.
    #[must_use]
    pub fn price_per_point(&self) -> Option<Decimal> {
        self.price
            .map(|price| price / Decimal::from(self.tier.points()))
    }
}

/// A category discovered on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub name: String,
    pub url: String,
}

/// A product page discovered while crawling a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLink {
    pub category: String,
    pub url: String,
}

/// Nutrition data extracted from one product page.
///
/// Fields are declared in CSV column order; the serde names are the CSV
/// header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "product name")]
    pub product_name: String,
    #[serde(rename = "category name")]
    pub category: String,
    #[serde(rename = "product url")]
    pub url: String,
    /// Column heading of the nutrition table, e.g. `"Pour 100 g"`.
    #[serde(rename = "reference quantity")]
    pub reference_quantity: String,
    #[serde(rename = "sugar title")]
    pub sugar_title: String,
    /// Grams of sugar per reference quantity.
    #[serde(rename = "sugar content")]
    pub sugar_quantity: Decimal,
}
