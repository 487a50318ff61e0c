use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Image substituted whenever a product or media path resolves to nothing.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/600x600?text=No+Image";

/// A catalog product, normalized from whatever shape the remote API returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalProduct {
    /// Stable identifier; synthesized when the source omits one.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub description: String,
    /// Mirrors the first variant's price when variants exist.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    /// Absolute URLs. Never empty: [`PLACEHOLDER_IMAGE_URL`] stands in.
    pub images: Vec<String>,
    /// Display name of the category, empty when unknown.
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_name: Option<String>,
    /// Mirrors the first variant's volume when variants exist.
    pub volume: String,
    #[serde(rename = "type")]
    pub product_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u64>,
    /// Storefront order; the first entry is the default SKU.
    pub variants: Vec<ProductVariant>,
    /// Keyed by language code, e.g. `"en"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translations: Option<BTreeMap<String, ProductTranslation>>,
}

impl CanonicalProduct {
    /// Returns the default variant (the first one), if any.
    #[must_use]
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }

    /// Returns `true` when the product is discounted against its original price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }

    /// Returns `true` when the product carries any review or rating data.
    #[must_use]
    pub fn has_rating_data(&self) -> bool {
        self.rating.is_some_and(|r| r > 0.0) || self.review_count.is_some_and(|n| n > 0)
    }
}

/// One purchasable size of a [`CanonicalProduct`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductVariant {
    /// Size label, e.g. `"50ml"`.
    pub volume: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductTranslation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
}

/// Listing sort orders offered to shoppers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
    Rating,
}

impl SortOption {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::Rating => "rating",
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort options that make sense for `products`.
///
/// The rating sort is hidden when no product carries review or rating data;
/// an empty listing therefore never offers it.
#[must_use]
pub fn available_sort_options(products: &[CanonicalProduct]) -> Vec<SortOption> {
    let mut options = vec![
        SortOption::Newest,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::NameAsc,
    ];
    if products.iter().any(CanonicalProduct::has_rating_data) {
        options.push(SortOption::Rating);
    }
    options
}
