//! Product listing filters, sent to the API as query parameters and applied
//! locally when the listing is served from the fallback catalog.

use storefront_core::{CanonicalProduct, SortOption};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    /// Category name, slug, or ID.
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Free-text term matched against name, description, brand, and tags.
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub featured: Option<bool>,
    pub sort: Option<SortOption>,
    /// 1-based.
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ProductQuery {
    #[must_use]
    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn featured() -> Self {
        Self {
            featured: Some(true),
            ..Self::default()
        }
    }

    /// Query-string pairs for the remote API, in a stable order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(brand) = &self.brand {
            pairs.push(("brand", brand.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(featured) = self.featured {
            pairs.push(("isFeatured", featured.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize", size.to_string()));
        }
        pairs
    }

    /// Whether `product` passes every filter set on this query. Sorting and
    /// paging are not filters.
    #[must_use]
    pub fn matches(&self, product: &CanonicalProduct) -> bool {
        if let Some(category) = &self.category {
            let wanted = category.to_lowercase();
            let candidates = [
                Some(product.category.as_str()),
                product.category_id.as_deref(),
                product.category_name.as_deref(),
            ];
            if !candidates
                .into_iter()
                .flatten()
                .any(|c| c.to_lowercase() == wanted)
            {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !product.brand.eq_ignore_ascii_case(brand)
                && product.brand_id.as_deref() != Some(brand.as_str())
            {
                return false;
            }
        }
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let term = term.to_lowercase();
            let in_tags = product
                .tags
                .as_ref()
                .is_some_and(|tags| tags.iter().any(|t| t.to_lowercase().contains(&term)));
            if !(product.name.to_lowercase().contains(&term)
                || product.description.to_lowercase().contains(&term)
                || product.brand.to_lowercase().contains(&term)
                || in_tags)
            {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min)
            || self.max_price.is_some_and(|max| product.price > max)
        {
            return false;
        }
        if let Some(featured) = self.featured {
            if product.is_featured.unwrap_or(false) != featured {
                return false;
            }
        }
        true
    }

    /// Filters, sorts, and pages `products` locally.
    #[must_use]
    pub fn apply(&self, products: &[CanonicalProduct]) -> Vec<CanonicalProduct> {
        let mut selected: Vec<CanonicalProduct> =
            products.iter().filter(|p| self.matches(p)).cloned().collect();

        match self.sort {
            Some(SortOption::PriceAsc) => selected.sort_by(|a, b| a.price.total_cmp(&b.price)),
            Some(SortOption::PriceDesc) => selected.sort_by(|a, b| b.price.total_cmp(&a.price)),
            Some(SortOption::NameAsc) => {
                selected.sort_by_key(|p| p.name.to_lowercase());
            }
            Some(SortOption::Rating) => selected.sort_by(|a, b| {
                b.rating
                    .unwrap_or(0.0)
                    .total_cmp(&a.rating.unwrap_or(0.0))
            }),
            Some(SortOption::Newest) | None => {}
        }

        if let Some(size) = self.page_size.filter(|s| *s > 0) {
            let page = self.page.unwrap_or(1).max(1);
            let skip = (page - 1).saturating_mul(size) as usize;
            selected = selected.into_iter().skip(skip).take(size as usize).collect();
        }
        selected
    }
}
