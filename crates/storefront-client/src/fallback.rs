//! Bundled catalog served when catalog reads fail.

use std::sync::LazyLock;

use serde::Deserialize;
use storefront_core::{CanonicalCategory, CanonicalProduct};

use crate::query::ProductQuery;

const CATALOG_YAML: &str = include_str!("../data/fallback_catalog.yaml");

static CATALOG: LazyLock<FallbackCatalog> = LazyLock::new(|| {
    serde_yaml::from_str(CATALOG_YAML).unwrap_or_else(|e| {
        tracing::error!(error = %e, "bundled fallback catalog failed to parse; serving an empty catalog");
        FallbackCatalog::default()
    })
});

/// Canonical products and categories compiled into the binary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FallbackCatalog {
    pub products: Vec<CanonicalProduct>,
    pub categories: Vec<CanonicalCategory>,
}

impl FallbackCatalog {
    /// The bundled catalog, parsed on first use.
    #[must_use]
    pub fn bundled() -> &'static FallbackCatalog {
        &CATALOG
    }

    #[must_use]
    pub fn products(&self, query: &ProductQuery) -> Vec<CanonicalProduct> {
        query.apply(&self.products)
    }

    #[must_use]
    pub fn product_by_id(&self, id: &str) -> Option<CanonicalProduct> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    #[must_use]
    pub fn product_by_slug(&self, slug: &str) -> Option<CanonicalProduct> {
        self.products
            .iter()
            .find(|p| p.slug.as_deref().is_some_and(|s| s.eq_ignore_ascii_case(slug)))
            .cloned()
    }

    #[must_use]
    pub fn categories(&self) -> Vec<CanonicalCategory> {
        self.categories.clone()
    }
}
