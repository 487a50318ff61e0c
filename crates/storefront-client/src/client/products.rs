//! Product catalog operations.

use reqwest::Method;
use serde_json::Value;
use storefront_core::CanonicalProduct;

use crate::classify::ClassifiedFailure;
use crate::envelope::extract_list;
use crate::error::ApiError;
use crate::fallback::FallbackCatalog;
use crate::normalize::normalize_product;
use crate::query::ProductQuery;
use crate::resilience::with_fallback;

use super::{path_segment, StorefrontClient};

impl StorefrontClient {
    /// Lists products matching `query`.
    ///
    /// Falls back to the bundled catalog, filtered by the same query, when
    /// the API cannot be reached or answers with an error.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches the other operations.
    pub async fn list_products(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<CanonicalProduct>, ClassifiedFailure> {
        let pairs = query.to_pairs();
        let fetch = async {
            let body = self
                .fetch(&self.endpoints.products, Method::GET, "", &pairs, None)
                .await?;
            Ok::<_, ApiError>(self.products_from(body))
        };
        with_fallback("list_products", fetch, |_| {
            Some(FallbackCatalog::bundled().products(query))
        })
        .await
        .map_err(ClassifiedFailure::from)
    }

    /// Products whose name, description, brand, or tags match `term`.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::list_products`].
    pub async fn search_products(
        &self,
        term: &str,
    ) -> Result<Vec<CanonicalProduct>, ClassifiedFailure> {
        self.list_products(&ProductQuery::search(term)).await
    }

    /// Featured products. Entries the API explicitly marks as not featured
    /// are dropped, in case the server ignores the filter.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::list_products`].
    pub async fn featured_products(&self) -> Result<Vec<CanonicalProduct>, ClassifiedFailure> {
        let mut products = self.list_products(&ProductQuery::featured()).await?;
        products.retain(|p| p.is_featured != Some(false));
        Ok(products)
    }

    /// Fetches one product by ID, falling back to the bundled catalog entry
    /// with the same ID.
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the request fails and the bundled
    /// catalog has no such product.
    pub async fn get_product(&self, id: &str) -> Result<CanonicalProduct, ClassifiedFailure> {
        let suffix = path_segment(id);
        let fetch = async {
            let body = self
                .fetch(&self.endpoints.products, Method::GET, &suffix, &[], None)
                .await?;
            Ok::<_, ApiError>(normalize_product(&body, &self.media))
        };
        with_fallback("get_product", fetch, |_| {
            FallbackCatalog::bundled().product_by_id(id)
        })
        .await
        .map_err(ClassifiedFailure::from)
    }

    /// Fetches one product by its URL slug, falling back to the bundled
    /// catalog entry with the same slug.
    ///
    /// # Errors
    ///
    /// Returns the classified failure when the request fails and the bundled
    /// catalog has no such product.
    pub async fn get_product_by_slug(
        &self,
        slug: &str,
    ) -> Result<CanonicalProduct, ClassifiedFailure> {
        let suffix = format!("/slug{}", path_segment(slug));
        let fetch = async {
            let body = self
                .fetch(&self.endpoints.products, Method::GET, &suffix, &[], None)
                .await?;
            Ok::<_, ApiError>(normalize_product(&body, &self.media))
        };
        with_fallback("get_product_by_slug", fetch, |_| {
            FallbackCatalog::bundled().product_by_slug(slug)
        })
        .await
        .map_err(ClassifiedFailure::from)
    }

    /// Creates a product from a raw payload and returns the stored record.
    ///
    /// When the API answers without a body, the submitted payload is
    /// normalized instead.
    ///
    /// # Errors
    ///
    /// Any failure is returned; writes never fall back.
    pub async fn create_product(&self, raw: &Value) -> Result<CanonicalProduct, ClassifiedFailure> {
        let body = self
            .fetch(&self.endpoints.products, Method::POST, "", &[], Some(raw))
            .await?;
        Ok(normalize_product(written_or(&body, raw), &self.media))
    }

    /// Replaces the product `id` with a raw payload.
    ///
    /// # Errors
    ///
    /// Any failure is returned; writes never fall back.
    pub async fn update_product(
        &self,
        id: &str,
        raw: &Value,
    ) -> Result<CanonicalProduct, ClassifiedFailure> {
        let body = self
            .fetch(
                &self.endpoints.products,
                Method::PUT,
                &path_segment(id),
                &[],
                Some(raw),
            )
            .await?;
        Ok(normalize_product(written_or(&body, raw), &self.media))
    }

    /// # Errors
    ///
    /// Any failure is returned; writes never fall back.
    pub async fn delete_product(&self, id: &str) -> Result<(), ClassifiedFailure> {
        self.fetch(
            &self.endpoints.products,
            Method::DELETE,
            &path_segment(id),
            &[],
            None,
        )
        .await?;
        Ok(())
    }

    fn products_from(&self, body: Value) -> Vec<CanonicalProduct> {
        extract_list(body)
            .iter()
            .filter(|item| item.is_object())
            .map(|item| normalize_product(item, &self.media))
            .collect()
    }
}

/// The record a write returned, or the submitted payload when the response
/// carried no record.
pub(super) fn written_or<'a>(response: &'a Value, submitted: &'a Value) -> &'a Value {
    if response.is_object() {
        response
    } else {
        submitted
    }
}
