use reqwest::Method;
use storefront_core::CanonicalCategory;

use crate::classify::ClassifiedFailure;
use crate::envelope::extract_list;
use crate::error::ApiError;
use crate::fallback::FallbackCatalog;
use crate::normalize::normalize_category;
use crate::resilience::with_fallback;

use super::StorefrontClient;

impl StorefrontClient {
    /// Lists catalog categories, falling back to the bundled categories.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches the other operations.
    pub async fn list_categories(&self) -> Result<Vec<CanonicalCategory>, ClassifiedFailure> {
        let fetch = async {
            let body = self
                .fetch(&self.endpoints.categories, Method::GET, "", &[], None)
                .await?;
            Ok::<_, ApiError>(extract_list(body)
                .iter()
                .filter(|item| item.is_object())
                .map(|item| normalize_category(item, &self.media))
                .collect())
        };
        with_fallback("list_categories", fetch, |_| {
            Some(FallbackCatalog::bundled().categories())
        })
        .await
        .map_err(ClassifiedFailure::from)
    }
}
