//! Order operations. Only the listing degrades gracefully; a single order
//! and every write report their failure.

use reqwest::Method;
use serde_json::{json, Value};
use storefront_core::{CanonicalOrder, OrderStatus};

use crate::classify::ClassifiedFailure;
use crate::envelope::extract_list;
use crate::error::ApiError;
use crate::normalize::normalize_order;
use crate::resilience::with_fallback;

use super::products::written_or;
use super::{path_segment, StorefrontClient};

impl StorefrontClient {
    /// Lists orders, newest first as the API returns them. An unreachable or
    /// failing API yields an empty list.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches the other operations.
    pub async fn list_orders(&self) -> Result<Vec<CanonicalOrder>, ClassifiedFailure> {
        let fetch = async {
            let body = self
                .fetch(&self.endpoints.orders, Method::GET, "", &[], None)
                .await?;
            Ok::<_, ApiError>(extract_list(body)
                .iter()
                .filter(|item| item.is_object())
                .map(|item| normalize_order(item, &self.media))
                .collect())
        };
        with_fallback("list_orders", fetch, |_| Some(Vec::new()))
            .await
            .map_err(ClassifiedFailure::from)
    }

    /// # Errors
    ///
    /// Any failure is returned, including not-found.
    pub async fn get_order(&self, id: &str) -> Result<CanonicalOrder, ClassifiedFailure> {
        let body = self
            .fetch(&self.endpoints.orders, Method::GET, &path_segment(id), &[], None)
            .await?;
        Ok(normalize_order(&body, &self.media))
    }

    /// Places an order from a raw payload.
    ///
    /// # Errors
    ///
    /// Any failure is returned; writes never fall back.
    pub async fn create_order(&self, raw: &Value) -> Result<CanonicalOrder, ClassifiedFailure> {
        let body = self
            .fetch(&self.endpoints.orders, Method::POST, "", &[], Some(raw))
            .await?;
        Ok(normalize_order(written_or(&body, raw), &self.media))
    }

    /// Moves order `id` to `status`.
    ///
    /// Known statuses are sent as the API's numeric code. When the API does
    /// not echo the updated order, it is fetched again.
    ///
    /// # Errors
    ///
    /// Any failure is returned; writes never fall back.
    pub async fn update_order_status(
        &self,
        id: &str,
        status: &OrderStatus,
    ) -> Result<CanonicalOrder, ClassifiedFailure> {
        let payload = match status.code() {
            Some(code) => json!({ "status": code }),
            None => json!({ "status": status.as_str() }),
        };
        let suffix = format!("{}/status", path_segment(id));
        let body = self
            .fetch(&self.endpoints.orders, Method::PUT, &suffix, &[], Some(&payload))
            .await?;

        if body.is_object() {
            Ok(normalize_order(&body, &self.media))
        } else {
            self.get_order(id).await
        }
    }

    /// # Errors
    ///
    /// Any failure is returned; writes never fall back.
    pub async fn delete_order(&self, id: &str) -> Result<(), ClassifiedFailure> {
        self.fetch(&self.endpoints.orders, Method::DELETE, &path_segment(id), &[], None)
            .await?;
        Ok(())
    }
}
