use reqwest::Method;
use storefront_core::DashboardAnalytics;

use crate::classify::ClassifiedFailure;
use crate::error::ApiError;
use crate::normalize::normalize_dashboard;
use crate::resilience::with_fallback;

use super::StorefrontClient;

impl StorefrontClient {
    /// Fetches admin dashboard analytics. Any failure yields the zeroed
    /// analytics record so the dashboard still renders.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches the other operations.
    pub async fn dashboard_analytics(&self) -> Result<DashboardAnalytics, ClassifiedFailure> {
        let fetch = async {
            let body = self
                .fetch(&self.endpoints.dashboard, Method::GET, "", &[], None)
                .await?;
            Ok::<_, ApiError>(normalize_dashboard(&body, &self.media))
        };
        with_fallback("dashboard_analytics", fetch, |_| {
            Some(DashboardAnalytics::default())
        })
        .await
        .map_err(ClassifiedFailure::from)
    }
}
