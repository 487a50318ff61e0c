//! Ordered fallback across candidate URL prefixes for a remote resource.
//!
//! The remote API has never had one stable route per resource, so each
//! resource is described by an ordered list of prefixes. A prefix that
//! answers 404 is skipped; any other failure ends the search.

use std::future::Future;

use storefront_core::EndpointOverrides;

use crate::error::ApiError;

/// Ordered candidate path prefixes for one resource, highest priority first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePaths(Vec<String>);

impl CandidatePaths {
    /// Builds a candidate list, normalizing each entry to a single leading
    /// slash and no trailing slash. Blank entries are dropped.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            paths
                .into_iter()
                .map(|p| p.as_ref().trim().trim_matches('/').to_string())
                .filter(|p| !p.is_empty())
                .map(|p| format!("/{p}"))
                .collect(),
        )
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Strategy that tries each candidate prefix in turn.
#[derive(Debug, Clone)]
pub struct EndpointResolver {
    resource: &'static str,
    candidates: CandidatePaths,
}

impl EndpointResolver {
    #[must_use]
    pub fn new(resource: &'static str, candidates: CandidatePaths) -> Self {
        Self {
            resource,
            candidates,
        }
    }

    #[must_use]
    pub fn resource(&self) -> &'static str {
        self.resource
    }

    #[must_use]
    pub fn candidates(&self) -> &CandidatePaths {
        &self.candidates
    }

    /// Calls `requester` with `candidate + suffix` for each candidate until
    /// one succeeds.
    ///
    /// Attempts run strictly one after another. A not-found outcome moves on
    /// to the next candidate; any other failure is returned at once without
    /// trying the rest.
    ///
    /// # Errors
    ///
    /// - the first failure that is not a not-found outcome;
    /// - the last not-found failure once every candidate has been tried;
    /// - [`ApiError::NoCandidates`] when the candidate list is empty.
    pub async fn resolve<T, F, Fut>(&self, suffix: &str, mut requester: F) -> Result<T, ApiError>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut last_err = None;

        for (attempt, candidate) in self.candidates.as_slice().iter().enumerate() {
            let path = format!("{candidate}{suffix}");
            tracing::debug!(resource = self.resource, attempt, %path, "requesting candidate endpoint");

            match requester(path.clone()).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_not_found() => {
                    tracing::debug!(resource = self.resource, %path, "candidate not found; trying next");
                    last_err = Some(err);
                }
                Err(err) => {
                    tracing::warn!(
                        resource = self.resource,
                        %path,
                        error = %err,
                        "candidate endpoint failed; not trying remaining candidates"
                    );
                    return Err(err);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| ApiError::NoCandidates {
            resource: self.resource.to_string(),
        }))
    }
}

/// Candidate lists for every resource the client talks to.
#[derive(Debug, Clone)]
pub struct EndpointCatalog {
    pub products: EndpointResolver,
    pub categories: EndpointResolver,
    pub orders: EndpointResolver,
    pub dashboard: EndpointResolver,
}

impl Default for EndpointCatalog {
    fn default() -> Self {
        Self {
            products: EndpointResolver::new(
                "products",
                CandidatePaths::new(["/api/products", "/api/Products", "/api/product", "/api/Product"]),
            ),
            categories: EndpointResolver::new(
                "categories",
                CandidatePaths::new([
                    "/api/categories",
                    "/api/Categories",
                    "/api/category",
                    "/api/Category",
                ]),
            ),
            orders: EndpointResolver::new(
                "orders",
                CandidatePaths::new(["/api/orders", "/api/Orders", "/api/admin/orders", "/api/Order"]),
            ),
            dashboard: EndpointResolver::new(
                "dashboard",
                CandidatePaths::new([
                    "/api/admin/dashboard",
                    "/api/dashboard",
                    "/api/Dashboard",
                    "/api/admin/analytics",
                ]),
            ),
        }
    }
}

impl EndpointCatalog {
    /// Built-in candidates with any configured lists substituted.
    #[must_use]
    pub fn from_overrides(overrides: &EndpointOverrides) -> Self {
        let mut catalog = Self::default();
        let slots = [
            (&mut catalog.products, &overrides.products),
            (&mut catalog.categories, &overrides.categories),
            (&mut catalog.orders, &overrides.orders),
            (&mut catalog.dashboard, &overrides.dashboard),
        ];
        for (resolver, paths) in slots {
            if let Some(paths) = paths {
                resolver.candidates = CandidatePaths::new(paths);
            }
        }
        catalog
    }
}
