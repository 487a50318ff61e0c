pub mod classify;
pub mod client;
pub mod coalesce;
pub mod coerce;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod media;
pub mod normalize;
pub mod query;
pub mod resilience;

pub use classify::{classify, ClassifiedFailure, FailureCategory};
pub use client::StorefrontClient;
pub use endpoint::{CandidatePaths, EndpointCatalog, EndpointResolver};
pub use error::ApiError;
pub use fallback::FallbackCatalog;
pub use media::{resolve_media, MediaResolver};
pub use normalize::{
    normalize_category, normalize_dashboard, normalize_order, normalize_product,
    payment_method_label,
};
pub use query::ProductQuery;
pub use resilience::with_fallback;
