pub mod analytics;
pub mod app_config;
pub mod cart;
pub mod categories;
pub mod config;
pub mod orders;
pub mod products;

pub use analytics::{
    CategoryStat, DashboardAnalytics, GrowthMetrics, OrderStatusBreakdown, PaymentMethodStat,
    ProductStat, RevenuePoint,
};
pub use app_config::{AppConfig, EndpointOverrides, Environment};
pub use cart::{Cart, CartError, CartLine, JsonFilePersistence, Persistence, StateStore, Wishlist};
pub use categories::CanonicalCategory;
pub use config::{load_app_config, load_app_config_from_env};
pub use orders::{CanonicalOrder, CanonicalOrderItem, OrderStatus};
pub use products::{
    available_sort_options, CanonicalProduct, ProductTranslation, ProductVariant, SortOption,
    PLACEHOLDER_IMAGE_URL,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
