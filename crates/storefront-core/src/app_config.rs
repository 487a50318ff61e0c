use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Candidate path-prefix overrides, one list per remote resource.
///
/// `None` means "use the client's built-in candidates".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointOverrides {
    pub products: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub orders: Option<Vec<String>>,
    pub dashboard: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub api_base_url: String,
    /// Root that relative media paths are joined to. Defaults to `api_base_url`.
    pub media_root: String,
    pub log_level: String,
    pub api_token: Option<String>,
    /// `None` leaves requests without an overall timeout.
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
    pub cart_path: PathBuf,
    pub wishlist_path: PathBuf,
    pub endpoints: EndpointOverrides,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("api_base_url", &self.api_base_url)
            .field("media_root", &self.media_root)
            .field("log_level", &self.log_level)
            .field("api_token", &self.api_token.as_ref().map(|_| "[redacted]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("cart_path", &self.cart_path)
            .field("wishlist_path", &self.wishlist_path)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}
