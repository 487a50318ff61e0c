use crate::app_config::{AppConfig, EndpointOverrides, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        match lookup(var) {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
            _ => Ok(None),
        }
    };

    let path_list = |var: &str| -> Result<Option<Vec<String>>, ConfigError> {
        let Ok(raw) = lookup(var) else {
            return Ok(None);
        };
        let paths = parse_path_list(&raw);
        if paths.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "expected at least one comma-separated path prefix".to_string(),
            });
        }
        Ok(Some(paths))
    };

    let api_base_url = require("STOREFRONT_API_BASE_URL")?;
    if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_API_BASE_URL".to_string(),
            reason: format!("\"{api_base_url}\" is not an http(s) URL"),
        });
    }
    let api_base_url = api_base_url.trim_end_matches('/').to_string();

    let env = parse_environment(&or_default("STOREFRONT_ENV", "development"))?;
    let media_root = lookup("STOREFRONT_MEDIA_ROOT")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map_or_else(
            || api_base_url.clone(),
            |v| v.trim_end_matches('/').to_string(),
        );
    let log_level = or_default("STOREFRONT_LOG_LEVEL", "info");
    let api_token = lookup("STOREFRONT_API_TOKEN")
        .ok()
        .filter(|v| !v.is_empty());
    let request_timeout_secs = optional_u64("STOREFRONT_REQUEST_TIMEOUT_SECS")?;
    let user_agent = or_default("STOREFRONT_USER_AGENT", "storefront/0.1 (data-access)");
    let cart_path = PathBuf::from(or_default(
        "STOREFRONT_CART_PATH",
        "./.storefront/cart.json",
    ));
    let wishlist_path = PathBuf::from(or_default(
        "STOREFRONT_WISHLIST_PATH",
        "./.storefront/wishlist.json",
    ));

    let endpoints = EndpointOverrides {
        products: path_list("STOREFRONT_PRODUCT_PATHS")?,
        categories: path_list("STOREFRONT_CATEGORY_PATHS")?,
        orders: path_list("STOREFRONT_ORDER_PATHS")?,
        dashboard: path_list("STOREFRONT_DASHBOARD_PATHS")?,
    };

    Ok(AppConfig {
        env,
        api_base_url,
        media_root,
        log_level,
        api_token,
        request_timeout_secs,
        user_agent,
        cart_path,
        wishlist_path,
        endpoints,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for values other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "STOREFRONT_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

/// Splits a comma-separated list of path prefixes, dropping entries that are
/// blank once surrounding whitespace and slashes are ignored. Prefix
/// normalization happens when the list becomes candidate paths.
fn parse_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.trim_matches('/').is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
