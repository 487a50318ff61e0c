//! HTTP client for the remote commerce API.
//!
//! Every public operation resolves its endpoint through the
//! [`EndpointCatalog`], unwraps the response envelope, normalizes the payload
//! into canonical records, and reports failures only as
//! [`ClassifiedFailure`](crate::ClassifiedFailure).

mod categories;
mod dashboard;
mod orders;
mod products;

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use storefront_core::AppConfig;

use crate::endpoint::{EndpointCatalog, EndpointResolver};
use crate::envelope::unwrap_envelope;
use crate::error::ApiError;
use crate::media::MediaResolver;

/// Characters left as-is in path segments (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Client for the storefront and admin commerce API.
///
/// Use [`StorefrontClient::from_config`] in applications or
/// [`StorefrontClient::new`] to point at a mock server in tests.
pub struct StorefrontClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
    media: MediaResolver,
    endpoints: EndpointCatalog,
}

impl StorefrontClient {
    /// Creates a client with the built-in endpoint candidates.
    ///
    /// `timeout_secs` bounds each whole request when set; the connect phase
    /// is always bounded to 10 seconds.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidBaseUrl`] if `base_url` is not an absolute
    ///   `http`/`https` URL.
    /// - [`ApiError::Http`] if the underlying `reqwest::Client` cannot be
    ///   constructed.
    pub fn new(
        base_url: &str,
        media_root: &str,
        timeout_secs: Option<u64>,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let parsed = Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: None,
            media: MediaResolver::new(media_root),
            endpoints: EndpointCatalog::default(),
        })
    }

    /// Builds a client from loaded configuration: base URL, media root,
    /// timeout, user agent, bearer token, and endpoint overrides.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Self::new(
            &config.api_base_url,
            &config.media_root,
            config.request_timeout_secs,
            &config.user_agent,
        )?
        .with_endpoints(EndpointCatalog::from_overrides(&config.endpoints));

        Ok(match &config.api_token {
            Some(token) => client.with_auth_token(token),
            None => client,
        })
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    #[must_use]
    pub fn with_auth_token(mut self, token: &str) -> Self {
        self.auth_token = Some(token.to_string());
        self
    }

    #[must_use]
    pub fn with_endpoints(mut self, endpoints: EndpointCatalog) -> Self {
        self.endpoints = endpoints;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn media(&self) -> &MediaResolver {
        &self.media
    }

    #[must_use]
    pub fn endpoints(&self) -> &EndpointCatalog {
        &self.endpoints
    }

    /// Requests `suffix` under each of the resolver's candidates in turn and
    /// returns the unwrapped body of the first one that exists.
    pub(super) async fn fetch(
        &self,
        resolver: &EndpointResolver,
        method: Method,
        suffix: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        resolver
            .resolve(suffix, |path| {
                let method = method.clone();
                async move { self.request_json(method, &path, query, body).await }
            })
            .await
    }

    /// Sends one request and parses the response.
    ///
    /// 404 becomes [`ApiError::NotFound`]; any other non-2xx status becomes
    /// [`ApiError::Status`] carrying the server's message when the body has
    /// one. An empty 2xx body parses as `null`.
    async fn request_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let context = format!("{method} {url}");

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound { url });
        }

        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
                message: error_message(&text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let parsed: Value = serde_json::from_str(&text)
            .map_err(|e| ApiError::Deserialize { context, source: e })?;
        unwrap_envelope(parsed)
    }
}

/// `/` followed by `segment`, percent-encoded for use in a URL path.
pub(super) fn path_segment(segment: &str) -> String {
    format!("/{}", utf8_percent_encode(segment.trim(), PATH_SEGMENT))
}

/// Pulls a human-readable message out of an error response body.
///
/// Looks at `message`, `error`, and `title`, then at the first entry of a
/// validation `errors` map or list. A short plain-text body is used as-is.
fn error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(json) = serde_json::from_str::<Value>(trimmed) else {
        return (trimmed.len() <= 200 && !trimmed.starts_with('<')).then(|| trimmed.to_string());
    };

    let direct = ["message", "Message", "error", "Error", "title", "Title"]
        .iter()
        .find_map(|key| json.get(*key).and_then(Value::as_str))
        .map(str::to_string);

    direct.or_else(|| {
        let errors = json.get("errors").or_else(|| json.get("Errors"))?;
        let first = match errors {
            Value::Object(map) => map.values().next()?,
            Value::Array(items) => items.first()?,
            _ => return None,
        };
        match first {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items.first().and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    })
    .filter(|m| !m.trim().is_empty())
}
