//! Resolution of storage paths into absolute media URLs.

use std::sync::LazyLock;

use regex::Regex;
use storefront_core::PLACEHOLDER_IMAGE_URL;

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid regex"));

static SLASH_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/{2,}").expect("valid regex"));

/// Resolves `path` against `media_root`.
///
/// 1. Empty or missing paths become [`PLACEHOLDER_IMAGE_URL`].
/// 2. `http://` and `https://` URLs are returned unchanged.
/// 3. Anything else has backslashes turned into slashes, slash runs
///    collapsed, and leading slashes stripped before being joined to the
///    root with exactly one `/`.
#[must_use]
pub fn resolve_media(path: Option<&str>, media_root: &str) -> String {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return PLACEHOLDER_IMAGE_URL.to_string();
    };
    if ABSOLUTE_URL.is_match(path) {
        return path.to_string();
    }

    let forward = path.replace('\\', "/");
    let collapsed = SLASH_RUNS.replace_all(&forward, "/");
    let relative = collapsed.trim_start_matches('/');
    let root = media_root.trim_end_matches('/');

    if relative.is_empty() {
        return PLACEHOLDER_IMAGE_URL.to_string();
    }
    format!("{root}/{relative}")
}

/// A media root bound once from configuration.
#[derive(Debug, Clone)]
pub struct MediaResolver {
    root: String,
}

impl MediaResolver {
    #[must_use]
    pub fn new(root: &str) -> Self {
        Self {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// See [`resolve_media`].
    #[must_use]
    pub fn resolve(&self, path: Option<&str>) -> String {
        resolve_media(path, &self.root)
    }

    /// Resolves a path that is allowed to be absent: blank input stays `None`
    /// instead of becoming the placeholder.
    #[must_use]
    pub fn resolve_optional(&self, path: Option<&str>) -> Option<String> {
        path.filter(|p| !p.trim().is_empty())
            .map(|p| self.resolve(Some(p)))
    }
}
