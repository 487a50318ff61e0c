use thiserror::Error;

/// Transport-level failures from the remote commerce API.
///
/// These never reach callers of [`crate::StorefrontClient`] directly; they are
/// converted to [`crate::ClassifiedFailure`] at the operation boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("resource not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: u16,
        url: String,
        /// Human-readable message extracted from the error body, if any.
        message: Option<String>,
    },

    /// The API answered 2xx but its envelope reported `success: false`.
    #[error("request rejected by the API: {message}")]
    Rejected { message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid API base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("no candidate paths configured for {resource}")]
    NoCandidates { resource: String },
}

impl ApiError {
    /// Returns `true` for outcomes that mean "this URL spelling does not
    /// exist", which the endpoint resolver treats as a cue to try the next
    /// candidate.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::NotFound { .. } => true,
            ApiError::Http(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// HTTP status code of the response, when one was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
