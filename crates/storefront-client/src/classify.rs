//! Maps transport outcomes onto a small, closed taxonomy with one short
//! user-facing message per category.

use serde::Serialize;
use thiserror::Error;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureCategory {
    Validation,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerFault,
    NetworkUnreachable,
    Unknown,
}

impl FailureCategory {
    /// Fixed display message for the category.
    #[must_use]
    pub fn default_message(self) -> &'static str {
        match self {
            FailureCategory::Validation => "Some of the information provided is invalid.",
            FailureCategory::Unauthorized => "Please sign in to continue.",
            FailureCategory::Forbidden => "You do not have permission to do that.",
            FailureCategory::NotFound => "The requested item could not be found.",
            FailureCategory::ServerFault => {
                "The server ran into a problem. Please try again later."
            }
            FailureCategory::NetworkUnreachable => {
                "Cannot reach the server. Check your connection and try again."
            }
            FailureCategory::Unknown => "Something went wrong. Please try again.",
        }
    }

    fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => FailureCategory::Validation,
            401 => FailureCategory::Unauthorized,
            403 => FailureCategory::Forbidden,
            404 => FailureCategory::NotFound,
            500..=599 => FailureCategory::ServerFault,
            _ => FailureCategory::Unknown,
        }
    }
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureCategory::Validation => "validation",
            FailureCategory::Unauthorized => "unauthorized",
            FailureCategory::Forbidden => "forbidden",
            FailureCategory::NotFound => "notFound",
            FailureCategory::ServerFault => "serverFault",
            FailureCategory::NetworkUnreachable => "networkUnreachable",
            FailureCategory::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// The only error type callers of [`crate::StorefrontClient`] ever see.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ClassifiedFailure {
    pub category: FailureCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl From<ApiError> for ClassifiedFailure {
    fn from(err: ApiError) -> Self {
        classify(&err)
    }
}

/// Classifies a transport failure.
///
/// The HTTP status decides when a response was received. A transport error
/// without a response is `NetworkUnreachable`. Everything else is `Unknown`.
#[must_use]
pub fn classify(err: &ApiError) -> ClassifiedFailure {
    let status_code = err.status_code();
    let category = match (status_code, err) {
        (Some(status), _) => FailureCategory::from_status(status),
        (None, ApiError::Http(e)) if !(e.is_builder() || e.is_decode()) => {
            FailureCategory::NetworkUnreachable
        }
        (None, ApiError::Rejected { .. }) => FailureCategory::Validation,
        _ => FailureCategory::Unknown,
    };

    let server_message = match err {
        ApiError::Status {
            message: Some(message),
            ..
        }
        | ApiError::Rejected { message } => Some(message.as_str()),
        _ => None,
    };

    let message = match (category, server_message) {
        (FailureCategory::Validation, Some(msg)) if !msg.trim().is_empty() => msg.trim().to_string(),
        _ => category.default_message().to_string(),
    };

    ClassifiedFailure {
        category,
        message,
        status_code,
    }
}
