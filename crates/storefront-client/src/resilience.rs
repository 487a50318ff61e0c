//! Graceful degradation for read operations.

use std::future::Future;

use crate::classify::classify;
use crate::error::ApiError;

/// Awaits `fut`; on failure asks `fallback` for a substitute.
///
/// When the fallback yields a value the failure is logged and swallowed.
/// When it yields `None` the original failure is returned unchanged.
///
/// # Errors
///
/// Returns the failure of `fut` when `fallback` declines to substitute.
pub async fn with_fallback<T, Fut, F>(operation: &str, fut: Fut, fallback: F) -> Result<T, ApiError>
where
    Fut: Future<Output = Result<T, ApiError>>,
    F: FnOnce(&ApiError) -> Option<T>,
{
    match fut.await {
        Ok(value) => Ok(value),
        Err(err) => match fallback(&err) {
            Some(substitute) => {
                tracing::warn!(
                    operation,
                    category = %classify(&err).category,
                    error = %err,
                    "request failed; serving fallback data"
                );
                Ok(substitute)
            }
            None => Err(err),
        },
    }
}
