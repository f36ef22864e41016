//! Fail-open utilities for best-effort operations
//!
//! The probe has exactly one operation that must never abort the run: the
//! failure-screenshot attempt. If the page is unusable after a navigation
//! failure, that capture fails too; it is logged and swallowed, never
//! propagated.
//!
//! DO NOT use fail-open for:
//! - Navigation or the heading wait (those ARE the probe's verdict)
//! - Success-artifact capture (a missing success artifact is a failure)

use std::future::Future;
use tracing::warn;

use crate::Result;

/// Execute a best-effort operation, logging and discarding its error.
///
/// Returns `Some(value)` on success, `None` on failure (after a
/// `tracing::warn!`).
///
/// ```no_run
/// use pagecheck_core::fail_open::fail_open;
/// use pagecheck_core::Result;
///
/// async fn capture_error_screenshot() -> Result<()> {
///     // Screenshot attempt that may itself fail
///     Ok(())
/// }
///
/// async fn example() {
///     let result = fail_open("error_screenshot", || capture_error_screenshot()).await;
///     // None if the capture failed; the probe run continues either way
/// }
/// ```
pub async fn fail_open<F, Fut, T>(operation_name: &str, f: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match f().await {
        Ok(val) => Some(val),
        Err(e) => {
            warn!("{} failed (fail-open): {}", operation_name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PagecheckError;

    #[tokio::test]
    async fn test_fail_open_success() {
        let result = fail_open("test_op", || async { Ok(42) }).await;
        assert_eq!(result, Some(42));
    }

    #[tokio::test]
    async fn test_fail_open_swallows_error() {
        let result: Option<()> = fail_open("test_op", || async {
            Err(PagecheckError::Screenshot("page unusable".into()))
        })
        .await;
        assert_eq!(result, None);
    }
}
