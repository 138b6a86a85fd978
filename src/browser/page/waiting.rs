//! Waiting on a page with the session's default wait options.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::trace;

use crate::error::Result;
use crate::wait;

use super::Page;

// ============================================================================
// Page - Waiting
// ============================================================================

impl Page {
    /// Pauses for the session's action wait.
    pub async fn wait(&self) -> &Self {
        self.session.action_pause().await;
        self
    }

    /// Pauses for `duration`.
    pub async fn wait_for_duration(&self, duration: Duration) -> &Self {
        trace!(wait_ms = duration.as_millis() as u64, "Waiting");
        sleep(duration).await;
        self
    }

    /// Waits until `predicate` returns `true`.
    ///
    /// Stale and non-interactable elements count as "not yet"; other errors
    /// end the wait immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WaitTimeout`](crate::Error::WaitTimeout) carrying
    /// `message` once the session's wait timeout passes.
    ///
    /// # Example
    ///
    /// ```ignore
    /// page.wait_for("spinner still visible", || async {
    ///     Ok(!page.is_displayed(".spinner").await?)
    /// })
    /// .await?;
    /// ```
    pub async fn wait_for<F, Fut>(&self, message: &str, predicate: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        wait::wait_for(&self.session.options().wait, message, true, predicate).await
    }

    /// Waits until `predicate` returns `true`, ending on the first error.
    ///
    /// Unlike [`wait_for`](Self::wait_for), stale and non-interactable
    /// elements are returned as errors instead of being retried.
    ///
    /// # Errors
    ///
    /// Returns the predicate's first error, or
    /// [`Error::WaitTimeout`](crate::Error::WaitTimeout) carrying `message`.
    pub async fn wait_for_strict<F, Fut>(&self, message: &str, predicate: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        wait::wait_for(&self.session.options().wait, message, false, predicate).await
    }

    /// Waits until `check` returns `true`, treating every error as "not yet".
    pub async fn wait_for_check<F, Fut>(&self, message: &str, check: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        wait::wait_for_check(&self.session.options().wait, message, check).await
    }

    /// Repeats `action` until it succeeds and returns its value.
    ///
    /// # Errors
    ///
    /// See [`wait::retry_until_success`].
    pub async fn retry_until_success<T, F, Fut>(
        &self,
        message: Option<&str>,
        action: F,
    ) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        wait::retry_until_success(&self.session.options().wait, message, action).await
    }
}

// ============================================================================
// Tests
// ============================================================================
