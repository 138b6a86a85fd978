//! Page navigation methods.

use tokio::time::Instant;
use tracing::debug;

use crate::browser::Reference;
use crate::error::{Error, Result};
use crate::navigator::strip_query;
use crate::scope::ScopeDescriptor;

use super::Page;

// ============================================================================
// Page - Navigation
// ============================================================================

impl Page {
    /// Navigates to `url`, resolved against the session's base URL.
    ///
    /// Absolute URLs are used as given; `//host/...` reuses the current
    /// page's scheme; `/path` and `path` are resolved against the base URL
    /// (never against the current page). An empty `url` opens the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRedirect`] when `url` needs a base URL and none
    /// is configured. A protocol-relative `url` fails with the driver's error
    /// when the current URL cannot be read.
    pub async fn navigate_to_url(&self, url: &str) -> Result<()> {
        let current = if url.trim_start().starts_with("//") {
            Some(self.session.driver().current_url().await?)
        } else {
            None
        };

        let target = self.session.navigator().resolve(url, current.as_deref())?;
        self.navigate_core(&target).await
    }

    /// Navigates to the base URL.
    pub async fn navigate_to_base(&self) -> Result<()> {
        self.navigate_to_url("").await
    }

    /// Navigates one step back in history.
    pub async fn navigate_back(&self) -> Result<()> {
        self.activate_scope().await?;
        debug!("Navigating back");
        let result = self.session.driver().back().await;
        self.session.scopes().invalidate();
        result
    }

    /// Navigates one step forward in history.
    pub async fn navigate_forward(&self) -> Result<()> {
        self.activate_scope().await?;
        debug!("Navigating forward");
        let result = self.session.driver().forward().await;
        self.session.scopes().invalidate();
        result
    }

    /// Reloads the current page.
    pub async fn refresh(&self) -> Result<()> {
        self.activate_scope().await?;
        debug!("Reloading page");
        let result = self.session.driver().refresh().await;
        self.session.scopes().invalidate();
        result
    }

    async fn navigate_core(&self, url: &str) -> Result<()> {
        self.activate_scope().await?;

        debug!(url = %url, "Start navigation");
        let start = Instant::now();
        let result = self.session.driver().navigate(url).await;
        // The driver is back on the top-level document, whatever was focused.
        self.session.scopes().invalidate();
        result?;

        debug!(
            url = %url,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Navigation finished"
        );
        Ok(())
    }
}

// ============================================================================
// Page - Location
// ============================================================================

impl Page {
    /// Returns the URL of the focused window.
    pub async fn current_url(&self) -> Result<String> {
        self.session.driver().current_url().await
    }

    /// Returns the current URL without query string and fragment.
    pub async fn current_url_path(&self) -> Result<String> {
        Ok(strip_query(&self.current_url().await?))
    }

    /// Returns the page title.
    pub async fn title(&self) -> Result<String> {
        self.session.driver().title().await
    }

    /// Joins scheme, host and port of the base URL with `relative`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRedirect`] without a base URL.
    pub fn absolute_url(&self, relative: &str) -> Result<String> {
        self.session.navigator().absolute_url(relative)
    }
}

// ============================================================================
// Page - Tabs
// ============================================================================

impl Page {
    /// Switches to the tab at `index` in the driver's window list.
    ///
    /// Returns the top-level page of that tab. Its scope is pinned to the
    /// tab's window, so queries on it switch back to the tab later on. The
    /// session's own top-level page stays with the window focused before the
    /// first switch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `index` is out of range.
    pub async fn switch_to_tab(&self, index: usize) -> Result<Page> {
        let driver = self.session.driver();
        let handles = driver.window_handles().await?;
        let handle = handles.get(index).cloned().ok_or_else(|| {
            Error::invalid_argument(format!(
                "tab index {index} out of range ({} tabs open)",
                handles.len()
            ))
        })?;

        debug!(index, window = %handle, "Switching tab");

        let current = driver.current_window_handle().await?;
        self.session.pin_root_window(current);

        let scopes = self.session.scopes();
        scopes.invalidate();
        driver.switch_to_window(&handle).await?;

        let scope = ScopeDescriptor::root(Some(handle));
        scopes.mark_active(scope.id());
        Ok(self.session.register_page(scope))
    }
}

// ============================================================================
// Tests
// ============================================================================
