//! Builder pattern for session configuration.
//!
//! # Example
//!
//! ```ignore
//! use scoped_webdriver::Session;
//!
//! let session = Session::builder(driver)
//!     .base_url("https://localhost:5001/app")
//!     .action_wait(Duration::from_millis(100))
//!     .build()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::driver::{BrowserDriver, SelectMethod};
use crate::error::Result;
use crate::navigator::Navigator;
use crate::wait::WaitOptions;

use super::core::Session;
use super::options::SessionOptions;

// ============================================================================
// SessionBuilder
// ============================================================================

/// Builder for configuring a [`Session`].
///
/// Use [`Session::builder()`] to create a new builder.
#[derive(Clone)]
pub struct SessionBuilder {
    driver: Arc<dyn BrowserDriver>,
    options: SessionOptions,
}

impl fmt::Debug for SessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionBuilder")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SessionBuilder Implementation
// ============================================================================

impl SessionBuilder {
    /// Creates a builder with default options.
    #[inline]
    #[must_use]
    pub fn new(driver: Arc<dyn BrowserDriver>) -> Self {
        Self {
            driver,
            options: SessionOptions::default(),
        }
    }

    /// Replaces all options at once.
    #[inline]
    #[must_use]
    pub fn options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the base URL for relative navigation.
    #[inline]
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.options.base_url = Some(url.into());
        self
    }

    /// Sets the pause after actions.
    #[inline]
    #[must_use]
    pub fn action_wait(mut self, wait: Duration) -> Self {
        self.options.action_wait = wait;
        self
    }

    /// Sets the default select method.
    #[inline]
    #[must_use]
    pub fn select_method(mut self, method: SelectMethod) -> Self {
        self.options.select_method = method;
        self
    }

    /// Sets the default wait options.
    #[inline]
    #[must_use]
    pub fn wait(mut self, wait: WaitOptions) -> Self {
        self.options.wait = wait;
        self
    }

    /// Builds the session with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the base URL is not an absolute URL
    ///
    /// [`Error::Config`]: crate::Error::Config
    pub fn build(self) -> Result<Session> {
        let navigator = Navigator::new(self.options.base_url.as_deref())?;
        Ok(Session::new(self.driver, self.options, navigator))
    }
}

// ============================================================================
// Tests
// ============================================================================
