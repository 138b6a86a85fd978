//! Session configuration.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use scoped_webdriver::{SelectMethod, SessionOptions, WaitOptions};
//!
//! let options = SessionOptions::new()
//!     .with_base_url("https://localhost:5001/app")
//!     .with_action_wait(Duration::from_millis(100))
//!     .with_select_method(SelectMethod::XPath)
//!     .with_wait(WaitOptions::new(Duration::from_secs(10)));
//! ```

use std::time::Duration;

use crate::driver::SelectMethod;
use crate::wait::WaitOptions;

/// Default pause after an action such as click or submit.
pub const DEFAULT_ACTION_WAIT: Duration = Duration::from_millis(250);

// ============================================================================
// SessionOptions
// ============================================================================

/// Options shared by every operation of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Base for relative navigation. `None` allows absolute URLs only.
    pub base_url: Option<String>,

    /// Pause after click, submit, send-keys, clear and alert actions.
    pub action_wait: Duration,

    /// Select method used when a query does not pin one.
    pub select_method: SelectMethod,

    /// Defaults for the waiter shortcuts on pages and elements.
    pub wait: WaitOptions,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl SessionOptions {
    /// Creates options with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: None,
            action_wait: DEFAULT_ACTION_WAIT,
            select_method: SelectMethod::Css,
            wait: WaitOptions::default(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SessionOptions {
    /// Sets the base URL for relative navigation.
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the pause after actions. Zero disables it.
    #[inline]
    #[must_use]
    pub fn with_action_wait(mut self, wait: Duration) -> Self {
        self.action_wait = wait;
        self
    }

    /// Sets the default select method.
    #[inline]
    #[must_use]
    pub fn with_select_method(mut self, method: SelectMethod) -> Self {
        self.select_method = method;
        self
    }

    /// Sets the default wait timeout and interval.
    #[inline]
    #[must_use]
    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SessionOptions::default();
        assert!(options.base_url.is_none());
        assert_eq!(options.action_wait, Duration::from_millis(250));
        assert_eq!(options.select_method, SelectMethod::Css);
        assert_eq!(options.wait, WaitOptions::default());
    }

    #[test]
    fn test_builder_chain() {
        let options = SessionOptions::new()
            .with_base_url("https://host/app")
            .with_action_wait(Duration::ZERO)
            .with_select_method(SelectMethod::XPath);

        assert_eq!(options.base_url.as_deref(), Some("https://host/app"));
        assert_eq!(options.action_wait, Duration::ZERO);
        assert_eq!(options.select_method, SelectMethod::XPath);
    }
}
