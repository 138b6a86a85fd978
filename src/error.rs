//! Error types for scoped WebDriver automation.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use scoped_webdriver::{Reference, Result};
//!
//! async fn example(page: &Page) -> Result<()> {
//!     let button = page.find_first("#submit").await?;
//!     button.click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`], [`Error::InvalidArgument`] |
//! | Query | [`Error::ElementNotFound`], [`Error::MultipleElements`], [`Error::CountMismatch`], [`Error::IndexOutOfRange`], [`Error::UnexpectedTag`] |
//! | Scope | [`Error::ScopeActivation`], [`Error::NoSuchWindow`], [`Error::NoSuchFrame`] |
//! | Waiting | [`Error::WaitTimeout`] |
//! | Navigation | [`Error::InvalidRedirect`], [`Error::AlertNotVisible`] |
//! | Driver | [`Error::StaleElement`], [`Error::ElementNotInteractable`], [`Error::Script`], [`Error::Unsupported`], [`Error::Driver`] |
//! | External | [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::{ElementHandle, WindowHandle};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Query errors always carry the reconstructed full selector, and where it
/// matters the scope they were raised in, so a failure can be read without
/// reproducing the run.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when session options are invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// Invalid argument passed to an operation.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Query Errors
    // ========================================================================
    /// A query requiring at least one element matched nothing.
    #[error("Sequence contains no elements. Selector: '{selector}', scope: {scope}")]
    ElementNotFound {
        /// Full selector of the query.
        selector: String,
        /// Scope the query ran in.
        scope: String,
    },

    /// A query requiring at most one element matched several.
    #[error(
        "Sequence contains more than one element ({count}). Selector: '{selector}', scope: {scope}"
    )]
    MultipleElements {
        /// Full selector of the query.
        selector: String,
        /// Scope the query ran in.
        scope: String,
        /// Number of matched elements.
        count: usize,
    },

    /// An exact-count assertion failed.
    #[error(
        "Element count in sequence is different from the expected value. Selector: '{selector}', expected: {expected}, actual: {actual}"
    )]
    CountMismatch {
        /// Full selector of the query.
        selector: String,
        /// Expected number of elements.
        expected: usize,
        /// Actual number of elements.
        actual: usize,
    },

    /// An index was outside the bounds of a collection.
    #[error(
        "Index is out of range. Selector: '{selector}', sequence contains {count} elements, index: {index}"
    )]
    IndexOutOfRange {
        /// Full selector of the query.
        selector: String,
        /// Number of elements in the collection.
        count: usize,
        /// Requested index.
        index: usize,
    },

    /// An element did not have one of the expected tag names.
    #[error("Element '{selector}' has tag '{actual}', expected one of: {expected}")]
    UnexpectedTag {
        /// Full selector of the element.
        selector: String,
        /// Comma-separated list of accepted tag names.
        expected: String,
        /// Actual tag name.
        actual: String,
    },

    // ========================================================================
    // Scope Errors
    // ========================================================================
    /// Switching the driver to a window or frame failed.
    ///
    /// The active scope marker is cleared when this is returned.
    #[error("Failed to activate scope {scope}: {source}")]
    ScopeActivation {
        /// Description of the scope being activated.
        scope: String,
        /// The underlying driver failure.
        #[source]
        source: Box<Error>,
    },

    /// The driver has no window with this handle.
    #[error("No such window: {handle}")]
    NoSuchWindow {
        /// The missing window handle.
        handle: WindowHandle,
    },

    /// The driver could not find the frame to switch into.
    #[error("No such frame: {target}")]
    NoSuchFrame {
        /// Description of the frame target.
        target: String,
    },

    // ========================================================================
    // Wait Errors
    // ========================================================================
    /// A condition or action did not succeed in time.
    #[error("{message} (timed out after {timeout_ms}ms)")]
    WaitTimeout {
        /// Caller supplied failure message.
        message: String,
        /// Milliseconds allowed for the wait.
        timeout_ms: u64,
        /// Last failure observed before the deadline, if any.
        #[source]
        source: Option<Box<Error>>,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Navigation was requested without a usable URL.
    #[error("Cannot navigate to '{url}': no usable URL")]
    InvalidRedirect {
        /// The URL input that could not be resolved.
        url: String,
    },

    /// An alert operation was attempted with no alert open.
    #[error("Alert not visible")]
    AlertNotVisible,

    // ========================================================================
    // Driver Errors
    // ========================================================================
    /// Element is no longer attached to the focused document.
    ///
    /// Transient: may resolve after a re-render.
    #[error("Stale element: {element}")]
    StaleElement {
        /// The stale element's handle.
        element: ElementHandle,
    },

    /// Element exists but cannot currently be interacted with.
    ///
    /// Transient: may resolve once the page settles.
    #[error("Element {element} is not interactable: {message}")]
    ElementNotInteractable {
        /// The element's handle.
        element: ElementHandle,
        /// Driver supplied reason.
        message: String,
    },

    /// JavaScript execution failed.
    #[error("Script error: {message}")]
    Script {
        /// Error message from script execution.
        message: String,
    },

    /// The driver does not implement an optional capability.
    #[error("Driver does not support {capability}")]
    Unsupported {
        /// Name of the missing capability.
        capability: &'static str,
    },

    /// Any other failure reported by the driver.
    #[error("Driver error: {message}")]
    Driver {
        /// Description of the driver failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>, scope: impl Into<String>) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
            scope: scope.into(),
        }
    }

    /// Creates a multiple elements error.
    #[inline]
    pub fn multiple_elements(
        selector: impl Into<String>,
        scope: impl Into<String>,
        count: usize,
    ) -> Self {
        Self::MultipleElements {
            selector: selector.into(),
            scope: scope.into(),
            count,
        }
    }

    /// Creates a count mismatch error.
    #[inline]
    pub fn count_mismatch(selector: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::CountMismatch {
            selector: selector.into(),
            expected,
            actual,
        }
    }

    /// Creates an index out of range error.
    #[inline]
    pub fn index_out_of_range(selector: impl Into<String>, count: usize, index: usize) -> Self {
        Self::IndexOutOfRange {
            selector: selector.into(),
            count,
            index,
        }
    }

    /// Creates an unexpected tag error.
    #[inline]
    pub fn unexpected_tag(
        selector: impl Into<String>,
        expected: &[&str],
        actual: impl Into<String>,
    ) -> Self {
        Self::UnexpectedTag {
            selector: selector.into(),
            expected: expected.join(", "),
            actual: actual.into(),
        }
    }

    /// Wraps a driver failure as a scope activation error.
    #[inline]
    pub fn scope_activation(scope: impl Into<String>, source: Error) -> Self {
        Self::ScopeActivation {
            scope: scope.into(),
            source: Box::new(source),
        }
    }

    /// Creates a no such window error.
    #[inline]
    pub fn no_such_window(handle: WindowHandle) -> Self {
        Self::NoSuchWindow { handle }
    }

    /// Creates a no such frame error.
    #[inline]
    pub fn no_such_frame(target: impl Into<String>) -> Self {
        Self::NoSuchFrame {
            target: target.into(),
        }
    }

    /// Creates a wait timeout error, optionally wrapping the last failure.
    #[inline]
    pub fn wait_timeout(message: impl Into<String>, timeout_ms: u64, last: Option<Error>) -> Self {
        Self::WaitTimeout {
            message: message.into(),
            timeout_ms,
            source: last.map(Box::new),
        }
    }

    /// Creates an invalid redirect error.
    #[inline]
    pub fn invalid_redirect(url: impl Into<String>) -> Self {
        Self::InvalidRedirect { url: url.into() }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(element: ElementHandle) -> Self {
        Self::StaleElement { element }
    }

    /// Creates an element not interactable error.
    #[inline]
    pub fn not_interactable(element: ElementHandle, message: impl Into<String>) -> Self {
        Self::ElementNotInteractable {
            element,
            message: message.into(),
        }
    }

    /// Creates a script error.
    #[inline]
    pub fn script_error(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }

    /// Creates an unsupported capability error.
    #[inline]
    pub fn unsupported(capability: &'static str) -> Self {
        Self::Unsupported { capability }
    }

    /// Creates a generic driver error.
    #[inline]
    pub fn driver(message: impl Into<String>) -> Self {
        Self::Driver {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` for driver failures expected to clear up on their own.
    ///
    /// Only stale and not-interactable elements qualify. The condition mode
    /// of the waiter may treat these as "not yet satisfied".
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::StaleElement { .. } | Self::ElementNotInteractable { .. }
        )
    }

    /// Returns `true` if this is a query error about matched elements.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. }
                | Self::MultipleElements { .. }
                | Self::CountMismatch { .. }
                | Self::IndexOutOfRange { .. }
                | Self::UnexpectedTag { .. }
                | Self::StaleElement { .. }
        )
    }

    /// Returns `true` if this is a wait timeout.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }

    /// Returns `true` if switching window or frame failed.
    #[inline]
    #[must_use]
    pub fn is_scope_error(&self) -> bool {
        matches!(
            self,
            Self::ScopeActivation { .. } | Self::NoSuchWindow { .. } | Self::NoSuchFrame { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
