//! Browser-control capability surface.
//!
//! The core never talks to a browser directly. Everything it needs from the
//! underlying WebDriver binding is expressed by [`BrowserDriver`], which an
//! adapter crate implements for a concrete client.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`BrowserDriver`] | Async capability trait (find, switch, navigate, act) |
//! | [`FrameTarget`] | What to switch into when entering a frame |
//! | [`By`] | Selector string plus optional [`SelectMethod`] override |
//!
//! # Focus model
//!
//! A driver has exactly one focused browsing context: one window and, inside
//! it, either the top-level document or a nested frame. Element handles are
//! only valid while the document they were found in is focused; using one
//! from another document is reported as [`Error::StaleElement`].
//!
//! [`Error::StaleElement`]: crate::Error::StaleElement

// ============================================================================
// Submodules
// ============================================================================

/// Element locator strategies.
pub mod selector;

/// In-memory recording driver for tests.
#[cfg(test)]
pub(crate) mod fake;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::{ElementHandle, WindowHandle};

// ============================================================================
// Re-exports
// ============================================================================

pub use selector::{By, SelectMethod};

// ============================================================================
// FrameTarget
// ============================================================================

/// Target of a frame switch, resolved relative to the focused document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameTarget {
    /// Frame element located by selector.
    Locator(By),
    /// Frame element already located.
    Element(ElementHandle),
}

impl fmt::Display for FrameTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locator(by) => write!(f, "{by}"),
            Self::Element(handle) => write!(f, "element {handle}"),
        }
    }
}

// ============================================================================
// BrowserDriver
// ============================================================================

/// Capabilities the core consumes from a WebDriver binding.
///
/// All methods act on the currently focused window/document. Implementations
/// report stale or non-interactable elements with
/// [`Error::StaleElement`]/[`Error::ElementNotInteractable`] so the waiter can
/// recognize them as transient.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// Finds elements matching `selector`.
    ///
    /// With `context` the search is limited to descendants of that element;
    /// without it the whole focused document is searched. Results are in
    /// document order.
    async fn find_elements(
        &self,
        context: Option<&ElementHandle>,
        method: SelectMethod,
        selector: &str,
    ) -> Result<Vec<ElementHandle>>;

    // ------------------------------------------------------------------------
    // Focus
    // ------------------------------------------------------------------------

    /// Focuses the top-level document of another window.
    async fn switch_to_window(&self, handle: &WindowHandle) -> Result<()>;

    /// Focuses a frame of the focused document.
    async fn switch_to_frame(&self, target: &FrameTarget) -> Result<()>;

    /// Focuses the top-level document of the focused window.
    async fn switch_to_default_content(&self) -> Result<()>;

    /// Returns the handle of the focused window.
    async fn current_window_handle(&self) -> Result<WindowHandle>;

    /// Returns all window handles in tab order.
    async fn window_handles(&self) -> Result<Vec<WindowHandle>>;

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Loads `url` in the focused window.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Goes one step back in history.
    async fn back(&self) -> Result<()>;

    /// Goes one step forward in history.
    async fn forward(&self) -> Result<()>;

    /// Reloads the page.
    async fn refresh(&self) -> Result<()>;

    /// Returns the URL of the focused window.
    async fn current_url(&self) -> Result<String>;

    /// Returns the page title.
    async fn title(&self) -> Result<String>;

    // ------------------------------------------------------------------------
    // Alerts
    // ------------------------------------------------------------------------

    /// Returns the text of the open alert, or `None` when no alert is open.
    async fn alert_text(&self) -> Result<Option<String>>;

    /// Accepts the open alert.
    async fn accept_alert(&self) -> Result<()>;

    /// Dismisses the open alert.
    async fn dismiss_alert(&self) -> Result<()>;

    // ------------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------------

    /// Clicks an element.
    async fn click(&self, element: &ElementHandle) -> Result<()>;

    /// Submits the form an element belongs to.
    async fn submit(&self, element: &ElementHandle) -> Result<()>;

    /// Types text into an element.
    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<()>;

    /// Clears an element's value.
    async fn clear(&self, element: &ElementHandle) -> Result<()>;

    /// Reads an attribute, `None` when absent.
    async fn attribute(&self, element: &ElementHandle, name: &str) -> Result<Option<String>>;

    /// Reads the rendered text.
    async fn text(&self, element: &ElementHandle) -> Result<String>;

    /// Checks visibility.
    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool>;

    /// Reads the lowercase tag name.
    async fn tag_name(&self, element: &ElementHandle) -> Result<String>;

    // ------------------------------------------------------------------------
    // Optional capabilities
    // ------------------------------------------------------------------------

    /// Executes JavaScript in the focused document.
    ///
    /// Not every driver supports scripting; the default reports
    /// [`Error::Unsupported`].
    async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        let _ = (script, args);
        Err(Error::unsupported("script execution"))
    }

    /// Captures a PNG screenshot of the focused window.
    async fn screenshot(&self) -> Result<Vec<u8>> {
        Err(Error::unsupported("screenshots"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_target_display() {
        assert_eq!(FrameTarget::Locator(By::css("#f")).to_string(), "#f");
        assert_eq!(
            FrameTarget::Element(ElementHandle::new("e-3")).to_string(),
            "element e-3"
        );
    }

    #[test]
    fn test_driver_is_object_safe() {
        fn assert_dyn(_: Option<&dyn BrowserDriver>) {}
        assert_dyn(None);
    }
}
