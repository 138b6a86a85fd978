//! A single matched element.
//!
//! Every method activates the element's scope before talking to the driver,
//! so an element found inside a frame stays usable after the test has worked
//! in another frame in between.
//!
//! # Example
//!
//! ```ignore
//! let field = page.find_single("input[name='email']").await?;
//! field.clear().await?;
//! field.send_keys("user@example.com").await?;
//!
//! let label = field.parent_element().expect("found under a form");
//! assert!(label.has_attribute("novalidate").await?);
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::ElementHandle;
use crate::scope::ScopeDescriptor;
use crate::session::Session;

use super::Reference;
use super::arena::NodeGuard;

// ============================================================================
// Element
// ============================================================================

/// One element matched by a query.
#[derive(Clone)]
pub struct Element {
    pub(crate) session: Session,
    pub(crate) node: Arc<NodeGuard>,
    pub(crate) handle: ElementHandle,
    pub(crate) scope: Arc<ScopeDescriptor>,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.node.id())
            .field("handle", &self.handle)
            .field("selector", &self.full_selector())
            .field("scope", &self.scope.to_string())
            .finish_non_exhaustive()
    }
}

impl Element {
    pub(crate) fn new(
        session: Session,
        node: Arc<NodeGuard>,
        handle: ElementHandle,
        scope: Arc<ScopeDescriptor>,
    ) -> Self {
        Self {
            session,
            node,
            handle,
            scope,
        }
    }

    /// Returns the driver's handle for this element.
    #[inline]
    #[must_use]
    pub fn handle(&self) -> &ElementHandle {
        &self.handle
    }

    /// Element this one was found under, `None` when found from a page.
    #[must_use]
    pub fn parent_element(&self) -> Option<Element> {
        self.session.parent_element(&self.node)
    }
}

// ============================================================================
// Element - Actions
// ============================================================================

impl Element {
    /// Clicks the element.
    pub async fn click(&self) -> Result<()> {
        self.activate_scope().await?;
        debug!(element = %self.handle, selector = %self.full_selector(), "Clicking element");
        self.session.driver().click(&self.handle).await
    }

    /// Submits the form the element belongs to.
    pub async fn submit(&self) -> Result<()> {
        self.activate_scope().await?;
        debug!(element = %self.handle, selector = %self.full_selector(), "Submitting element");
        self.session.driver().submit(&self.handle).await
    }

    /// Types `text` into the element.
    pub async fn send_keys(&self, text: &str) -> Result<()> {
        self.activate_scope().await?;
        debug!(element = %self.handle, text_len = text.len(), "Sending keys");
        self.session.driver().send_keys(&self.handle, text).await
    }

    /// Clears the element's value.
    pub async fn clear(&self) -> Result<()> {
        self.activate_scope().await?;
        debug!(element = %self.handle, "Clearing element");
        self.session.driver().clear(&self.handle).await
    }

    /// Pauses for the session's action wait.
    pub async fn wait(&self) -> &Self {
        self.session.action_pause().await;
        self
    }
}

// ============================================================================
// Element - Properties
// ============================================================================

impl Element {
    /// Returns the rendered text.
    pub async fn text(&self) -> Result<String> {
        self.activate_scope().await?;
        self.session.driver().text(&self.handle).await
    }

    /// Returns an attribute value, `None` when absent.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.activate_scope().await?;
        self.session.driver().attribute(&self.handle, name).await
    }

    /// Checks whether an attribute is present.
    pub async fn has_attribute(&self, name: &str) -> Result<bool> {
        Ok(self.attribute(name).await?.is_some())
    }

    /// Checks visibility.
    pub async fn is_displayed(&self) -> Result<bool> {
        self.activate_scope().await?;
        self.session.driver().is_displayed(&self.handle).await
    }

    /// Returns the lowercase tag name.
    pub async fn tag_name(&self) -> Result<String> {
        self.activate_scope().await?;
        let tag = self.session.driver().tag_name(&self.handle).await?;
        Ok(tag.to_ascii_lowercase())
    }

    /// Requires the tag name to be one of `expected` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedTag`] otherwise.
    pub async fn check_tag_name(&self, expected: &[&str]) -> Result<()> {
        let actual = self.tag_name().await?;
        if expected.iter().any(|tag| tag.eq_ignore_ascii_case(&actual)) {
            Ok(())
        } else {
            Err(Error::unexpected_tag(self.full_selector(), expected, actual))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
