//! The query capability shared by pages, elements and collections.
//!
//! [`Reference`] is implemented by exactly three types:
//!
//! | Type | Searches under | Scope |
//! |------|----------------|-------|
//! | [`Page`] | the whole document | its own (top-level or frame) |
//! | [`Element`] | the element's descendants | inherited |
//! | [`ElementCollection`] | each element's descendants, in order | inherited |
//!
//! The trait is sealed; the set is closed and every query is routed through
//! the session's reference arena, which dispatches on the node kind.

use std::sync::Arc;

use async_trait::async_trait;

use crate::driver::By;
use crate::error::Result;
use crate::identifiers::ReferenceId;
use crate::scope::ScopeDescriptor;
use crate::session::Session;

use super::{Element, ElementCollection, Page};

// ============================================================================
// Sealing
// ============================================================================

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Page {}
    impl Sealed for super::Element {}
    impl Sealed for super::ElementCollection {}
}

// ============================================================================
// Reference
// ============================================================================

/// Something that can be queried for descendant elements.
///
/// Every query first activates the reference's scope, so callers never switch
/// frames by hand. Results remember where they were found: their
/// [`full_selector`](Self::full_selector) includes every selector used on the
/// way down.
///
/// # Example
///
/// ```ignore
/// let menu = page.find_single("nav ul").await?;
/// let links = menu.find_elements("a").await?;
/// assert_eq!(links.full_selector(), "nav ul a");
///
/// let last = page.find_last(By::xpath("//tr")).await?;
/// ```
#[async_trait]
pub trait Reference: sealed::Sealed + Send + Sync {
    /// Session this reference belongs to.
    fn session(&self) -> &Session;

    /// Arena node of this reference.
    fn reference_id(&self) -> ReferenceId;

    /// Scope the referenced elements live in.
    fn scope(&self) -> &Arc<ScopeDescriptor>;

    /// Root-first, space-joined selectors that led to this reference.
    fn full_selector(&self) -> String {
        self.session().full_selector(self.reference_id())
    }

    /// Focuses the driver on this reference's scope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeActivation`](crate::Error::ScopeActivation) if a
    /// window or frame switch fails.
    async fn activate_scope(&self) -> Result<()> {
        self.session().activate(self.scope()).await
    }

    /// Finds all matching descendants.
    ///
    /// An empty result is not an error.
    async fn find_elements<B>(&self, by: B) -> Result<ElementCollection>
    where
        B: Into<By> + Send,
    {
        let by = by.into();
        self.session().find(self.reference_id(), &by).await
    }

    /// Finds the first match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`](crate::Error::ElementNotFound) when
    /// nothing matches.
    async fn find_first<B>(&self, by: B) -> Result<Element>
    where
        B: Into<By> + Send,
    {
        self.find_elements(by).await?.first()
    }

    /// Finds the first match, `None` when nothing matches.
    async fn find_first_or_default<B>(&self, by: B) -> Result<Option<Element>>
    where
        B: Into<By> + Send,
    {
        Ok(self.find_elements(by).await?.first_or_default())
    }

    /// Finds the only match.
    ///
    /// # Errors
    ///
    /// Fails when zero or more than one element matches.
    async fn find_single<B>(&self, by: B) -> Result<Element>
    where
        B: Into<By> + Send,
    {
        self.find_elements(by).await?.single()
    }

    /// Finds the only match, `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Fails when more than one element matches.
    async fn find_single_or_default<B>(&self, by: B) -> Result<Option<Element>>
    where
        B: Into<By> + Send,
    {
        self.find_elements(by).await?.single_or_default()
    }

    /// Finds the match at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) with
    /// the actual count when `index` is past the end.
    async fn find_element_at<B>(&self, by: B, index: usize) -> Result<Element>
    where
        B: Into<By> + Send,
    {
        self.find_elements(by).await?.element_at(index)
    }

    /// Finds the last match.
    async fn find_last<B>(&self, by: B) -> Result<Element>
    where
        B: Into<By> + Send,
    {
        self.find_elements(by).await?.last()
    }

    /// Finds the last match, `None` when nothing matches.
    async fn find_last_or_default<B>(&self, by: B) -> Result<Option<Element>>
    where
        B: Into<By> + Send,
    {
        Ok(self.find_elements(by).await?.last_or_default())
    }

    /// Finds all matches and requires exactly `expected` of them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CountMismatch`](crate::Error::CountMismatch).
    async fn expect_count<B>(&self, by: B, expected: usize) -> Result<ElementCollection>
    where
        B: Into<By> + Send,
    {
        let found = self.find_elements(by).await?;
        found.ensure_count(expected)?;
        Ok(found)
    }
}

// ============================================================================
// Implementations
// ============================================================================

impl Reference for Page {
    fn session(&self) -> &Session {
        &self.session
    }

    fn reference_id(&self) -> ReferenceId {
        self.node.id()
    }

    fn scope(&self) -> &Arc<ScopeDescriptor> {
        &self.scope
    }
}

impl Reference for Element {
    fn session(&self) -> &Session {
        &self.session
    }

    fn reference_id(&self) -> ReferenceId {
        self.node.id()
    }

    fn scope(&self) -> &Arc<ScopeDescriptor> {
        &self.scope
    }
}

impl Reference for ElementCollection {
    fn session(&self) -> &Session {
        &self.session
    }

    fn reference_id(&self) -> ReferenceId {
        self.node.id()
    }

    fn scope(&self) -> &Arc<ScopeDescriptor> {
        &self.scope
    }
}

// ============================================================================
// Tests
// ============================================================================
