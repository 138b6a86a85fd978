//! Result of one query: an ordered, read-only list of elements.

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::scope::ScopeDescriptor;
use crate::session::Session;

use super::arena::NodeGuard;
use super::{Element, Reference};

// ============================================================================
// ElementCollection
// ============================================================================

/// Elements matched by one query, in match order.
///
/// Collections are never modified; a further query produces a new
/// collection whose parent is this one.
#[derive(Clone)]
pub struct ElementCollection {
    pub(crate) session: Session,
    pub(crate) node: Arc<NodeGuard>,
    pub(crate) elements: Vec<Element>,
    pub(crate) scope: Arc<ScopeDescriptor>,
}

impl fmt::Debug for ElementCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementCollection")
            .field("id", &self.node.id())
            .field("selector", &self.full_selector())
            .field("len", &self.elements.len())
            .finish_non_exhaustive()
    }
}

impl ElementCollection {
    pub(crate) fn new(
        session: Session,
        node: Arc<NodeGuard>,
        elements: Vec<Element>,
        scope: Arc<ScopeDescriptor>,
    ) -> Self {
        Self {
            session,
            node,
            elements,
            scope,
        }
    }
}

// ============================================================================
// ElementCollection - Accessors
// ============================================================================

impl ElementCollection {
    /// Number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when nothing matched.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// Element at `index`, `None` when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// First element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] when empty.
    pub fn first(&self) -> Result<Element> {
        self.first_or_default().ok_or_else(|| self.not_found())
    }

    /// First element, `None` when empty.
    #[must_use]
    pub fn first_or_default(&self) -> Option<Element> {
        self.elements.first().cloned()
    }

    /// The only element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] when empty and
    /// [`Error::MultipleElements`] when more than one matched.
    pub fn single(&self) -> Result<Element> {
        self.ensure_not_empty()?.ensure_at_most_one()?;
        self.first()
    }

    /// The only element, `None` when empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MultipleElements`] when more than one matched.
    pub fn single_or_default(&self) -> Result<Option<Element>> {
        self.ensure_at_most_one()?;
        Ok(self.first_or_default())
    }

    /// Element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfRange`] with the actual count when `index`
    /// is past the end.
    pub fn element_at(&self, index: usize) -> Result<Element> {
        self.elements
            .get(index)
            .cloned()
            .ok_or_else(|| Error::index_out_of_range(self.full_selector(), self.len(), index))
    }

    /// Last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] when empty.
    pub fn last(&self) -> Result<Element> {
        self.last_or_default().ok_or_else(|| self.not_found())
    }

    /// Last element, `None` when empty.
    #[must_use]
    pub fn last_or_default(&self) -> Option<Element> {
        self.elements.last().cloned()
    }
}

// ============================================================================
// ElementCollection - Guards
// ============================================================================

impl ElementCollection {
    /// Fails when the collection is empty.
    pub fn ensure_not_empty(&self) -> Result<&Self> {
        if self.is_empty() {
            return Err(self.not_found());
        }
        Ok(self)
    }

    /// Fails when the collection has more than one element.
    pub fn ensure_at_most_one(&self) -> Result<&Self> {
        if self.len() > 1 {
            return Err(Error::multiple_elements(
                self.full_selector(),
                self.scope.to_string(),
                self.len(),
            ));
        }
        Ok(self)
    }

    /// Fails unless the collection has exactly `expected` elements.
    pub fn ensure_count(&self, expected: usize) -> Result<&Self> {
        if self.len() != expected {
            return Err(Error::count_mismatch(
                self.full_selector(),
                expected,
                self.len(),
            ));
        }
        Ok(self)
    }

    fn not_found(&self) -> Error {
        Error::element_not_found(self.full_selector(), self.scope.to_string())
    }
}

impl<'a> IntoIterator for &'a ElementCollection {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================
