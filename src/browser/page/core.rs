//! Core Page struct and accessors.

use std::fmt;
use std::sync::Arc;

use crate::browser::arena::NodeGuard;
use crate::driver::BrowserDriver;
use crate::scope::ScopeDescriptor;
use crate::session::Session;

// ============================================================================
// Page
// ============================================================================

/// A handle to one document: a window's top-level page or a frame.
///
/// Pages are cheap to clone. A frame page stays valid across frame switches;
/// using it simply reactivates its frame chain.
#[derive(Clone)]
pub struct Page {
    pub(crate) session: Session,
    pub(crate) node: Arc<NodeGuard>,
    pub(crate) scope: Arc<ScopeDescriptor>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.node.id())
            .field("scope", &self.scope.to_string())
            .field("window", &self.scope.effective_window())
            .finish_non_exhaustive()
    }
}

impl Page {
    pub(crate) fn new(session: Session, node: Arc<NodeGuard>, scope: Arc<ScopeDescriptor>) -> Self {
        Self {
            session,
            node,
            scope,
        }
    }
}

// ============================================================================
// Page - Accessors
// ============================================================================

impl Page {
    /// Checks if this page is a frame rather than a top-level document.
    #[inline]
    #[must_use]
    pub fn is_frame(&self) -> bool {
        !self.scope.is_root()
    }

    /// Number of frames between this page and the top-level document.
    #[inline]
    #[must_use]
    pub fn frame_depth(&self) -> usize {
        self.scope.depth()
    }

    /// Returns the underlying driver for direct use.
    ///
    /// The active scope is invalidated, so the next query on any page performs
    /// a full window and frame switch.
    #[must_use]
    pub fn raw_driver(&self) -> Arc<dyn BrowserDriver> {
        self.session.raw_driver()
    }
}

// ============================================================================
// Tests
// ============================================================================
