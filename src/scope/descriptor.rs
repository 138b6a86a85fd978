//! Scope descriptors: identity and location of one browsing context.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::driver::By;
use crate::identifiers::{ScopeId, WindowHandle};

// ============================================================================
// ScopeDescriptor
// ============================================================================

/// Identity and location of a browsing context.
///
/// A root descriptor stands for the top-level document. A frame descriptor
/// always has a parent and a frame locator, resolved inside the parent's
/// document. Descriptors are shared through `Arc`; a child keeps its whole
/// ancestry alive.
///
/// The window handle is write-once: a scope created without one is pinned to
/// the window it is first activated in, and keeps that window afterwards.
pub struct ScopeDescriptor {
    id: ScopeId,
    parent: Option<Arc<ScopeDescriptor>>,
    frame: Option<By>,
    window_handle: OnceLock<WindowHandle>,
}

impl ScopeDescriptor {
    /// Creates a top-level scope.
    ///
    /// With `window_handle` set, activation first brings that window to focus.
    /// Without, the scope adopts the window focused at its first activation.
    #[must_use]
    pub fn root(window_handle: Option<WindowHandle>) -> Arc<Self> {
        Arc::new(Self {
            id: ScopeId::generate(),
            parent: None,
            frame: None,
            window_handle: pinned(window_handle),
        })
    }

    /// Creates a frame scope nested in `parent`.
    ///
    /// `frame` should carry a pinned select method (see [`By::resolved`]),
    /// since it is replayed on every later activation.
    #[must_use]
    pub fn nested(
        parent: &Arc<ScopeDescriptor>,
        frame: By,
        window_handle: Option<WindowHandle>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: ScopeId::generate(),
            parent: Some(Arc::clone(parent)),
            frame: Some(frame),
            window_handle: pinned(window_handle),
        })
    }

    /// Records `window` unless a handle is already set.
    ///
    /// Returns `true` when this call set it.
    pub(crate) fn pin_window(&self, window: WindowHandle) -> bool {
        self.window_handle.set(window).is_ok()
    }
}

fn pinned(window_handle: Option<WindowHandle>) -> OnceLock<WindowHandle> {
    let cell = OnceLock::new();
    if let Some(handle) = window_handle {
        let _ = cell.set(handle);
    }
    cell
}

// ============================================================================
// ScopeDescriptor - Accessors
// ============================================================================

impl ScopeDescriptor {
    /// Returns the scope ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    /// Returns the parent scope, `None` for the top-level document.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<&Arc<ScopeDescriptor>> {
        self.parent.as_ref()
    }

    /// Returns the frame locator, `None` for the top-level document.
    #[inline]
    #[must_use]
    pub fn frame(&self) -> Option<&By> {
        self.frame.as_ref()
    }

    /// Returns the frame selector string, if this is a frame scope.
    #[inline]
    #[must_use]
    pub fn frame_selector(&self) -> Option<&str> {
        self.frame.as_ref().map(By::selector)
    }

    /// Returns the window handle recorded for this scope.
    #[inline]
    #[must_use]
    pub fn window_handle(&self) -> Option<&WindowHandle> {
        self.window_handle.get()
    }

    /// Returns `true` for the top-level document scope.
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of frames between this scope and the top-level document.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// Iterates from this scope up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &ScopeDescriptor> {
        std::iter::successors(Some(self), |scope| scope.parent.as_deref())
    }

    /// Returns the chain from the root down to this scope.
    #[must_use]
    pub fn chain(&self) -> Vec<&ScopeDescriptor> {
        let mut chain: Vec<_> = self.ancestors().collect();
        chain.reverse();
        chain
    }

    /// Window this scope lives in: its own handle or the nearest ancestor's.
    #[must_use]
    pub fn effective_window(&self) -> Option<&WindowHandle> {
        self.ancestors().find_map(ScopeDescriptor::window_handle)
    }
}

// ============================================================================
// ScopeDescriptor - Display
// ============================================================================

impl fmt::Display for ScopeDescriptor {
    /// Formats the frame path, e.g. `top > #outer > #inner`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("top")?;
        for scope in self.chain() {
            if let Some(frame) = &scope.frame {
                write!(f, " > {frame}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for ScopeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeDescriptor")
            .field("id", &self.id)
            .field("path", &self.to_string())
            .field("window_handle", &self.window_handle.get())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_scope() {
        let root = ScopeDescriptor::root(None);
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert!(root.frame_selector().is_none());
        assert_eq!(root.to_string(), "top");
    }

    #[test]
    fn test_frame_scope_has_parent() {
        let root = ScopeDescriptor::root(None);
        let frame = ScopeDescriptor::nested(&root, By::css("#outer"), None);
        let inner = ScopeDescriptor::nested(&frame, By::css("#inner"), None);

        assert!(!inner.is_root());
        assert_eq!(inner.depth(), 2);
        assert_eq!(inner.parent().map(|p| p.id()), Some(frame.id()));
        assert_eq!(inner.to_string(), "top > #outer > #inner");
    }

    #[test]
    fn test_chain_is_root_first() {
        let root = ScopeDescriptor::root(None);
        let outer = ScopeDescriptor::nested(&root, By::css("#outer"), None);
        let inner = ScopeDescriptor::nested(&outer, By::css("#inner"), None);

        let ids: Vec<_> = inner.chain().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec![root.id(), outer.id(), inner.id()]);
    }

    #[test]
    fn test_effective_window_falls_back_to_ancestors() {
        let root = ScopeDescriptor::root(Some(WindowHandle::new("w-1")));
        let frame = ScopeDescriptor::nested(&root, By::css("#f"), None);
        assert_eq!(frame.effective_window(), Some(&WindowHandle::new("w-1")));

        let pinned = ScopeDescriptor::nested(&root, By::css("#g"), Some(WindowHandle::new("w-2")));
        assert_eq!(pinned.effective_window(), Some(&WindowHandle::new("w-2")));
    }

    #[test]
    fn test_pin_window_is_write_once() {
        let root = ScopeDescriptor::root(None);
        let frame = ScopeDescriptor::nested(&root, By::css("#f"), None);
        assert!(frame.effective_window().is_none());

        assert!(root.pin_window(WindowHandle::new("w-1")));
        assert!(!root.pin_window(WindowHandle::new("w-2")));
        assert_eq!(frame.effective_window(), Some(&WindowHandle::new("w-1")));
    }
}
