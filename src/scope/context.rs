//! Scope activation state machine.
//!
//! [`ScopeContext`] owns the Active Scope Marker of one test run: the ID of
//! the scope the driver is currently focused on. Activation consults the
//! marker so repeated activations of the same scope cost nothing, and only
//! replays the frame switches that are actually needed when focus moves.
//!
//! # Algorithm
//!
//! `activate(target)`:
//!
//! 1. Marker equals `target` → return, no driver call.
//! 2. Marker equals an ancestor of `target` → switch into the frames below
//!    that ancestor, outermost first.
//! 3. Otherwise → focus the target's window (if recorded and different),
//!    reset to the top-level document, then switch into every frame of the
//!    chain, outermost first. A chain with no recorded window is pinned to
//!    the window focused now.
//! 4. Marker := `target`.
//!
//! The marker is cleared before the first switch, so a failure in the middle
//! leaves it empty and the next activation replays the full chain.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::driver::{BrowserDriver, FrameTarget};
use crate::error::{Error, Result};
use crate::identifiers::ScopeId;

use super::ScopeDescriptor;

// ============================================================================
// ScopeContext
// ============================================================================

/// Per-run activation state: the driver plus the Active Scope Marker.
///
/// Exactly one context exists per test run. It is not meant to be driven
/// from several tasks at once; interleaved activations would race on the
/// driver's focus regardless of the marker.
pub struct ScopeContext {
    driver: Arc<dyn BrowserDriver>,
    marker: Mutex<Option<ScopeId>>,
}

impl fmt::Debug for ScopeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeContext")
            .field("active", &self.active())
            .finish_non_exhaustive()
    }
}

impl ScopeContext {
    /// Creates a context with no active scope.
    pub fn new(driver: Arc<dyn BrowserDriver>) -> Self {
        Self {
            driver,
            marker: Mutex::new(None),
        }
    }
}

// ============================================================================
// ScopeContext - Marker
// ============================================================================

impl ScopeContext {
    /// Returns the currently active scope, if known.
    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<ScopeId> {
        *self.marker.lock()
    }

    /// Clears the marker so the next activation performs a full switch.
    #[inline]
    pub fn invalidate(&self) {
        *self.marker.lock() = None;
    }

    /// Records `id` as active without touching the driver.
    ///
    /// Only for callers that just moved the driver's focus themselves.
    #[inline]
    pub(crate) fn mark_active(&self, id: ScopeId) {
        *self.marker.lock() = Some(id);
    }

    /// Returns the driver after invalidating the marker.
    ///
    /// Commands sent through the returned driver bypass scope tracking, so
    /// whatever focus they leave behind is never trusted afterwards.
    #[must_use]
    pub fn raw_driver(&self) -> Arc<dyn BrowserDriver> {
        debug!("Handing out raw driver, scope marker invalidated");
        self.invalidate();
        Arc::clone(&self.driver)
    }

    /// Returns the driver without touching the marker.
    #[inline]
    pub(crate) fn driver(&self) -> &Arc<dyn BrowserDriver> {
        &self.driver
    }
}

// ============================================================================
// ScopeContext - Activation
// ============================================================================

impl ScopeContext {
    /// Focuses the driver on `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ScopeActivation`] when a window or frame switch fails.
    /// The marker is left cleared in that case.
    pub async fn activate(&self, scope: &ScopeDescriptor) -> Result<()> {
        let active = self.active();
        if active == Some(scope.id()) {
            trace!(scope = %scope, "Scope already active");
            return Ok(());
        }

        let chain = scope.chain();
        let resume_at = active.and_then(|id| chain.iter().position(|s| s.id() == id));

        debug!(scope = %scope, from_ancestor = resume_at.is_some(), "Activating scope");
        self.invalidate();

        let start = match resume_at {
            Some(position) => position + 1,
            None => {
                self.enter_top_level(scope).await?;
                0
            }
        };

        for step in &chain[start..] {
            if let Some(frame) = step.frame() {
                trace!(frame = %frame, "Switching into frame");
                self.driver
                    .switch_to_frame(&FrameTarget::Locator(frame.clone()))
                    .await
                    .map_err(|e| Error::scope_activation(step.to_string(), e))?;
            }
        }

        self.mark_active(scope.id());
        Ok(())
    }

    /// Focuses the scope's window and resets to its top-level document.
    async fn enter_top_level(&self, scope: &ScopeDescriptor) -> Result<()> {
        let wrap = |e| Error::scope_activation(scope.to_string(), e);

        let current = self.driver.current_window_handle().await.map_err(wrap)?;
        match scope.effective_window() {
            Some(window) if *window != current => {
                debug!(from = %current, to = %window, "Switching window");
                self.driver.switch_to_window(window).await.map_err(wrap)?;
            }
            Some(_) => {}
            None => {
                if let Some(root) = scope.ancestors().last() {
                    trace!(window = %current, scope = %root, "Pinning scope to window");
                    root.pin_window(current);
                }
            }
        }

        self.driver.switch_to_default_content().await.map_err(wrap)
    }
}

// ============================================================================
// Tests
// ============================================================================
