//! Entering frames.

use tracing::debug;

use crate::browser::Reference;
use crate::driver::{By, FrameTarget};
use crate::error::{Error, Result};
use crate::scope::ScopeDescriptor;

use super::Page;

/// Tag names accepted by [`Page::enter_frame`].
const FRAME_TAGS: &[&str] = &["iframe", "frame"];

// ============================================================================
// Page - Frames
// ============================================================================

impl Page {
    /// Enters the frame matched by `by` and returns a page for its document.
    ///
    /// The first match is used; it must be an `iframe` or `frame` element.
    /// The new page's scope records this page as parent and the current
    /// window, so later queries on it switch back into the frame on their own.
    ///
    /// # Errors
    ///
    /// - [`Error::ElementNotFound`] if nothing matches
    /// - [`Error::UnexpectedTag`] if the match is not a frame
    /// - [`Error::ScopeActivation`] if the driver cannot switch into it
    ///
    /// # Example
    ///
    /// ```ignore
    /// let editor = page.enter_frame("#editor").await?;
    /// let toolbar = editor.enter_frame(By::name("toolbar")).await?;
    /// toolbar.click(".bold").await?;
    /// ```
    pub async fn enter_frame(&self, by: impl Into<By>) -> Result<Page> {
        let by = by.into().resolved(self.session.options().select_method);
        let frame = self.find_first(by.clone()).await?;
        frame.check_tag_name(FRAME_TAGS).await?;

        let driver = self.session.driver();
        let window = driver.current_window_handle().await?;
        let scope = ScopeDescriptor::nested(&self.scope, by, Some(window));

        debug!(scope = %scope, element = %frame.handle(), "Entering frame");

        let scopes = self.session.scopes();
        scopes.invalidate();
        driver
            .switch_to_frame(&FrameTarget::Element(frame.handle().clone()))
            .await
            .map_err(|e| Error::scope_activation(scope.to_string(), e))?;
        scopes.mark_active(scope.id());

        Ok(self.session.register_page(scope))
    }
}

// ============================================================================
// Tests
// ============================================================================
