//! Alert handling.
//!
//! Alerts belong to the window, not to a frame, so none of these methods
//! activate the page's scope.

use tracing::debug;

use crate::error::{Error, Result};

use super::Page;

// ============================================================================
// Page - Alerts
// ============================================================================

impl Page {
    /// Returns `true` when an alert is showing.
    pub async fn has_alert(&self) -> Result<bool> {
        Ok(self.session.driver().alert_text().await?.is_some())
    }

    /// Returns the text of the showing alert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlertNotVisible`] when there is none.
    pub async fn alert_text(&self) -> Result<String> {
        self.session
            .driver()
            .alert_text()
            .await?
            .ok_or(Error::AlertNotVisible)
    }

    /// Accepts the showing alert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlertNotVisible`] when there is none.
    pub async fn confirm_alert(&self) -> Result<()> {
        let text = self.alert_text().await?;
        debug!(text = %text, "Accepting alert");
        self.session.driver().accept_alert().await?;
        self.session.action_pause().await;
        Ok(())
    }

    /// Dismisses the showing alert.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlertNotVisible`] when there is none.
    pub async fn dismiss_alert(&self) -> Result<()> {
        let text = self.alert_text().await?;
        debug!(text = %text, "Dismissing alert");
        self.session.driver().dismiss_alert().await?;
        self.session.action_pause().await;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
