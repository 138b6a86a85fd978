//! Selector-based shortcuts for common element actions.

use tracing::debug;

use crate::browser::Reference;
use crate::driver::By;
use crate::error::Result;

use super::Page;

// ============================================================================
// Page - Actions
// ============================================================================

impl Page {
    /// Clicks the first element matching `by`, then pauses for the action wait.
    pub async fn click(&self, by: impl Into<By> + Send) -> Result<()> {
        let element = self.find_first(by).await?;
        element.click().await?;
        self.session.action_pause().await;
        Ok(())
    }

    /// Submits the form of the first element matching `by`.
    pub async fn submit(&self, by: impl Into<By> + Send) -> Result<()> {
        let element = self.find_first(by).await?;
        element.submit().await?;
        self.session.action_pause().await;
        Ok(())
    }

    /// Types `text` into every element matching `by`.
    ///
    /// Pauses for the action wait after each element.
    pub async fn send_keys(&self, by: impl Into<By> + Send, text: &str) -> Result<()> {
        let elements = self.find_elements(by).await?;
        debug!(selector = %elements.full_selector(), count = elements.len(), "Sending keys to all matches");
        for element in &elements {
            element.send_keys(text).await?;
            self.session.action_pause().await;
        }
        Ok(())
    }

    /// Clears every element matching `by`.
    pub async fn clear(&self, by: impl Into<By> + Send) -> Result<()> {
        let elements = self.find_elements(by).await?;
        for element in &elements {
            element.clear().await?;
            self.session.action_pause().await;
        }
        Ok(())
    }

    /// Returns `true` when every element matching `by` is displayed.
    ///
    /// Vacuously `true` when nothing matches.
    pub async fn is_displayed(&self, by: impl Into<By> + Send) -> Result<bool> {
        let elements = self.find_elements(by).await?;
        for element in &elements {
            if !element.is_displayed().await? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::driver::fake::{DriverCall, fake_session};
    use crate::error::Error;
    use crate::session::SessionOptions;

    fn options() -> SessionOptions {
        SessionOptions::default().with_action_wait(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_click_uses_first_match() {
        let (driver, session) = fake_session(options());
        let top = driver.top_document();
        let first = driver.add_element(top, None, "button", &["button"]);
        let second = driver.add_element(top, None, "button", &["button"]);

        session.page().click("button").await.unwrap();

        let calls = driver.calls();
        assert!(calls.contains(&DriverCall::Click(first)));
        assert!(!calls.contains(&DriverCall::Click(second)));
    }

    #[tokio::test]
    async fn test_click_without_match_fails() {
        let (_driver, session) = fake_session(options());
        let err = session.page().click("#missing").await.unwrap_err();
        assert!(matches!(err, Error::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn test_send_keys_and_clear_apply_to_all() {
        let (driver, session) = fake_session(options());
        let top = driver.top_document();
        let a = driver.add_element(top, None, "input", &["input"]);
        let b = driver.add_element(top, None, "input", &["input"]);
        let page = session.page();

        page.send_keys("input", "x").await.unwrap();
        page.clear("input").await.unwrap();
        page.submit("input").await.unwrap();

        let calls = driver.calls();
        for handle in [&a, &b] {
            assert!(calls.contains(&DriverCall::SendKeys(handle.clone(), "x".to_string())));
            assert!(calls.contains(&DriverCall::Clear(handle.clone())));
        }
        assert!(calls.contains(&DriverCall::Submit(a)));
        assert!(!calls.contains(&DriverCall::Submit(b)));
    }

    #[tokio::test]
    async fn test_is_displayed_requires_all() {
        let (driver, session) = fake_session(options());
        let top = driver.top_document();
        driver.add_element(top, None, "div", &[".row"]);
        let hidden = driver.add_element(top, None, "div", &[".row"]);
        let page = session.page();

        assert!(page.is_displayed(".row").await.unwrap());
        driver.set_displayed(&hidden, false);
        assert!(!page.is_displayed(".row").await.unwrap());
        assert!(page.is_displayed(".none").await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_wait_is_applied() {
        let options = SessionOptions::default().with_action_wait(Duration::from_millis(250));
        let (driver, session) = fake_session(options);
        let top = driver.top_document();
        driver.add_element(top, None, "input", &["input"]);
        driver.add_element(top, None, "input", &["input"]);

        let start = tokio::time::Instant::now();
        session.page().send_keys("input", "a").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
