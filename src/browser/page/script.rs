//! JavaScript execution and screenshots.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::browser::Reference;
use crate::error::Result;

use super::Page;

/// Removes focus from the active element, firing its `blur` handlers.
const BLUR_SCRIPT: &str =
    "if(document.activeElement && document.activeElement.blur) {document.activeElement.blur()}";

// ============================================================================
// Page - Script Execution
// ============================================================================

impl Page {
    /// Executes JavaScript in this page's document.
    ///
    /// The script should use `return` to return a value.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let title = page.execute_script("return document.title", vec![]).await?;
    /// ```
    pub async fn execute_script(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        self.activate_scope().await?;
        debug!(scope = %self.scope, script_len = script.len(), "Executing script");
        self.session.driver().execute_script(script, args).await
    }

    /// Executes JavaScript and deserializes its return value.
    pub async fn execute_script_as<T>(&self, script: &str, args: Vec<Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.execute_script(script, args).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Blurs the focused element so pending `change` and `blur` handlers run.
    pub async fn fire_js_blur(&self) -> Result<()> {
        self.execute_script(BLUR_SCRIPT, Vec::new()).await?;
        Ok(())
    }
}

// ============================================================================
// Page - Screenshots
// ============================================================================

impl Page {
    /// Captures a PNG screenshot of the window.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        let bytes = self.session.driver().screenshot().await?;
        debug!(size = bytes.len(), "Screenshot captured");
        Ok(bytes)
    }

    /// Captures a PNG screenshot as base64 text.
    pub async fn screenshot_base64(&self) -> Result<String> {
        Ok(Base64Standard.encode(self.screenshot().await?))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::driver::fake::{DriverCall, fake_session};
    use crate::error::Error;
    use crate::session::SessionOptions;

    use super::BLUR_SCRIPT;

    #[tokio::test]
    async fn test_execute_script_activates_frame() {
        let (driver, session) = fake_session(SessionOptions::default());
        let top = driver.top_document();
        let (_, doc) = driver.add_frame(top, None, &["#f"]);
        driver.set_script_result(json!(42));

        let page = session.page();
        let frame = page.enter_frame("#f").await.unwrap();
        page.execute_script("return 1", vec![]).await.unwrap();
        assert_eq!(driver.focused_document(), top);

        let value = frame.execute_script("return 42", vec![]).await.unwrap();
        assert_eq!(value, json!(42));
        assert_eq!(driver.focused_document(), doc);
    }

    #[tokio::test]
    async fn test_execute_script_as() {
        let (driver, session) = fake_session(SessionOptions::default());
        driver.set_script_result(json!(["a", "b"]));

        let items: Vec<String> = session
            .page()
            .execute_script_as("return items", vec![])
            .await
            .unwrap();
        assert_eq!(items, vec!["a", "b"]);

        let err = session
            .page()
            .execute_script_as::<u32>("return items", vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[tokio::test]
    async fn test_fire_js_blur() {
        let (driver, session) = fake_session(SessionOptions::default());
        session.page().fire_js_blur().await.unwrap();
        assert!(driver
            .calls()
            .contains(&DriverCall::ExecuteScript(BLUR_SCRIPT.to_string())));
    }

    #[tokio::test]
    async fn test_screenshot_unsupported_by_default() {
        let (_driver, session) = fake_session(SessionOptions::default());
        let err = session.page().screenshot_base64().await.unwrap_err();
        assert!(matches!(err, Error::Unsupported { .. }));
    }
}
