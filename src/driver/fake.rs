//! In-memory recording driver for tests.
//!
//! Models windows, documents, nested frames and elements. Every call is
//! appended to a log so tests can assert how many window/frame switches an
//! operation cost and in which order they happened. Element handles are only
//! usable while their document is focused, like a real browser.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::identifiers::{ElementHandle, WindowHandle};
use crate::session::{Session, SessionOptions};

use super::{BrowserDriver, FrameTarget, SelectMethod};

// ============================================================================
// Types
// ============================================================================

/// One logged driver call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DriverCall {
    FindElements {
        context: Option<ElementHandle>,
        method: SelectMethod,
        selector: String,
    },
    SwitchToWindow(WindowHandle),
    SwitchToFrame(String),
    SwitchToDefaultContent,
    CurrentWindowHandle,
    WindowHandles,
    Navigate(String),
    Back,
    Forward,
    Refresh,
    Click(ElementHandle),
    Submit(ElementHandle),
    SendKeys(ElementHandle, String),
    Clear(ElementHandle),
    AcceptAlert,
    DismissAlert,
    ExecuteScript(String),
}

impl DriverCall {
    /// Returns `true` for calls that move driver focus.
    pub(crate) fn is_switch(&self) -> bool {
        matches!(
            self,
            Self::SwitchToWindow(_) | Self::SwitchToFrame(_) | Self::SwitchToDefaultContent
        )
    }
}

/// Identity of a fake document (top-level page or frame content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct DocId(usize);

/// Failure injected into the next element-level call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    Stale,
    NotInteractable,
}

struct FakeElement {
    handle: ElementHandle,
    document: DocId,
    parent: Option<usize>,
    tag: String,
    selectors: Vec<String>,
    text: String,
    attributes: HashMap<String, String>,
    displayed: bool,
    content: Option<DocId>,
    detached: bool,
    failures: VecDeque<Failure>,
}

struct FakeWindow {
    handle: WindowHandle,
    top: DocId,
}

struct FakeState {
    windows: Vec<FakeWindow>,
    elements: Vec<FakeElement>,
    documents: usize,
    focused_window: usize,
    focused_doc: DocId,
    url: String,
    url_failure: Option<String>,
    title: String,
    alert: Option<String>,
    script_result: Value,
    calls: Vec<DriverCall>,
}

// ============================================================================
// FakeDriver
// ============================================================================

/// Recording in-memory [`BrowserDriver`].
pub(crate) struct FakeDriver {
    state: Mutex<FakeState>,
}

impl FakeDriver {
    /// Creates a driver with one window showing an empty top-level document.
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                windows: vec![FakeWindow {
                    handle: WindowHandle::new("w-0"),
                    top: DocId(0),
                }],
                elements: Vec::new(),
                documents: 1,
                focused_window: 0,
                focused_doc: DocId(0),
                url: "about:blank".to_string(),
                url_failure: None,
                title: String::new(),
                alert: None,
                script_result: Value::Null,
                calls: Vec::new(),
            }),
        }
    }

    /// Top-level document of the first window.
    pub(crate) fn top_document(&self) -> DocId {
        self.state.lock().windows[0].top
    }

    /// Currently focused document.
    pub(crate) fn focused_document(&self) -> DocId {
        self.state.lock().focused_doc
    }

    /// Opens another window and returns its handle and top document.
    pub(crate) fn add_window(&self) -> (WindowHandle, DocId) {
        let mut state = self.state.lock();
        let top = DocId(state.documents);
        state.documents += 1;
        let handle = WindowHandle::new(format!("w-{}", state.windows.len()));
        state.windows.push(FakeWindow {
            handle: handle.clone(),
            top,
        });
        (handle, top)
    }

    /// Adds an element matching the given selectors.
    pub(crate) fn add_element(
        &self,
        document: DocId,
        parent: Option<&ElementHandle>,
        tag: &str,
        selectors: &[&str],
    ) -> ElementHandle {
        self.insert(document, parent, tag, selectors, None)
    }

    /// Adds an `iframe` element with its own content document.
    pub(crate) fn add_frame(
        &self,
        document: DocId,
        parent: Option<&ElementHandle>,
        selectors: &[&str],
    ) -> (ElementHandle, DocId) {
        let content = {
            let mut state = self.state.lock();
            let doc = DocId(state.documents);
            state.documents += 1;
            doc
        };
        let handle = self.insert(document, parent, "iframe", selectors, Some(content));
        (handle, content)
    }

    fn insert(
        &self,
        document: DocId,
        parent: Option<&ElementHandle>,
        tag: &str,
        selectors: &[&str],
        content: Option<DocId>,
    ) -> ElementHandle {
        let mut state = self.state.lock();
        let parent = parent.and_then(|p| state.index_of(p));
        let handle = ElementHandle::new(format!("e-{}", state.elements.len()));
        state.elements.push(FakeElement {
            handle: handle.clone(),
            document,
            parent,
            tag: tag.to_string(),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            text: String::new(),
            attributes: HashMap::new(),
            displayed: true,
            content,
            detached: false,
            failures: VecDeque::new(),
        });
        handle
    }

    pub(crate) fn set_text(&self, handle: &ElementHandle, text: &str) {
        self.with_element(handle, |el| el.text = text.to_string());
    }

    pub(crate) fn set_attribute(&self, handle: &ElementHandle, name: &str, value: &str) {
        self.with_element(handle, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        });
    }

    pub(crate) fn set_displayed(&self, handle: &ElementHandle, displayed: bool) {
        self.with_element(handle, |el| el.displayed = displayed);
    }

    /// Removes an element from its document.
    pub(crate) fn detach(&self, handle: &ElementHandle) {
        self.with_element(handle, |el| el.detached = true);
    }

    /// Makes the next `times` element-level calls on `handle` fail.
    pub(crate) fn fail_next(&self, handle: &ElementHandle, failure: Failure, times: usize) {
        self.with_element(handle, |el| {
            el.failures.extend(std::iter::repeat_n(failure, times));
        });
    }

    pub(crate) fn set_url(&self, url: &str) {
        self.state.lock().url = url.to_string();
    }

    /// Makes every later `current_url` call fail with `message`.
    pub(crate) fn fail_current_url(&self, message: &str) {
        self.state.lock().url_failure = Some(message.to_string());
    }

    pub(crate) fn set_title(&self, title: &str) {
        self.state.lock().title = title.to_string();
    }

    pub(crate) fn set_alert(&self, text: Option<&str>) {
        self.state.lock().alert = text.map(str::to_string);
    }

    pub(crate) fn set_script_result(&self, value: Value) {
        self.state.lock().script_result = value;
    }

    /// Returns the call log.
    pub(crate) fn calls(&self) -> Vec<DriverCall> {
        self.state.lock().calls.clone()
    }

    /// Returns only the focus-moving calls.
    pub(crate) fn switch_calls(&self) -> Vec<DriverCall> {
        self.calls().into_iter().filter(DriverCall::is_switch).collect()
    }

    pub(crate) fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn with_element(&self, handle: &ElementHandle, f: impl FnOnce(&mut FakeElement)) {
        let mut state = self.state.lock();
        if let Some(index) = state.index_of(handle) {
            f(&mut state.elements[index]);
        }
    }
}

// ============================================================================
// FakeState - Internal
// ============================================================================

impl FakeState {
    fn index_of(&self, handle: &ElementHandle) -> Option<usize> {
        self.elements.iter().position(|el| &el.handle == handle)
    }

    fn is_descendant(&self, mut index: usize, ancestor: usize) -> bool {
        while let Some(parent) = self.elements[index].parent {
            if parent == ancestor {
                return true;
            }
            index = parent;
        }
        false
    }

    /// Resolves a handle that must live in the focused document.
    fn live(&mut self, handle: &ElementHandle) -> Result<usize> {
        let focused = self.focused_doc;
        let index = self
            .index_of(handle)
            .ok_or_else(|| Error::stale_element(handle.clone()))?;
        let element = &mut self.elements[index];
        if element.detached || element.document != focused {
            return Err(Error::stale_element(handle.clone()));
        }
        match element.failures.pop_front() {
            Some(Failure::Stale) => Err(Error::stale_element(handle.clone())),
            Some(Failure::NotInteractable) => {
                Err(Error::not_interactable(handle.clone(), "element is obscured"))
            }
            None => Ok(index),
        }
    }

    fn focus_top(&mut self) {
        self.focused_doc = self.windows[self.focused_window].top;
    }
}

// ============================================================================
// BrowserDriver Implementation
// ============================================================================

#[async_trait]
impl BrowserDriver for FakeDriver {
    async fn find_elements(
        &self,
        context: Option<&ElementHandle>,
        method: SelectMethod,
        selector: &str,
    ) -> Result<Vec<ElementHandle>> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::FindElements {
            context: context.cloned(),
            method,
            selector: selector.to_string(),
        });

        let context = match context {
            Some(handle) => Some(state.live(handle)?),
            None => None,
        };
        let focused = state.focused_doc;

        let found = state
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.document == focused && !el.detached)
            .filter(|(_, el)| el.selectors.iter().any(|s| s == selector))
            .filter(|(index, _)| context.is_none_or(|ctx| state.is_descendant(*index, ctx)))
            .map(|(_, el)| el.handle.clone())
            .collect();
        Ok(found)
    }

    async fn switch_to_window(&self, handle: &WindowHandle) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::SwitchToWindow(handle.clone()));
        let index = state
            .windows
            .iter()
            .position(|w| &w.handle == handle)
            .ok_or_else(|| Error::no_such_window(handle.clone()))?;
        state.focused_window = index;
        state.focus_top();
        Ok(())
    }

    async fn switch_to_frame(&self, target: &FrameTarget) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::SwitchToFrame(target.to_string()));
        let focused = state.focused_doc;

        let content = match target {
            FrameTarget::Locator(by) => state
                .elements
                .iter()
                .filter(|el| el.document == focused && !el.detached)
                .find(|el| el.selectors.iter().any(|s| s == by.selector()))
                .and_then(|el| el.content),
            FrameTarget::Element(handle) => {
                let index = state.live(handle)?;
                state.elements[index].content
            }
        };

        let content = content.ok_or_else(|| Error::no_such_frame(target.to_string()))?;
        state.focused_doc = content;
        Ok(())
    }

    async fn switch_to_default_content(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::SwitchToDefaultContent);
        state.focus_top();
        Ok(())
    }

    async fn current_window_handle(&self) -> Result<WindowHandle> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::CurrentWindowHandle);
        Ok(state.windows[state.focused_window].handle.clone())
    }

    async fn window_handles(&self) -> Result<Vec<WindowHandle>> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::WindowHandles);
        Ok(state.windows.iter().map(|w| w.handle.clone()).collect())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Navigate(url.to_string()));
        state.url = url.to_string();
        state.focus_top();
        Ok(())
    }

    async fn back(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Back);
        state.focus_top();
        Ok(())
    }

    async fn forward(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Forward);
        state.focus_top();
        Ok(())
    }

    async fn refresh(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Refresh);
        state.focus_top();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        let state = self.state.lock();
        match &state.url_failure {
            Some(message) => Err(Error::driver(message.clone())),
            None => Ok(state.url.clone()),
        }
    }

    async fn title(&self) -> Result<String> {
        Ok(self.state.lock().title.clone())
    }

    async fn alert_text(&self) -> Result<Option<String>> {
        Ok(self.state.lock().alert.clone())
    }

    async fn accept_alert(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::AcceptAlert);
        state
            .alert
            .take()
            .map(|_| ())
            .ok_or_else(|| Error::driver("no such alert"))
    }

    async fn dismiss_alert(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::DismissAlert);
        state
            .alert
            .take()
            .map(|_| ())
            .ok_or_else(|| Error::driver("no such alert"))
    }

    async fn click(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Click(element.clone()));
        state.live(element).map(|_| ())
    }

    async fn submit(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Submit(element.clone()));
        state.live(element).map(|_| ())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<()> {
        let mut state = self.state.lock();
        state
            .calls
            .push(DriverCall::SendKeys(element.clone(), text.to_string()));
        let index = state.live(element)?;
        let value = state.elements[index]
            .attributes
            .entry("value".to_string())
            .or_default();
        value.push_str(text);
        Ok(())
    }

    async fn clear(&self, element: &ElementHandle) -> Result<()> {
        let mut state = self.state.lock();
        state.calls.push(DriverCall::Clear(element.clone()));
        let index = state.live(element)?;
        state.elements[index].attributes.remove("value");
        Ok(())
    }

    async fn attribute(&self, element: &ElementHandle, name: &str) -> Result<Option<String>> {
        let mut state = self.state.lock();
        let index = state.live(element)?;
        Ok(state.elements[index].attributes.get(name).cloned())
    }

    async fn text(&self, element: &ElementHandle) -> Result<String> {
        let mut state = self.state.lock();
        let index = state.live(element)?;
        Ok(state.elements[index].text.clone())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool> {
        let mut state = self.state.lock();
        let index = state.live(element)?;
        Ok(state.elements[index].displayed)
    }

    async fn tag_name(&self, element: &ElementHandle) -> Result<String> {
        let mut state = self.state.lock();
        let index = state.live(element)?;
        Ok(state.elements[index].tag.clone())
    }

    async fn execute_script(&self, script: &str, _args: Vec<Value>) -> Result<Value> {
        let mut state = self.state.lock();
        state
            .calls
            .push(DriverCall::ExecuteScript(script.to_string()));
        Ok(state.script_result.clone())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Installs a test log subscriber once per process.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a fake driver and a session on top of it.
pub(crate) fn fake_session(options: SessionOptions) -> (Arc<FakeDriver>, Session) {
    init_tracing();
    let driver = Arc::new(FakeDriver::new());
    let session = Session::builder(driver.clone())
        .options(options)
        .build()
        .expect("valid test session options");
    (driver, session)
}
