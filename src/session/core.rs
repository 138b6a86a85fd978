//! Session: per-run state shared by every page, element and collection.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::sleep;
use tracing::{debug, trace};

use crate::browser::arena::{NodeGuard, NodeKind, ReferenceArena, SharedArena};
use crate::browser::{Element, ElementCollection, Page};
use crate::driver::{BrowserDriver, By};
use crate::error::Result;
use crate::identifiers::{ElementHandle, ReferenceId, WindowHandle};
use crate::navigator::Navigator;
use crate::scope::{ScopeContext, ScopeDescriptor};

use super::builder::SessionBuilder;
use super::options::SessionOptions;

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a session.
pub(crate) struct SessionInner {
    /// Active Scope Marker and the driver.
    pub scopes: ScopeContext,

    /// Options fixed at build time.
    pub options: SessionOptions,

    /// URL resolution against the configured base.
    pub navigator: Navigator,

    /// Every live reference of this run.
    pub arena: SharedArena,

    /// Scope of the top-level document.
    pub root: Arc<ScopeDescriptor>,

    /// Arena node of the top-level page, alive as long as the session.
    pub root_node: Arc<NodeGuard>,
}

// ============================================================================
// Session
// ============================================================================

/// One test run against one driver.
///
/// Owns the Active Scope Marker and the reference arena. Clones share both,
/// so a session must stay within its own test run; two runs need two
/// sessions with two drivers.
///
/// # Example
///
/// ```ignore
/// let session = Session::builder(driver)
///     .base_url("https://localhost:5001")
///     .build()?;
///
/// let page = session.page();
/// page.navigate_to_url("/login").await?;
/// page.find_single("#user").await?.send_keys("admin").await?;
/// ```
#[derive(Clone)]
pub struct Session {
    pub(crate) inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.inner.navigator.base_url())
            .field("active_scope", &self.inner.scopes.active())
            .field("references", &self.reference_count())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a builder for a session over `driver`.
    #[inline]
    #[must_use]
    pub fn builder(driver: Arc<dyn BrowserDriver>) -> SessionBuilder {
        SessionBuilder::new(driver)
    }

    pub(crate) fn new(
        driver: Arc<dyn BrowserDriver>,
        options: SessionOptions,
        navigator: Navigator,
    ) -> Self {
        let root = ScopeDescriptor::root(None);
        let arena: SharedArena = Arc::new(Mutex::new(ReferenceArena::new()));
        let root_ref = arena.lock().insert_frame(Arc::clone(&root));
        let root_node = NodeGuard::attach(&arena, root_ref, None);

        debug!(base_url = ?navigator.base_url(), "Session created");

        Self {
            inner: Arc::new(SessionInner {
                scopes: ScopeContext::new(driver),
                options,
                navigator,
                arena,
                root,
                root_node,
            }),
        }
    }
}

// ============================================================================
// Session - Accessors
// ============================================================================

impl Session {
    /// Returns the top-level page of the focused window.
    #[must_use]
    pub fn page(&self) -> Page {
        Page::new(
            self.clone(),
            Arc::clone(&self.inner.root_node),
            Arc::clone(&self.inner.root),
        )
    }

    /// Returns the session options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.inner.options
    }

    /// Returns the URL resolver.
    #[inline]
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    /// Returns the scope activation state.
    #[inline]
    #[must_use]
    pub fn scopes(&self) -> &ScopeContext {
        &self.inner.scopes
    }

    /// Returns the underlying driver and invalidates the active scope.
    ///
    /// See [`ScopeContext::raw_driver`].
    #[must_use]
    pub fn raw_driver(&self) -> Arc<dyn BrowserDriver> {
        self.inner.scopes.raw_driver()
    }

    /// Number of live references, pages included.
    ///
    /// A reference is released once every clone of it and of everything
    /// found from it has been dropped.
    #[must_use]
    pub fn reference_count(&self) -> usize {
        self.inner.arena.lock().len()
    }

    #[inline]
    pub(crate) fn driver(&self) -> &Arc<dyn BrowserDriver> {
        self.inner.scopes.driver()
    }
}

// ============================================================================
// Session - Internal
// ============================================================================

impl Session {
    /// Focuses the driver on `scope`.
    pub(crate) async fn activate(&self, scope: &ScopeDescriptor) -> Result<()> {
        self.inner.scopes.activate(scope).await
    }

    /// Full selector of a reference.
    pub(crate) fn full_selector(&self, id: ReferenceId) -> String {
        self.inner.arena.lock().full_selector(id)
    }

    /// Adds the root node of a newly entered frame or window.
    pub(crate) fn register_page(&self, scope: Arc<ScopeDescriptor>) -> Page {
        let id = self.inner.arena.lock().insert_frame(Arc::clone(&scope));
        let node = NodeGuard::attach(&self.inner.arena, id, None);
        Page::new(self.clone(), node, scope)
    }

    /// Pins the session's top-level page to `window` unless it already has one.
    pub(crate) fn pin_root_window(&self, window: WindowHandle) {
        if self.inner.root.pin_window(window) {
            debug!(window = ?self.inner.root.window_handle(), "Top-level page pinned to window");
        }
    }

    /// Element the given reference was found under, if any.
    ///
    /// Walks up through collections and stops at the first page.
    pub(crate) fn parent_element(&self, node: &Arc<NodeGuard>) -> Option<Element> {
        let mut current = node.parent();
        while let Some(guard) = current {
            let found = {
                let arena = self.inner.arena.lock();
                let parent = arena.node(guard.id()).ok()?;
                match &parent.kind {
                    NodeKind::Element(handle) => {
                        Some((handle.clone(), Arc::clone(&parent.scope)))
                    }
                    NodeKind::Collection(_) => None,
                    NodeKind::Frame => return None,
                }
            };
            if let Some((handle, scope)) = found {
                return Some(Element::new(self.clone(), Arc::clone(guard), handle, scope));
            }
            current = guard.parent();
        }
        None
    }

    /// Pauses for the configured action wait.
    pub(crate) async fn action_pause(&self) {
        let wait = self.inner.options.action_wait;
        if !wait.is_zero() {
            trace!(wait_ms = wait.as_millis() as u64, "Action wait");
            sleep(wait).await;
        }
    }

    /// Runs a query from reference `from`.
    ///
    /// Activates the reference's scope, asks the driver once per search
    /// context (page document, the element, or each element of a
    /// collection) and concatenates the results in context order.
    pub(crate) async fn find(&self, from: ReferenceId, by: &By) -> Result<ElementCollection> {
        let (scope, contexts, parent) = {
            let arena = self.inner.arena.lock();
            let scope = Arc::clone(&arena.node(from)?.scope);
            (scope, arena.search_contexts(from)?, arena.guard(from)?)
        };

        self.activate(&scope).await?;

        let method = by.method_or(self.inner.options.select_method);
        debug!(
            selector = %by.selector(),
            %method,
            contexts = contexts.len(),
            scope = %scope,
            "Finding elements"
        );

        let mut handles: Vec<ElementHandle> = Vec::new();
        for context in &contexts {
            let found = self
                .driver()
                .find_elements(context.as_ref(), method, by.selector())
                .await?;
            handles.extend(found);
        }

        trace!(selector = %by.selector(), count = handles.len(), "Found elements");

        let (collection, ids) = self.inner.arena.lock().insert_collection(
            from,
            by.selector(),
            Arc::clone(&scope),
            handles.clone(),
        );

        let collection = NodeGuard::attach(&self.inner.arena, collection, Some(parent));

        let elements = ids
            .into_iter()
            .zip(handles)
            .map(|(id, handle)| {
                let node = NodeGuard::attach(&self.inner.arena, id, Some(Arc::clone(&collection)));
                Element::new(self.clone(), node, handle, Arc::clone(&scope))
            })
            .collect();

        Ok(ElementCollection::new(self.clone(), collection, elements, scope))
    }
}

// ============================================================================
// Tests
// ============================================================================
