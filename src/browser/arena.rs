//! Arena of reference nodes.
//!
//! Every page, collection and element handed out by a session is a node in
//! one arena, addressed by [`ReferenceId`]. Nodes point to their parent by
//! ID, so ancestry walks (full selector, owning scope, search contexts) are
//! plain loops over a map with no shared ownership between nodes.
//!
//! # Lifetime
//!
//! Handles own their node through an `Arc<NodeGuard>`. A guard keeps its
//! parent's guard alive, so the lookup chain of a live reference is always
//! complete. When the last handle of a node is dropped, the guard removes the
//! node again. IDs are never reused within a session.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::identifiers::{ElementHandle, ReferenceId};
use crate::scope::ScopeDescriptor;

/// Arena shared by a session and the guards of its references.
pub(crate) type SharedArena = Arc<Mutex<ReferenceArena>>;

// ============================================================================
// Types
// ============================================================================

/// What a node refers to.
#[derive(Debug, Clone)]
pub(crate) enum NodeKind {
    /// The root of a page: top-level document or a frame's document.
    Frame,
    /// Result of one query: the matched handles, in match order.
    Collection(Vec<ElementHandle>),
    /// One matched element.
    Element(ElementHandle),
}

/// One reference in the arena.
#[derive(Debug, Clone)]
pub(crate) struct ReferenceNode {
    /// Literal selector fragment; empty for pages and elements.
    pub selector: String,
    /// Reference this one was found under.
    pub parent: Option<ReferenceId>,
    /// Scope the referenced elements live in.
    pub scope: Arc<ScopeDescriptor>,
    pub kind: NodeKind,
    /// Guard owning this node; dangling once every handle is gone.
    guard: Weak<NodeGuard>,
}

// ============================================================================
// ReferenceArena
// ============================================================================

/// Storage of the live reference nodes of one session.
#[derive(Debug, Default)]
pub(crate) struct ReferenceArena {
    nodes: FxHashMap<ReferenceId, ReferenceNode>,
    next: usize,
}

impl ReferenceArena {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    fn push(
        &mut self,
        selector: &str,
        parent: Option<ReferenceId>,
        scope: Arc<ScopeDescriptor>,
        kind: NodeKind,
    ) -> ReferenceId {
        let id = ReferenceId::new(self.next);
        self.next += 1;
        self.nodes.insert(
            id,
            ReferenceNode {
                selector: selector.to_string(),
                parent,
                scope,
                kind,
                guard: Weak::new(),
            },
        );
        id
    }

    /// Adds the root node of a page.
    pub(crate) fn insert_frame(&mut self, scope: Arc<ScopeDescriptor>) -> ReferenceId {
        self.push("", None, scope, NodeKind::Frame)
    }

    /// Adds the result of a query and one element node per handle.
    ///
    /// Returns the collection ID and the element IDs in match order.
    pub(crate) fn insert_collection(
        &mut self,
        parent: ReferenceId,
        selector: &str,
        scope: Arc<ScopeDescriptor>,
        handles: Vec<ElementHandle>,
    ) -> (ReferenceId, Vec<ReferenceId>) {
        let collection = self.push(
            selector,
            Some(parent),
            Arc::clone(&scope),
            NodeKind::Collection(handles.clone()),
        );

        let elements = handles
            .into_iter()
            .map(|handle| {
                self.push(
                    "",
                    Some(collection),
                    Arc::clone(&scope),
                    NodeKind::Element(handle),
                )
            })
            .collect();

        (collection, elements)
    }

    /// Removes a node. Unknown IDs are ignored.
    pub(crate) fn remove(&mut self, id: ReferenceId) {
        self.nodes.remove(&id);
    }

    /// Looks up a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an ID that is not live.
    pub(crate) fn node(&self, id: ReferenceId) -> Result<&ReferenceNode> {
        self.nodes
            .get(&id)
            .ok_or_else(|| Error::invalid_argument(format!("unknown reference {id}")))
    }

    /// Returns the guard owning a node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the node is gone or was never
    /// attached to a guard.
    pub(crate) fn guard(&self, id: ReferenceId) -> Result<Arc<NodeGuard>> {
        self.node(id)?
            .guard
            .upgrade()
            .ok_or_else(|| Error::invalid_argument(format!("reference {id} was released")))
    }

    fn attach(&mut self, id: ReferenceId, guard: &Arc<NodeGuard>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.guard = Arc::downgrade(guard);
        }
    }

    /// Iterates from `id` up to its root.
    fn ancestry(&self, id: ReferenceId) -> impl Iterator<Item = &ReferenceNode> {
        std::iter::successors(self.nodes.get(&id), |node| {
            node.parent.and_then(|parent| self.nodes.get(&parent))
        })
    }

    /// Space-joined selector fragments from the root down to `id`.
    ///
    /// Empty fragments are skipped.
    pub(crate) fn full_selector(&self, id: ReferenceId) -> String {
        let mut segments: Vec<&str> = self
            .ancestry(id)
            .map(|node| node.selector.trim())
            .filter(|s| !s.is_empty())
            .collect();
        segments.reverse();
        segments.join(" ")
    }

    /// Element handles a query from `id` searches under.
    ///
    /// `None` means the whole focused document.
    pub(crate) fn search_contexts(&self, id: ReferenceId) -> Result<Vec<Option<ElementHandle>>> {
        let contexts = match &self.node(id)?.kind {
            NodeKind::Frame => vec![None],
            NodeKind::Element(handle) => vec![Some(handle.clone())],
            NodeKind::Collection(handles) => handles.iter().cloned().map(Some).collect(),
        };
        Ok(contexts)
    }
}

// ============================================================================
// NodeGuard
// ============================================================================

/// Ownership of one arena node.
///
/// Dropping the last `Arc` removes the node, then releases the parent guard.
pub(crate) struct NodeGuard {
    id: ReferenceId,
    parent: Option<Arc<NodeGuard>>,
    arena: SharedArena,
}

impl NodeGuard {
    /// Creates the guard for node `id` and attaches it.
    ///
    /// Locks the arena; must not be called while the caller holds the lock.
    pub(crate) fn attach(
        arena: &SharedArena,
        id: ReferenceId,
        parent: Option<Arc<NodeGuard>>,
    ) -> Arc<Self> {
        let guard = Arc::new(Self {
            id,
            parent,
            arena: Arc::clone(arena),
        });
        arena.lock().attach(id, &guard);
        guard
    }

    #[inline]
    pub(crate) fn id(&self) -> ReferenceId {
        self.id
    }

    /// Guard of the reference this one was found under.
    #[inline]
    pub(crate) fn parent(&self) -> Option<&Arc<NodeGuard>> {
        self.parent.as_ref()
    }
}

impl fmt::Debug for NodeGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeGuard")
            .field("id", &self.id)
            .field("parent", &self.parent.as_ref().map(|p| p.id))
            .finish_non_exhaustive()
    }
}

impl Drop for NodeGuard {
    fn drop(&mut self) {
        self.arena.lock().remove(self.id);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn handles(n: usize) -> Vec<ElementHandle> {
        (0..n).map(|i| ElementHandle::new(format!("e-{i}"))).collect()
    }

    fn shared() -> SharedArena {
        Arc::new(Mutex::new(ReferenceArena::new()))
    }

    #[test]
    fn test_collection_links_children() {
        let scope = ScopeDescriptor::root(None);
        let mut arena = ReferenceArena::new();
        let page = arena.insert_frame(Arc::clone(&scope));

        let (list, items) = arena.insert_collection(page, "ul", Arc::clone(&scope), handles(2));

        assert_eq!(items.len(), 2);
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.node(items[0]).unwrap().parent, Some(list));
        assert_eq!(arena.search_contexts(list).unwrap().len(), 2);
        assert_eq!(arena.search_contexts(page).unwrap(), vec![None]);
    }

    #[test]
    fn test_full_selector_skips_empty_segments() {
        let scope = ScopeDescriptor::root(None);
        let mut arena = ReferenceArena::new();
        let page = arena.insert_frame(Arc::clone(&scope));

        let (list, items) = arena.insert_collection(page, "ul.menu", Arc::clone(&scope), handles(1));
        let (links, _) = arena.insert_collection(items[0], "li > a", Arc::clone(&scope), handles(3));

        assert_eq!(arena.full_selector(page), "");
        assert_eq!(arena.full_selector(list), "ul.menu");
        assert_eq!(arena.full_selector(items[0]), "ul.menu");
        assert_eq!(arena.full_selector(links), "ul.menu li > a");
    }

    #[test]
    fn test_unknown_reference() {
        let arena = ReferenceArena::new();
        assert!(arena.node(ReferenceId::new(3)).is_err());
        assert!(arena.guard(ReferenceId::new(3)).is_err());
        assert_eq!(arena.full_selector(ReferenceId::new(3)), "");
    }

    #[test]
    fn test_guard_drop_removes_node_and_releases_parent() {
        let arena = shared();
        let scope = ScopeDescriptor::root(None);
        let page_id = arena.lock().insert_frame(Arc::clone(&scope));
        let page = NodeGuard::attach(&arena, page_id, None);

        let (list_id, items) = arena
            .lock()
            .insert_collection(page_id, "li", Arc::clone(&scope), handles(1));
        let list = NodeGuard::attach(&arena, list_id, Some(Arc::clone(&page)));
        let item = NodeGuard::attach(&arena, items[0], Some(Arc::clone(&list)));
        assert_eq!(arena.lock().len(), 3);
        assert_eq!(arena.lock().guard(items[0]).unwrap().id(), items[0]);

        drop(list);
        assert_eq!(arena.lock().len(), 3, "element keeps its collection alive");
        assert_eq!(arena.lock().full_selector(items[0]), "li");

        drop(item);
        assert_eq!(arena.lock().len(), 1);
        assert!(arena.lock().node(list_id).is_err());
        assert_eq!(arena.lock().guard(page_id).unwrap().id(), page.id());
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut arena = ReferenceArena::new();
        let scope = ScopeDescriptor::root(None);
        let first = arena.insert_frame(Arc::clone(&scope));
        arena.remove(first);
        let second = arena.insert_frame(scope);
        assert_ne!(first, second);
    }

    proptest! {
        #[test]
        fn prop_full_selector_is_root_first_join(
            segments in prop::collection::vec("[a-z#. ]{0,6}", 1..8)
        ) {
            let scope = ScopeDescriptor::root(None);
            let mut arena = ReferenceArena::new();
            let mut current = arena.insert_frame(Arc::clone(&scope));

            for segment in &segments {
                let (_, elements) =
                    arena.insert_collection(current, segment, Arc::clone(&scope), handles(1));
                current = elements[0];
            }

            let expected: Vec<&str> = segments
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect();
            prop_assert_eq!(arena.full_selector(current), expected.join(" "));
        }
    }
}
