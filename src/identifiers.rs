//! Type-safe identifiers for scopes, references and driver handles.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//!
//! | Type | Origin | Description |
//! |------|--------|-------------|
//! | [`ScopeId`] | generated | Identity of one browsing context (top document or frame) |
//! | [`ReferenceId`] | generated | Index of a node in a session's reference arena |
//! | [`ElementHandle`] | driver | Opaque element reference returned by the driver |
//! | [`WindowHandle`] | driver | Opaque window/tab handle returned by the driver |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// W3C WebDriver key identifying an element inside script arguments.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

// ============================================================================
// ScopeId
// ============================================================================

/// Unique identity of a scope, generated when the scope is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScopeId(Uuid);

impl ScopeId {
    /// Generates a fresh random scope ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ReferenceId
// ============================================================================

/// Index of a reference node in a session's arena.
///
/// Only meaningful together with the session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReferenceId(usize);

impl ReferenceId {
    /// Creates a reference ID from an arena index.
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena index.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ref#{}", self.0)
    }
}

// ============================================================================
// ElementHandle
// ============================================================================

/// Driver-issued element reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// Wraps a driver element ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw driver ID.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encodes this element as a script argument.
    #[must_use]
    pub fn to_script_arg(&self) -> Value {
        json!({ ELEMENT_KEY: self.0 })
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// WindowHandle
// ============================================================================

/// Driver-issued window/tab handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(String);

impl WindowHandle {
    /// Wraps a driver window handle.
    #[inline]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Returns the raw driver handle.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_ids_are_unique() {
        assert_ne!(ScopeId::generate(), ScopeId::generate());
    }

    #[test]
    fn test_reference_id_display() {
        assert_eq!(ReferenceId::new(7).to_string(), "ref#7");
        assert_eq!(ReferenceId::new(7).index(), 7);
    }

    #[test]
    fn test_element_script_arg() {
        let handle = ElementHandle::new("abc");
        assert_eq!(handle.to_script_arg(), json!({ ELEMENT_KEY: "abc" }));
    }

    #[test]
    fn test_handles_serialize_transparently() {
        let handle = WindowHandle::new("w-1");
        assert_eq!(serde_json::to_string(&handle).unwrap(), "\"w-1\"");
    }
}
