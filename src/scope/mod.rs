//! Browsing-context scopes and their activation.
//!
//! A scope is one browsing context: the top-level document of a window or a
//! (possibly nested) frame inside it. Every reference created by a query
//! belongs to exactly one scope, and the driver must be focused on that scope
//! before any command for the reference is sent.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ScopeDescriptor`] | Immutable identity and location of one context |
//! | [`ScopeContext`] | Per-run Active Scope Marker and the switching logic |

// ============================================================================
// Submodules
// ============================================================================

/// Activation state machine.
pub mod context;

/// Scope identity and ancestry.
pub mod descriptor;

// ============================================================================
// Re-exports
// ============================================================================

pub use context::ScopeContext;
pub use descriptor::ScopeDescriptor;
