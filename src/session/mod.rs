//! Test-run sessions.
//!
//! A [`Session`] is the unit of isolation: one driver, one Active Scope
//! Marker, one reference arena. Everything a test touches is reached from
//! [`Session::page`].
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Session struct, query routing |
//! | `builder` | Fluent construction with validation |
//! | `options` | Base URL, action wait, select method, wait defaults |

// ============================================================================
// Submodules
// ============================================================================

mod builder;
mod core;
mod options;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::SessionBuilder;
pub use core::Session;
pub use options::{DEFAULT_ACTION_WAIT, SessionOptions};
