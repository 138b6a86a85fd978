//! Reference tree: pages, elements and element collections.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Page`] | Top-level document of a window, or a frame |
//! | [`Element`] | One matched element |
//! | [`ElementCollection`] | All matches of one query |
//! | [`Reference`] | Query capability shared by the three |
//!
//! Every reference is a node in the session's arena and knows its parent,
//! the selector that produced it and the scope it lives in.
//!
//! # Example
//!
//! ```ignore
//! use scoped_webdriver::{Reference, Session};
//!
//! let page = session.page();
//! let rows = page.find_single("table#orders").await?.find_elements("tr").await?;
//! for row in &rows {
//!     println!("{}", row.text().await?);
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Arena storing every reference of a session.
pub(crate) mod arena;

/// Results of one query.
pub mod collection;

/// Single matched element.
pub mod element;

/// Pages and frames.
pub mod page;

/// Shared query trait.
pub mod reference;

// ============================================================================
// Re-exports
// ============================================================================

pub use collection::ElementCollection;
pub use element::Element;
pub use page::Page;
pub use reference::Reference;
