//! Pages: the top-level document of a window, or a frame inside it.
//!
//! A [`Page`] is the root of a reference tree. Queries from a page search its
//! whole document; every element found carries the page's scope.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Page struct and accessors |
//! | `navigation` | URL navigation, history, tabs |
//! | `frames` | Entering frames |
//! | `actions` | Click, submit, typing by selector |
//! | `alerts` | Alert dialogs |
//! | `script` | JavaScript execution, screenshots |
//! | `waiting` | Pauses and waiter shortcuts |
//!
//! # Example
//!
//! ```ignore
//! let page = session.page();
//!
//! page.navigate_to_url("/checkout").await?;
//! page.send_keys("#card", "4242 4242 4242 4242").await?;
//!
//! let payment = page.enter_frame("iframe#payment").await?;
//! payment.click("button[type=submit]").await?;
//!
//! page.wait_for("order confirmed", || async {
//!     Ok(page.find_first_or_default(".confirmation").await?.is_some())
//! })
//! .await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod actions;
mod alerts;
mod core;
mod frames;
mod navigation;
mod script;
mod waiting;

// ============================================================================
// Re-exports
// ============================================================================

pub use core::Page;
