//! Scoped WebDriver - frame-aware element references for browser tests.
//!
//! This library sits on top of a WebDriver-style browser API and takes care
//! of the bookkeeping that makes tests against framed pages painful: which
//! window and frame the driver is focused on, and how to get back to the
//! document an element was found in.
//!
//! # Architecture
//!
//! - **Scopes**: every page and frame has a [`ScopeDescriptor`]. The
//!   session's [`ScopeContext`] tracks the active one and replays only the
//!   frame switches that are needed to reach another.
//! - **Reference tree**: [`Page`], [`Element`] and [`ElementCollection`]
//!   remember how they were found, so nested queries and error messages carry
//!   the full selector path.
//! - **Waiter**: [`wait`] polls a condition or retries an action until a
//!   timeout, with a fixed interval.
//! - **Navigator**: resolves relative URLs against a configured base.
//!
//! The browser itself is reached through the [`BrowserDriver`] trait; bring
//! your own implementation for the WebDriver client in use.
//!
//! # Quick Start
//!
//! ```ignore
//! use scoped_webdriver::{Reference, Result, Session};
//!
//! async fn login(driver: std::sync::Arc<dyn scoped_webdriver::BrowserDriver>) -> Result<()> {
//!     let session = Session::builder(driver)
//!         .base_url("https://localhost:5001")
//!         .build()?;
//!
//!     let page = session.page();
//!     page.navigate_to_url("/login").await?;
//!
//!     let form = page.enter_frame("iframe#auth").await?;
//!     form.send_keys("#user", "admin").await?;
//!     form.click("button[type=submit]").await?;
//!
//!     // Back in the top-level document, no manual switch needed.
//!     page.find_single(".welcome").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`browser`] | Reference tree: [`Page`], [`Element`], [`ElementCollection`] |
//! | [`driver`] | [`BrowserDriver`] trait and selectors |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`navigator`] | Base-URL resolution |
//! | [`scope`] | Scope descriptors and activation |
//! | [`session`] | Session, builder and options |
//! | [`wait`] | Polling waiter |

// ============================================================================
// Modules
// ============================================================================

/// Reference tree: Page, Element, ElementCollection.
pub mod browser;

/// Browser driver abstraction and selectors.
///
/// Implement [`BrowserDriver`] to plug in a WebDriver client.
pub mod driver;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// URL resolution against a base URL.
pub mod navigator;

/// Scope descriptors and the activation state machine.
pub mod scope;

/// Session state shared by all references of one run.
pub mod session;

/// Polling waiter.
pub mod wait;

// ============================================================================
// Re-exports
// ============================================================================

// Browser types
pub use browser::{Element, ElementCollection, Page, Reference};

// Driver types
pub use driver::{BrowserDriver, By, FrameTarget, SelectMethod};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementHandle, ReferenceId, ScopeId, WindowHandle};

// Navigation types
pub use navigator::Navigator;

// Scope types
pub use scope::{ScopeContext, ScopeDescriptor};

// Session types
pub use session::{Session, SessionBuilder, SessionOptions};

// Wait types
pub use wait::WaitOptions;
