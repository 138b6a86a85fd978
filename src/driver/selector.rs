//! Element locator strategies.
//!
//! A [`By`] pairs the literal selector string with an optional
//! [`SelectMethod`]. Plain strings convert into a `By` without a method, which
//! means "use the session's default method" (CSS unless configured otherwise).
//!
//! # Example
//!
//! ```ignore
//! use scoped_webdriver::{By, Reference};
//!
//! // Session default (CSS)
//! let btn = page.find_first("#submit").await?;
//!
//! // Per-query override
//! let row = page.find_first(By::xpath("//tr[2]")).await?;
//! let field = page.find_first(By::name("email")).await?;
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// SelectMethod
// ============================================================================

/// How a selector string is interpreted by the driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SelectMethod {
    /// CSS selector (default).
    #[default]
    Css,
    /// XPath expression.
    XPath,
    /// Element `id` attribute.
    Id,
    /// Element `name` attribute.
    Name,
    /// Single class name.
    ClassName,
    /// Tag name.
    TagName,
    /// Exact link text (for `<a>` elements).
    LinkText,
    /// Partial link text (for `<a>` elements).
    PartialLinkText,
}

impl SelectMethod {
    /// Returns the strategy name as used by W3C WebDriver where one exists.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css => "css selector",
            Self::XPath => "xpath",
            Self::Id => "id",
            Self::Name => "name",
            Self::ClassName => "class name",
            Self::TagName => "tag name",
            Self::LinkText => "link text",
            Self::PartialLinkText => "partial link text",
        }
    }
}

impl fmt::Display for SelectMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy())
    }
}

// ============================================================================
// By
// ============================================================================

/// A selector string with an optional per-query select method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct By {
    selector: String,
    method: Option<SelectMethod>,
}

impl By {
    /// Creates a locator with an explicit method.
    #[inline]
    pub fn with_method(method: SelectMethod, selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            method: Some(method),
        }
    }

    /// Creates a locator that uses the session default method.
    #[inline]
    pub fn default_method(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            method: None,
        }
    }

    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::Css, selector)
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::XPath, expr)
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::Id, id)
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::Name, name)
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::ClassName, class)
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag_name(tag: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::TagName, tag)
    }

    /// Creates a link text selector.
    #[inline]
    pub fn link_text(text: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::LinkText, text)
    }

    /// Creates a partial link text selector.
    #[inline]
    pub fn partial_link_text(text: impl Into<String>) -> Self {
        Self::with_method(SelectMethod::PartialLinkText, text)
    }

    /// Returns the literal selector string.
    #[inline]
    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Returns the per-query method override, if any.
    #[inline]
    #[must_use]
    pub fn method(&self) -> Option<SelectMethod> {
        self.method
    }

    /// Returns the effective method, falling back to `default`.
    #[inline]
    #[must_use]
    pub fn method_or(&self, default: SelectMethod) -> SelectMethod {
        self.method.unwrap_or(default)
    }

    /// Pins the method, so the locator no longer depends on session defaults.
    #[must_use]
    pub fn resolved(self, default: SelectMethod) -> Self {
        let method = self.method_or(default);
        Self {
            selector: self.selector,
            method: Some(method),
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.method {
            Some(SelectMethod::Css) | None => f.write_str(&self.selector),
            Some(method) => write!(f, "{}={}", method, self.selector),
        }
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to a locator using the session default method.
    fn from(s: &str) -> Self {
        Self::default_method(s)
    }
}

impl From<String> for By {
    /// Converts a string to a locator using the session default method.
    fn from(s: String) -> Self {
        Self::default_method(s)
    }
}

impl From<&String> for By {
    fn from(s: &String) -> Self {
        Self::default_method(s.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================
