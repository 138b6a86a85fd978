//! URL resolution against a configured base URL.
//!
//! | Input | Result |
//! |-------|--------|
//! | empty / blank | the base URL verbatim |
//! | absolute (`https://...`, `about:blank`) | unchanged |
//! | `//host/path` | scheme of the *current page* + `:` + input |
//! | `/path` | scheme, host and port of the base + input |
//! | `path` | base URL (path kept) + `/` + input |
//!
//! Protocol-relative input reuses the current page's scheme so a session can
//! follow cross-scheme redirects. Root-relative and bare paths always use the
//! configured base, never the current page.

use url::Url;

use crate::error::{Error, Result};

/// Schemes accepted as absolute even though they have no authority.
const OPAQUE_SCHEMES: &[&str] = &["about", "data", "mailto", "javascript", "file"];

// ============================================================================
// Navigator
// ============================================================================

/// Resolves user supplied URLs against an optional base URL.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    base: Option<Base>,
}

#[derive(Debug, Clone)]
struct Base {
    raw: String,
    url: Url,
}

impl Navigator {
    /// Creates a navigator.
    ///
    /// A blank `base_url` is treated as no base at all.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `base_url` is not an absolute URL.
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let base = match base_url.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => {
                let url = Url::parse(raw)
                    .map_err(|e| Error::config(format!("invalid base URL '{raw}': {e}")))?;
                if url.cannot_be_a_base() {
                    return Err(Error::config(format!("base URL '{raw}' has no host")));
                }
                Some(Base {
                    raw: raw.to_string(),
                    url,
                })
            }
        };
        Ok(Self { base })
    }

    /// Returns the configured base URL.
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base.as_ref().map(|b| b.raw.as_str())
    }

    /// Resolves `input` to the URL to navigate to.
    ///
    /// `current_url` is the URL of the page currently loaded, used only for
    /// protocol-relative input. When it is missing or unparsable the base
    /// URL's scheme is used instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRedirect`] when `input` needs a base URL (or a
    /// scheme) and none is available.
    pub fn resolve(&self, input: &str, current_url: Option<&str>) -> Result<String> {
        let input = input.trim();

        if input.is_empty() {
            return self
                .base_url()
                .map(str::to_string)
                .ok_or_else(|| Error::invalid_redirect(input));
        }

        if is_absolute(input) {
            return Ok(input.to_string());
        }

        if input.starts_with("//") {
            let scheme = current_url
                .and_then(|u| Url::parse(u).ok())
                .map(|u| u.scheme().to_string())
                .or_else(|| self.base.as_ref().map(|b| b.url.scheme().to_string()))
                .ok_or_else(|| Error::invalid_redirect(input))?;
            return Ok(format!("{scheme}:{input}"));
        }

        let base = self
            .base
            .as_ref()
            .ok_or_else(|| Error::invalid_redirect(input))?;

        let mut prefix = base.url.clone();
        prefix.set_query(None);
        prefix.set_fragment(None);
        if input.starts_with('/') {
            prefix.set_path("");
        }

        Ok(join(prefix.as_str(), input))
    }

    /// Joins scheme, host and port of the base URL with `relative`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRedirect`] without a base URL.
    pub fn absolute_url(&self, relative: &str) -> Result<String> {
        let base = self
            .base
            .as_ref()
            .ok_or_else(|| Error::invalid_redirect(relative))?;
        let origin = base.url.origin().ascii_serialization();
        Ok(join(&origin, relative))
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn is_absolute(input: &str) -> bool {
    Url::parse(input).is_ok_and(|url| {
        !url.cannot_be_a_base() || OPAQUE_SCHEMES.contains(&url.scheme())
    })
}

/// Joins two URL parts with exactly one slash between them.
fn join(prefix: &str, path: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Returns `url` without query string and fragment.
///
/// Unparsable input is returned unchanged.
#[must_use]
pub fn strip_query(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
