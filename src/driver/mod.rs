//! Page driver abstraction
//!
//! Everything the scraper needs from a browser goes through [`PageDriver`]:
//! - navigate to a URL
//! - find visible elements matching a [`Locator`]
//! - click one of them
//! - read the rendered text of the page
//! - capture a screenshot
//!
//! Bounded waiting is built on top of these with [`poll_until`].

pub mod wait;

pub use wait::{WaitPolicy, poll_until};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes which elements to look for on the page.
///
/// All text comparisons are case-insensitive containment checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// Elements whose own text nodes contain the value
    Text { contains: String },

    /// Elements with an attribute containing the value
    Attribute { name: String, contains: String },

    /// Elements matching a CSS selector, optionally filtered by visible text
    Css {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },

    /// The element with exactly this id
    Id { id: String },
}

impl Locator {
    pub fn text(contains: impl Into<String>) -> Self {
        Self::Text { contains: contains.into() }
    }

    pub fn attribute(name: impl Into<String>, contains: impl Into<String>) -> Self {
        Self::Attribute { name: name.into(), contains: contains.into() }
    }

    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css { selector: selector.into(), text: None }
    }

    pub fn css_with_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Css { selector: selector.into(), text: Some(text.into()) }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::Id { id: id.into() }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { contains } => write!(f, "text containing '{}'", contains),
            Self::Attribute { name, contains } => write!(f, "[{}*='{}']", name, contains),
            Self::Css { selector, text: Some(text) } => write!(f, "{} containing '{}'", selector, text),
            Self::Css { selector, text: None } => write!(f, "{}", selector),
            Self::Id { id } => write!(f, "#{}", id),
        }
    }
}

/// A visible element found by a driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundElement {
    /// Driver-assigned handle, stable for the lifetime of the page
    pub handle: usize,

    /// Rendered text of the element, trimmed
    #[serde(default)]
    pub text: String,
}

/// Capabilities the scraper requires from a browser page.
pub trait PageDriver {
    /// Load a URL and wait for the document to finish loading
    fn navigate(&self, url: &str) -> Result<()>;

    /// Visible elements matching the locator, in document order
    fn find_visible(&self, locator: &Locator) -> Result<Vec<FoundElement>>;

    /// Scroll an element into view and click it
    fn click(&self, element: &FoundElement) -> Result<()>;

    /// Full rendered text of the page body
    fn rendered_text(&self) -> Result<String>;

    /// PNG screenshot of the current viewport
    fn screenshot(&self) -> Result<Vec<u8>>;

    /// Wait until at least one visible element matches the locator
    fn wait_for_visible(&self, locator: &Locator, policy: &WaitPolicy) -> Result<Vec<FoundElement>> {
        let mut found = Vec::new();
        poll_until(policy, &locator.to_string(), || {
            found = self.find_visible(locator)?;
            Ok(!found.is_empty())
        })?;
        Ok(found)
    }
}

/// Texts of the visible elements, deduplicated, empty ones dropped
pub fn visible_texts(elements: &[FoundElement]) -> Vec<String> {
    let mut texts: Vec<String> = Vec::new();
    for element in elements {
        let text = element.text.trim();
        if !text.is_empty() && !texts.iter().any(|t| t == text) {
            texts.push(text.to_string());
        }
    }
    texts
}
