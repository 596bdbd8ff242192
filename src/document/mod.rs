//! Parsed HTML documents.
//!
//! [`Document`] wraps a [`scraper::Html`] tree and adds CSS-selector queries
//! that report bad selectors as errors instead of panicking.

use crate::cookies::CookieJar;
use scraper::{ElementRef, Html, Selector};

/// An invalid CSS selector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CSS selector {selector:?}: {message}")]
pub struct SelectorError {
    pub selector: String,
    pub message: String,
}

/// A parsed HTML document.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document. Malformed markup is recovered from the
    /// way browsers do, so parsing never fails.
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The underlying `scraper` tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn into_html(self) -> Html {
        self.html
    }

    /// Returns every element matching `selector`, in document order.
    pub fn select(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, SelectorError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).collect())
    }

    /// Returns the first element matching `selector`.
    pub fn select_first(&self, selector: &str) -> Result<Option<ElementRef<'_>>, SelectorError> {
        let selector = parse_selector(selector)?;
        Ok(self.html.select(&selector).next())
    }

    /// Returns the trimmed text content of every element matching `selector`.
    pub fn select_text(&self, selector: &str) -> Result<Vec<String>, SelectorError> {
        Ok(self
            .select(selector)?
            .into_iter()
            .map(element_text)
            .collect())
    }

    /// Returns the value of `attribute` on every matching element that has it.
    pub fn select_attr(&self, selector: &str, attribute: &str) -> Result<Vec<String>, SelectorError> {
        Ok(self
            .select(selector)?
            .into_iter()
            .filter_map(|el| el.value().attr(attribute).map(str::to_string))
            .collect())
    }

    /// The document's `<title>`, trimmed.
    pub fn title(&self) -> Option<String> {
        self.select_first("title")
            .ok()
            .flatten()
            .map(element_text)
    }

    /// Serializes the document back to HTML.
    pub fn to_html(&self) -> String {
        self.html.html()
    }
}

/// A fetched document together with the cookie jar used to fetch it.
///
/// The jar is the same instance the caller supplied, if any, so it can be
/// passed to the next request to continue the session.
#[derive(Debug)]
pub struct DocumentResponse {
    pub document: Document,
    pub cookie_jar: CookieJar,
}

fn parse_selector(selector: &str) -> Result<Selector, SelectorError> {
    Selector::parse(selector).map_err(|e| SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
