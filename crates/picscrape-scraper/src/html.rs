//! Small helpers over the `scraper` DOM shared by the price, crawl and
//! extract modules.

use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// Compiles a CSS selector.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if `selector` does not parse.
pub fn compile_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        // `SelectorErrorKind`'s `Display` panics on some tokens.
        reason: format!("{e:?}"),
    })
}

/// Text content of `element` with surrounding whitespace trimmed.
#[must_use]
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Trimmed text of the first element matching `selector`.
///
/// # Errors
///
/// - [`ScraperError::InvalidSelector`] if `selector` does not parse.
/// - [`ScraperError::MissingElement`] if nothing matches.
pub fn select_first_text(doc: &Html, selector: &str) -> Result<String, ScraperError> {
    let compiled = compile_selector(selector)?;
    doc.select(&compiled)
        .next()
        .map(element_text)
        .ok_or_else(|| ScraperError::MissingElement {
            selector: selector.to_owned(),
        })
}
