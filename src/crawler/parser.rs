//! HTML parser for extracting page content
//!
//! This module turns a fetched document into the content fields of a page
//! record:
//! - Title (first `<h1>`)
//! - Summary (first paragraph, preferring `<main>`)
//! - Outgoing links (`<a href>`)
//! - Image URLs (`<img src>`)
//!
//! Extraction never fails. Anything that cannot be parsed degrades to an
//! empty field.

use crate::state::PageContent;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts the content fields of a page
///
/// Relative references are resolved against `page_url`. Links are not
/// filtered by scope or deduplicated here; the crawl engine does that.
///
/// # Arguments
///
/// * `html` - The HTML document
/// * `page_url` - The absolute URL the document was fetched from
///
/// # Example
///
/// ```
/// use pagecrawl::crawler::extract_page;
///
/// let html = r#"<html><body><h1>Hi</h1><a href="/next">Next</a></body></html>"#;
/// let content = extract_page(html, "https://example.com/");
/// assert_eq!(content.title, "Hi");
/// assert_eq!(content.outgoing_links, vec!["https://example.com/next"]);
/// ```
pub fn extract_page(html: &str, page_url: &str) -> PageContent {
    let document = Html::parse_document(html);

    let (outgoing_links, image_urls) = match Url::parse(page_url) {
        Ok(base_url) => (
            extract_links(&document, &base_url),
            extract_images(&document, &base_url),
        ),
        Err(e) => {
            tracing::debug!("Cannot resolve references of {}: {}", page_url, e);
            (Vec::new(), Vec::new())
        }
    };

    PageContent {
        title: extract_title(&document),
        summary: extract_summary(&document),
        outgoing_links,
        image_urls,
    }
}

/// Text of the first `<h1>` in document order
fn extract_title(document: &Html) -> String {
    first_text(document, "h1").unwrap_or_default()
}

/// First paragraph inside `<main>`, else the first paragraph anywhere
fn extract_summary(document: &Html) -> String {
    first_text(document, "main p")
        .or_else(|| first_text(document, "p"))
        .unwrap_or_default()
}

/// Trimmed text of the first element matching `selector`, if non-empty
fn first_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| element_text(&element))
        .filter(|text| !text.is_empty())
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    resolve_attribute(document, "a[href]", "href", base_url)
}

fn extract_images(document: &Html, base_url: &Url) -> Vec<String> {
    resolve_attribute(document, "img[src]", "src", base_url)
}

/// Resolves `attr` of every element matching `selector`, in document order
///
/// Blank values and values that fail to resolve are skipped.
fn resolve_attribute(document: &Html, selector: &str, attr: &str, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|value| resolve_reference(value, base_url))
        .collect()
}

fn resolve_reference(value: &str, base_url: &Url) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    match base_url.join(value) {
        Ok(absolute) => Some(absolute.to_string()),
        Err(e) => {
            tracing::trace!("Skipping unresolvable reference {:?}: {}", value, e);
            None
        }
    }
}
