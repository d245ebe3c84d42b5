//! HTML link extraction
//!
//! This module turns a fetched page into the set of absolute http/https URLs
//! it links to.

use crate::url::is_crawlable;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Something that can list the links of a fetched page
pub trait LinkExtractor: Send + Sync + 'static {
    /// Returns every absolute http/https URL reachable from the page
    ///
    /// Relative links are resolved against `base_url`; exact duplicates
    /// collapse.
    fn extract_links(&self, base_url: &str, body: &str) -> BTreeSet<String>;
}

/// [`LinkExtractor`] that reads `<a href>` anchors from HTML
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_links(&self, base_url: &str, body: &str) -> BTreeSet<String> {
        match Url::parse(base_url) {
            Ok(base) => extract_links(body, &base),
            Err(e) => {
                tracing::debug!("Cannot resolve links against {}: {}", base_url, e);
                BTreeSet::new()
            }
        }
    }
}

/// Extracts all crawlable anchor links from an HTML document
///
/// # Link Extraction Rules
///
/// - Only `<a href="...">` anchors are considered
/// - hrefs with an explicit non-http(s) scheme (`mailto:`, `tel:`, `ftp:`,
///   `javascript:` ...) are dropped before resolution
/// - Remaining hrefs are resolved against `base_url` and kept only if the
///   result is http or https
/// - Fragments are kept; the frontier's dedup key ignores them
///
/// # Example
///
/// ```
/// use site_crawler::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about">About</a><a href="mailto:me@example.com">Mail</a>"#;
/// let base = Url::parse("https://example.com/index.html").unwrap();
/// let links = extract_links(html, &base);
/// assert_eq!(links.len(), 1);
/// assert!(links.contains("https://example.com/about"));
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let mut links = BTreeSet::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.insert(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    if !is_crawlable(href, true) {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if is_crawlable(absolute_url.as_str(), false) {
        Some(absolute_url.to_string())
    } else {
        None
    }
}
