//! HTML link extraction for index pages
//!
//! Harvests `<a href>` targets, resolves them against the page URL and keeps
//! only the links the site's allow-list admits.

use crate::scope::AllowList;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts in-scope links from an index page
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, resolved against `page_url`
///   (relative paths, protocol-relative paths, query strings and fragments
///   follow standard URL resolution)
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Non-HTTP(S) URLs after resolution
/// - URLs not starting with one of the allow-list prefixes
///
/// Links are returned in document order with repeats removed, so the
/// frontier grows the same way on every run.
///
/// # Example
///
/// ```
/// use corpus_crawler::crawler::extract_links;
/// use corpus_crawler::scope::AllowList;
///
/// let html = r#"<a href="/world/">World</a><a href="https://other.com/">Other</a>"#;
/// let allow = AllowList::new(["https://www.news.cn"]);
/// let links = extract_links(html, "https://www.news.cn/", &allow);
/// assert_eq!(links, vec!["https://www.news.cn/world/".to_string()]);
/// ```
pub fn extract_links(html: &str, page_url: &str, allow: &AllowList) -> Vec<String> {
    let base_url = match Url::parse(page_url) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Link extraction failed for {}: {}", page_url, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(e) => {
            tracing::warn!("Link extraction failed for {}: {:?}", page_url, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(absolute_url) = resolve_link(href, &base_url) else {
            continue;
        };
        if !allow.admits(&absolute_url) {
            continue;
        }
        if seen.insert(absolute_url.clone()) {
            links.push(absolute_url);
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}
