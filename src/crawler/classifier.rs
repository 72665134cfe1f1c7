//! URL-only page classification
//!
//! Article URLs on the crawled news sites carry a publication-date path
//! segment and a long opaque identifier, while listing pages have short,
//! readable paths. The rule is kept as data so it can be retargeted to
//! another site or another year without touching the crawler.

use chrono::Datelike;

/// Kind of page a URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    /// A single article; extracted and saved
    Detail,
    /// A navigation or listing page; only mined for links
    Index,
}

/// Predicate deciding whether a URL is a detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRule {
    /// Substring a detail URL must contain, e.g. "/2025"
    pub year_marker: String,
    /// A detail URL must be strictly longer than this many characters
    pub min_length: usize,
}

impl DetailRule {
    /// Default threshold separating article URLs from listing URLs
    pub const DEFAULT_MIN_LENGTH: usize = 50;

    pub fn new(year_marker: impl Into<String>, min_length: usize) -> Self {
        Self {
            year_marker: year_marker.into(),
            min_length,
        }
    }

    /// Rule targeting the current calendar year (`/{year}`)
    pub fn for_current_year(min_length: usize) -> Self {
        Self::new(format!("/{}", chrono::Local::now().year()), min_length)
    }

    /// Classifies a URL string
    ///
    /// # Examples
    ///
    /// ```
    /// use corpus_crawler::crawler::{DetailRule, PageKind};
    ///
    /// let rule = DetailRule::new("/2025", 50);
    /// assert_eq!(
    ///     rule.classify("https://www.news.cn/20250612/4c1f0e2a9b8d4e7f8a6c5b3d2e1f0a9b/c.html"),
    ///     PageKind::Detail
    /// );
    /// assert_eq!(rule.classify("https://www.news.cn/politics/"), PageKind::Index);
    /// ```
    pub fn classify(&self, url: &str) -> PageKind {
        if url.contains(self.year_marker.as_str()) && url.chars().count() > self.min_length {
            PageKind::Detail
        } else {
            PageKind::Index
        }
    }
}

/// Classifies `url` with the given rule
pub fn classify(rule: &DetailRule, url: &str) -> PageKind {
    rule.classify(url)
}
