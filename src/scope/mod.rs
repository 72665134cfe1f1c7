//! Link scope handling for Corpus-Crawler
//!
//! Decides which discovered links belong to the site being crawled. A link is
//! in scope when its resolved string form starts with one of the site's
//! allow-list prefixes.

mod matcher;

pub use matcher::matches_any_prefix;

/// The domain-prefix allow-list of one site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    prefixes: Vec<String>,
}

impl AllowList {
    /// Builds an allow-list from prefix strings
    ///
    /// # Examples
    ///
    /// ```
    /// use corpus_crawler::scope::AllowList;
    ///
    /// let allow = AllowList::new(["https://www.news.cn"]);
    /// assert!(allow.admits("https://www.news.cn/20250101/abc/c.html"));
    /// assert!(!allow.admits("https://other-domain.com/2025/x"));
    /// ```
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the URL string is in scope
    pub fn admits(&self, url: &str) -> bool {
        matches_any_prefix(&self.prefixes, url)
    }

    /// The configured prefixes, in configuration order
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}
