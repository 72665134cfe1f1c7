/// Checks whether a URL string starts with any of the allowed prefixes
///
/// Matching is a plain string comparison on the serialized URL. No host
/// parsing or case folding happens, so `https://www.news.cn` also admits
/// `https://www.news.cn.example.org/`; configure prefixes with a trailing
/// slash where that matters.
///
/// # Examples
///
/// ```
/// use corpus_crawler::scope::matches_any_prefix;
///
/// let prefixes = vec!["https://www.news.cn".to_string()];
/// assert!(matches_any_prefix(&prefixes, "https://www.news.cn/politics/"));
/// assert!(!matches_any_prefix(&prefixes, "http://www.news.cn/politics/"));
/// assert!(!matches_any_prefix(&prefixes, "https://other-domain.com/2025/x"));
/// ```
pub fn matches_any_prefix(prefixes: &[String], candidate: &str) -> bool {
    prefixes
        .iter()
        .any(|prefix| candidate.starts_with(prefix.as_str()))
}
