use serde::Deserialize;

/// Main configuration structure for Corpus-Crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default, rename = "site")]
    pub sites: Vec<SiteEntry>,
}

/// Crawler behavior configuration shared by every site
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of articles to save per site before stopping
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Pause after every fetch, in (fractional) seconds
    #[serde(rename = "delay-seconds")]
    pub delay_seconds: f64,

    /// Whole-request timeout in seconds
    #[serde(rename = "request-timeout-seconds", default = "default_timeout")]
    pub request_timeout_seconds: u64,

    /// Run every site as its own task instead of one after another
    #[serde(rename = "parallel-sites", default)]
    pub parallel_sites: bool,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "AcademicCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: None,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root directory; each site writes into its own subdirectory
    pub directory: String,

    /// Where to write the markdown crawl summary, if anywhere
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

/// One news site to crawl
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Short identifier used in logs and on the command line
    pub name: String,

    /// Index page the crawl starts from
    pub seed: String,

    /// Discovered links must start with one of these strings
    #[serde(rename = "allow-prefixes")]
    pub allow_prefixes: Vec<String>,

    /// File name prefix (`{prefix}_{n}.txt`); defaults to the site name
    #[serde(rename = "output-prefix", default)]
    pub output_prefix: Option<String>,

    /// Subdirectory of the output directory; defaults to the site name
    #[serde(rename = "output-subdir", default)]
    pub output_subdir: Option<String>,

    /// Substring an article URL must contain, e.g. "/2025"
    #[serde(rename = "year-marker", default)]
    pub year_marker: Option<String>,

    /// An article URL must be longer than this many characters
    #[serde(rename = "min-url-length", default = "default_min_url_length")]
    pub min_url_length: usize,

    /// CSS selector of the element holding the article paragraphs
    #[serde(rename = "content-selector", default)]
    pub content_selector: Option<String>,

    /// Encoding used when the bytes are neither UTF-8 nor self-declared
    #[serde(rename = "fallback-encoding", default)]
    pub fallback_encoding: Option<String>,

    /// Overrides `crawler.max-pages` for this site
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<usize>,
}

fn default_timeout() -> u64 {
    10
}

fn default_min_url_length() -> usize {
    50
}
