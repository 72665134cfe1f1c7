//! Crawler module for building the news corpus
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with byte-level encoding detection
//! - URL-based detail/index classification
//! - Link extraction and allow-list filtering
//! - Article text extraction
//! - Breadth-first frontier management and overall crawl coordination

mod classifier;
mod coordinator;
mod encoding;
mod extractor;
mod fetcher;
mod frontier;
mod parser;
mod profile;

pub use classifier::{classify, DetailRule, PageKind};
pub use coordinator::{run_crawl, CrawlOptions, SiteCrawler};
pub use encoding::{decode_body, detect_encoding};
pub use extractor::{extract_content, ExtractedContent};
pub use fetcher::{build_http_client, fetch_url, format_user_agent, FetchResult, Page};
pub use frontier::Frontier;
pub use parser::extract_links;
pub use profile::SiteProfile;
