//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the crawler's user agent and timeout
//! - GET requests with redirect following
//! - Body decoding with byte-level encoding detection
//! - Error classification
//!
//! No request is ever retried; a failed fetch is reported and the crawl
//! moves on to the next URL.

use crate::config::UserAgentConfig;
use crate::crawler::encoding::{decode_body, detect_encoding};
use crate::state::PageOutcome;
use encoding_rs::Encoding;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum number of redirects followed for a single fetch
const MAX_REDIRECTS: usize = 10;

/// A fetched page: raw body plus the encoding it was detected to use
#[derive(Debug, Clone)]
pub struct Page {
    /// HTTP status code; non-2xx bodies are still parsed
    pub status_code: u16,
    /// Raw response body
    pub body: Vec<u8>,
    /// Encoding detected from the body bytes
    pub encoding: &'static Encoding,
}

impl Page {
    /// Decodes the body into a UTF-8 string
    pub fn text(&self) -> String {
        decode_body(&self.body, self.encoding)
    }

    /// True for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered; any status code
    Success(Page),

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
        /// The outcome this error maps to
        outcome: PageOutcome,
    },
}

/// Formats the client identity string sent with every request
///
/// Format: `Mozilla/5.0 (compatible; Name/Version)` or, with a contact URL,
/// `Mozilla/5.0 (compatible; Name/Version; +ContactURL)`.
///
/// # Example
///
/// ```
/// use corpus_crawler::config::UserAgentConfig;
/// use corpus_crawler::crawler::format_user_agent;
///
/// let ua = format_user_agent(&UserAgentConfig::default());
/// assert_eq!(ua, "Mozilla/5.0 (compatible; AcademicCrawler/1.0)");
/// ```
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    match &config.contact_url {
        Some(contact) => format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            config.crawler_name, config.crawler_version, contact
        ),
        None => format!(
            "Mozilla/5.0 (compatible; {}/{})",
            config.crawler_name, config.crawler_version
        ),
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Whole-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format_user_agent(config))
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, keeping the body as bytes alongside its detected encoding
///
/// Any HTTP status counts as a response: a 404 or 500 page is returned with
/// its body so the caller can still mine it for links or text.
///
/// # Error Mapping
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Timeout | Unreachable |
/// | Connection refused | Unreachable |
/// | Body read failure | Failed |
/// | Anything else | Failed |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `fallback` - Encoding assumed when the bytes give no answer
pub async fn fetch_url(client: &Client, url: &str, fallback: &'static Encoding) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_network_error(&e),
    };

    let status_code = response.status().as_u16();

    match response.bytes().await {
        Ok(bytes) => {
            let body = bytes.to_vec();
            let encoding = detect_encoding(&body, fallback);
            FetchResult::Success(Page {
                status_code,
                body,
                encoding,
            })
        }
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
            outcome: PageOutcome::Failed,
        },
    }
}

fn classify_network_error(e: &reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::NetworkError {
            error: "Request timeout".to_string(),
            outcome: PageOutcome::Unreachable,
        }
    } else if e.is_connect() {
        FetchResult::NetworkError {
            error: format!("Connection failed: {}", e),
            outcome: PageOutcome::Unreachable,
        }
    } else {
        FetchResult::NetworkError {
            error: e.to_string(),
            outcome: PageOutcome::Failed,
        }
    }
}
