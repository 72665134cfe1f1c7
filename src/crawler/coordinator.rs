//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop of a single site and the entry point
//! that runs every configured site:
//! - Owning the frontier, visited set and corpus writer of one site
//! - Classifying each dequeued URL as a detail or index page
//! - Coordinating fetching, content extraction, link extraction and saving
//! - Throttling with a fixed delay after every fetch
//! - Running sites one after another or as independent tasks

use crate::config::Config;
use crate::crawler::classifier::PageKind;
use crate::crawler::extractor::extract_content;
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult, Page};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::extract_links;
use crate::crawler::profile::SiteProfile;
use crate::output::{CorpusWriter, CrawlReport, CrawlStatistics};
use crate::state::PageOutcome;
use crate::{CorpusError, OutputError};
use reqwest::Client;
use std::time::{Duration, Instant};

/// How often (in processed URLs) progress is logged
const PROGRESS_INTERVAL: u64 = 50;

/// Crawler for one site
///
/// Owns all mutable crawl state; two instances never share anything but
/// the HTTP client's connection pool.
pub struct SiteCrawler {
    profile: SiteProfile,
    client: Client,
    frontier: Frontier,
    writer: CorpusWriter,
    stats: CrawlStatistics,
}

impl SiteCrawler {
    /// Creates a crawler whose frontier holds only the profile's seed
    ///
    /// # Arguments
    ///
    /// * `profile` - The resolved site parameters
    /// * `client` - The HTTP client to fetch with
    ///
    /// # Returns
    ///
    /// * `Ok(SiteCrawler)` - Ready to run
    /// * `Err(CorpusError)` - The output directory could not be created
    pub fn new(profile: SiteProfile, client: Client) -> Result<Self, CorpusError> {
        let writer = CorpusWriter::new(&profile.output_dir, profile.output_prefix.clone())?;
        let frontier = Frontier::new(profile.seed.clone());
        let stats = CrawlStatistics::new(profile.name.clone());

        Ok(Self {
            profile,
            client,
            frontier,
            writer,
            stats,
        })
    }

    /// Runs the crawl loop until the frontier is exhausted or the page
    /// budget is reached
    ///
    /// Each iteration:
    /// 1. Takes the next unvisited URL off the frontier
    /// 2. Classifies it from the URL string
    /// 3. Detail page: fetches, extracts and saves the article
    /// 4. Index page: fetches and appends in-scope links to the frontier
    /// 5. Sleeps for the configured delay
    ///
    /// Fetch and parse failures are logged and skipped. A failure to write
    /// an article file aborts the crawl.
    pub async fn run(mut self) -> Result<CrawlReport, CorpusError> {
        tracing::info!(
            "Starting crawl of {} from {} (budget {} pages)",
            self.profile.name,
            self.profile.seed,
            self.profile.max_pages
        );

        let start_time = Instant::now();

        while self.writer.len() < self.profile.max_pages {
            let Some(url) = self.frontier.next_unvisited() else {
                tracing::info!("[{}] Frontier is empty, crawl complete", self.profile.name);
                break;
            };

            tracing::debug!("[{}] Processing URL: {}", self.profile.name, url);

            let outcome = self.process_url(&url).await?;
            self.stats.record(outcome);
            self.stats.urls_processed += 1;

            if self.stats.urls_processed % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "[{}] Progress: {} URLs processed, {} saved, {} queued",
                    self.profile.name,
                    self.stats.urls_processed,
                    self.writer.len(),
                    self.frontier.queued()
                );
            }

            self.pause().await;
        }

        if self.writer.len() >= self.profile.max_pages {
            tracing::info!(
                "[{}] Page budget of {} reached",
                self.profile.name,
                self.profile.max_pages
            );
        }

        self.stats.duplicates_skipped = self.frontier.duplicates_skipped();
        self.stats.elapsed = start_time.elapsed();

        tracing::info!(
            "[{}] Crawl finished: {} articles saved, {} URLs processed in {:?}",
            self.profile.name,
            self.writer.len(),
            self.stats.urls_processed,
            self.stats.elapsed
        );

        Ok(CrawlReport {
            directory: self.writer.directory().to_path_buf(),
            prefix: self.writer.prefix().to_string(),
            stats: self.stats,
            entries: self.writer.into_entries(),
        })
    }

    /// Processes a single URL
    async fn process_url(&mut self, url: &str) -> Result<PageOutcome, CorpusError> {
        match self.profile.detail_rule.classify(url) {
            PageKind::Detail => {
                self.stats.detail_pages += 1;
                self.process_detail(url).await
            }
            PageKind::Index => {
                self.stats.index_pages += 1;
                Ok(self.process_index(url).await)
            }
        }
    }

    /// Fetches an article page and saves its text
    async fn process_detail(&mut self, url: &str) -> Result<PageOutcome, CorpusError> {
        let page = match self.fetch(url).await {
            Ok(page) => page,
            Err(outcome) => return Ok(outcome),
        };

        let html = page.text();
        let content = extract_content(&html, self.profile.content_selector.as_ref());

        if content.is_empty() {
            tracing::debug!("[{}] No paragraph text on {}", self.profile.name, url);
            return Ok(PageOutcome::EmptyContent);
        }

        let title = content.title.clone();
        match self.writer.save(&title, &content.into_text(), url) {
            Ok(entry) => {
                tracing::info!("[{}] Saved {}: {}", self.profile.name, entry.ordinal, url);
                Ok(PageOutcome::Saved)
            }
            Err(OutputError::EmptyText { .. }) => Ok(PageOutcome::EmptyContent),
            Err(e) => {
                tracing::error!("[{}] Failed to save article from {}: {}", self.profile.name, url, e);
                Err(e.into())
            }
        }
    }

    /// Fetches an index page and appends its in-scope links to the frontier
    async fn process_index(&mut self, url: &str) -> PageOutcome {
        let page = match self.fetch(url).await {
            Ok(page) => page,
            Err(outcome) => return outcome,
        };

        let links = extract_links(&page.text(), url, &self.profile.allow);
        tracing::debug!(
            "[{}] {} in-scope links on {}",
            self.profile.name,
            links.len(),
            url
        );

        self.stats.links_discovered += links.len() as u64;
        self.frontier.extend(links);

        PageOutcome::Expanded
    }

    /// Fetches a page, logging and mapping failures to their outcome
    ///
    /// A non-2xx answer is still a page: it is logged and tallied, and its
    /// body is processed like any other.
    async fn fetch(&mut self, url: &str) -> Result<Page, PageOutcome> {
        match fetch_url(&self.client, url, self.profile.fallback_encoding).await {
            FetchResult::Success(page) => {
                if !page.is_success() {
                    tracing::warn!(
                        "[{}] HTTP {} for {}",
                        self.profile.name,
                        page.status_code,
                        url
                    );
                    self.stats.record_status(page.status_code);
                }
                Ok(page)
            }
            FetchResult::NetworkError { error, outcome } => {
                tracing::warn!("[{}] Error fetching {}: {}", self.profile.name, url, error);
                Err(outcome)
            }
        }
    }

    async fn pause(&self) {
        if !self.profile.delay.is_zero() {
            tokio::time::sleep(self.profile.delay).await;
        }
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }
}

/// Options that narrow or reshape a configured crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    /// Only crawl these sites; empty means all configured sites
    pub sites: Vec<String>,

    /// Run sites as parallel tasks, overriding `crawler.parallel-sites`
    pub parallel: bool,
}

/// Runs the crawl of every selected site
///
/// This function orchestrates the entire crawl process:
///
/// 1. Resolve site profiles
/// 2. Build the shared HTTP client
/// 3. Create one independent crawler per site
/// 4. Run them sequentially, or as parallel tasks when requested
/// 5. Return the reports in configuration order
///
/// # Example
///
/// ```no_run
/// use corpus_crawler::config::load_config;
/// use corpus_crawler::crawler::{run_crawl, CrawlOptions};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("crawl.toml"))?;
/// let reports = run_crawl(&config, &CrawlOptions::default()).await?;
/// println!("{} sites crawled", reports.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    options: &CrawlOptions,
) -> Result<Vec<CrawlReport>, CorpusError> {
    let profiles = SiteProfile::resolve_all(config, &options.sites)?;

    let client = build_http_client(
        &config.user_agent,
        Duration::from_secs(config.crawler.request_timeout_seconds),
    )?;

    let crawlers = profiles
        .into_iter()
        .map(|profile| SiteCrawler::new(profile, client.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    if options.parallel || config.crawler.parallel_sites {
        run_parallel(crawlers).await
    } else {
        let mut reports = Vec::with_capacity(crawlers.len());
        for crawler in crawlers {
            reports.push(crawler.run().await?);
        }
        Ok(reports)
    }
}

async fn run_parallel(crawlers: Vec<SiteCrawler>) -> Result<Vec<CrawlReport>, CorpusError> {
    tracing::info!("Running {} site crawls in parallel", crawlers.len());

    let handles: Vec<_> = crawlers
        .into_iter()
        .map(|crawler| {
            let site = crawler.profile().name.clone();
            (site, tokio::spawn(crawler.run()))
        })
        .collect();

    let mut reports = Vec::with_capacity(handles.len());
    let mut pending = handles.into_iter();
    while let Some((site, handle)) = pending.next() {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(CorpusError::Task {
                site,
                message: e.to_string(),
            }),
        };

        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                for (other, handle) in pending {
                    tracing::warn!("Aborting crawl of {} after failure", other);
                    handle.abort();
                }
                return Err(e);
            }
        }
    }

    Ok(reports)
}
