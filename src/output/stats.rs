//! Per-site crawl statistics
//!
//! Counters are updated by the crawl loop as URLs are processed and
//! printed once the site is done.

use crate::state::PageOutcome;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Crawl statistics summary for one site
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    /// Site name from the configuration
    pub site: String,

    /// Distinct URLs taken off the frontier and processed
    pub urls_processed: u64,

    /// Queue entries dropped because the URL was already visited
    pub duplicates_skipped: u64,

    /// URLs classified as detail pages
    pub detail_pages: u64,

    /// URLs classified as index pages
    pub index_pages: u64,

    /// In-scope links appended to the frontier
    pub links_discovered: u64,

    /// Count of processed URLs by outcome
    pub outcomes: HashMap<PageOutcome, u64>,

    /// Responses answered with a non-2xx status, by status code
    pub error_statuses: BTreeMap<u16, u64>,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    pub fn new(site: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            ..Self::default()
        }
    }

    /// Records the outcome of one processed URL
    pub fn record(&mut self, outcome: PageOutcome) {
        *self.outcomes.entry(outcome).or_insert(0) += 1;
    }

    /// Records a response whose status was not 2xx
    pub fn record_status(&mut self, status_code: u16) {
        *self.error_statuses.entry(status_code).or_insert(0) += 1;
    }

    /// Responses that came back with a non-2xx status
    pub fn error_responses(&self) -> u64 {
        self.error_statuses.values().sum()
    }

    /// Number of URLs that ended with the given outcome
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Articles written to the corpus
    pub fn pages_saved(&self) -> u64 {
        self.count(PageOutcome::Saved)
    }

    /// Fetches that failed for any reason
    pub fn fetch_failures(&self) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| outcome.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Saved articles per detail page visited, as a percentage
    pub fn yield_rate(&self) -> f64 {
        if self.detail_pages == 0 {
            0.0
        } else {
            (self.pages_saved() as f64 / self.detail_pages as f64) * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics: {} ===\n", stats.site);

    println!("Overview:");
    println!("  URLs processed: {}", stats.urls_processed);
    println!("  Duplicates skipped: {}", stats.duplicates_skipped);
    println!("  Detail pages: {}", stats.detail_pages);
    println!("  Index pages: {}", stats.index_pages);
    println!("  Links discovered: {}", stats.links_discovered);
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    println!("Pages by Outcome:");
    // Sort outcomes by count (descending); ties keep reporting order
    let mut outcome_counts: Vec<_> = PageOutcome::all()
        .into_iter()
        .map(|outcome| (outcome, stats.count(outcome)))
        .filter(|(_, count)| *count > 0)
        .collect();
    outcome_counts.sort_by(|a, b| b.1.cmp(&a.1));

    for (outcome, count) in outcome_counts {
        let percentage = if stats.urls_processed > 0 {
            (count as f64 / stats.urls_processed as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    if !stats.error_statuses.is_empty() {
        println!("Non-2xx Responses:");
        for (status, count) in &stats.error_statuses {
            println!("  HTTP {}: {}", status, count);
        }
        println!();
    }

    println!(
        "Yield: {:.1}% ({} / {} detail pages saved, {} fetch failures)",
        stats.yield_rate(),
        stats.pages_saved(),
        stats.detail_pages,
        stats.fetch_failures()
    );
}
