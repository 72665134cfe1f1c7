//! Output module for persisting the corpus and reporting on crawls
//!
//! This module handles:
//! - Writing numbered article files (`{prefix}_{n}.txt`)
//! - Recording per-site crawl statistics
//! - Generating an optional markdown summary of a run

mod corpus;
mod markdown;
pub mod stats;

pub use corpus::{file_name, normalize_whitespace, CorpusEntry, CorpusWriter};
pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CrawlStatistics};

use std::path::PathBuf;

/// Everything one site crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Directory the articles were written to
    pub directory: PathBuf,

    /// File name prefix of the articles
    pub prefix: String,

    /// Counters collected during the crawl
    pub stats: CrawlStatistics,

    /// Saved articles in ordinal order
    pub entries: Vec<CorpusEntry>,
}
