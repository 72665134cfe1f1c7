//! Corpus-Crawler: a polite news corpus builder
//!
//! This crate walks news sites breadth-first, tells article pages apart from
//! index pages by their URL, and writes one numbered UTF-8 text file per
//! article for downstream linguistic statistics.

pub mod config;
pub mod crawler;
pub mod output;
pub mod scope;
pub mod state;

use thiserror::Error;

/// Main error type for Corpus-Crawler operations
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Crawl task for site '{site}' failed: {message}")]
    Task { site: String, message: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("Unknown character encoding: {0}")]
    UnknownEncoding(String),
}

/// Errors raised while persisting the corpus
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Refusing to save an empty article from {url}")]
    EmptyText { url: String },
}

/// Result type alias for Corpus-Crawler operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for corpus output operations
pub type OutputResult<T> = std::result::Result<T, OutputError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{classify, DetailRule, PageKind, SiteCrawler, SiteProfile};
pub use output::{CorpusEntry, CorpusWriter};
pub use scope::AllowList;
pub use state::PageOutcome;
