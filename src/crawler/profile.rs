//! Resolved per-site crawl parameters
//!
//! A `SiteProfile` is what one crawler instance runs on: the `[[site]]`
//! entry merged with the shared `[crawler]` and `[output]` settings, with
//! defaults filled in and selectors and encodings already parsed.

use crate::config::{Config, SiteEntry};
use crate::crawler::classifier::DetailRule;
use crate::scope::AllowList;
use crate::ConfigError;
use encoding_rs::{Encoding, UTF_8};
use scraper::Selector;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a single site crawl needs to know
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub name: String,
    pub seed: String,
    pub allow: AllowList,
    pub detail_rule: DetailRule,
    /// Container scanned for paragraphs before falling back to the whole page
    pub content_selector: Option<Selector>,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub fallback_encoding: &'static Encoding,
    pub max_pages: usize,
    pub delay: Duration,
}

impl SiteProfile {
    /// Resolves one site entry against the shared configuration
    pub fn from_config(config: &Config, entry: &SiteEntry) -> Result<Self, ConfigError> {
        let detail_rule = match &entry.year_marker {
            Some(marker) => DetailRule::new(marker.clone(), entry.min_url_length),
            None => DetailRule::for_current_year(entry.min_url_length),
        };

        let content_selector = entry
            .content_selector
            .as_deref()
            .map(|raw| {
                Selector::parse(raw).map_err(|e| ConfigError::InvalidSelector {
                    selector: raw.to_string(),
                    message: format!("{:?}", e),
                })
            })
            .transpose()?;

        let fallback_encoding = match &entry.fallback_encoding {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| ConfigError::UnknownEncoding(label.clone()))?,
            None => UTF_8,
        };

        let delay = Duration::try_from_secs_f64(config.crawler.delay_seconds).map_err(|e| {
            ConfigError::Validation(format!(
                "delay_seconds {} is not a valid duration: {}",
                config.crawler.delay_seconds, e
            ))
        })?;

        let subdir = entry.output_subdir.as_deref().unwrap_or(entry.name.as_str());

        Ok(Self {
            name: entry.name.clone(),
            seed: entry.seed.clone(),
            allow: AllowList::new(entry.allow_prefixes.iter().cloned()),
            detail_rule,
            content_selector,
            output_dir: Path::new(&config.output.directory).join(subdir),
            output_prefix: entry
                .output_prefix
                .clone()
                .unwrap_or_else(|| entry.name.clone()),
            fallback_encoding,
            max_pages: entry.max_pages.unwrap_or(config.crawler.max_pages),
            delay,
        })
    }

    /// Resolves the configured sites, optionally restricted to `only`
    ///
    /// Profiles come back in configuration order. Naming a site that is not
    /// configured is a validation error.
    pub fn resolve_all(config: &Config, only: &[String]) -> Result<Vec<Self>, ConfigError> {
        for name in only {
            if !config.sites.iter().any(|site| &site.name == name) {
                return Err(ConfigError::Validation(format!(
                    "unknown site '{}'",
                    name
                )));
            }
        }

        config
            .sites
            .iter()
            .filter(|site| only.is_empty() || only.contains(&site.name))
            .map(|site| Self::from_config(config, site))
            .collect()
    }
}
