use crate::config::types::{Config, CrawlerConfig, OutputConfig, SiteEntry, UserAgentConfig};
use crate::ConfigError;
use encoding_rs::Encoding;
use scraper::Selector;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_sites(&config.sites)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if Duration::try_from_secs_f64(config.delay_seconds).is_err() {
        return Err(ConfigError::Validation(format!(
            "delay_seconds must be a finite value >= 0 that fits a duration, got {}",
            config.delay_seconds
        )));
    }

    if config.request_timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_seconds must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    if let Some(contact_url) = &config.contact_url {
        Url::parse(contact_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if matches!(&config.summary_path, Some(path) if path.is_empty()) {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates site entries
fn validate_sites(sites: &[SiteEntry]) -> Result<(), ConfigError> {
    if sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[site]] must be configured".to_string(),
        ));
    }

    let mut names = HashSet::new();
    for site in sites {
        if !names.insert(site.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site name '{}'",
                site.name
            )));
        }
        validate_site(site)?;
    }

    Ok(())
}

fn validate_site(site: &SiteEntry) -> Result<(), ConfigError> {
    if site.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "site name cannot be empty".to_string(),
        ));
    }

    validate_http_url(&site.seed)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed '{}': {}", site.seed, e)))?;

    if site.allow_prefixes.is_empty() {
        return Err(ConfigError::Validation(format!(
            "site '{}' must allow at least one URL prefix",
            site.name
        )));
    }

    for prefix in &site.allow_prefixes {
        if !(prefix.starts_with("http://") || prefix.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "allow prefix '{}' of site '{}' must start with http:// or https://",
                prefix, site.name
            )));
        }
    }

    for (field, value) in [
        ("output_prefix", &site.output_prefix),
        ("output_subdir", &site.output_subdir),
        ("year_marker", &site.year_marker),
    ] {
        if matches!(value, Some(v) if v.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} of site '{}' cannot be empty when set",
                field, site.name
            )));
        }
    }

    if let Some(prefix) = &site.output_prefix {
        validate_path_segment("output_prefix", prefix)?;
    }

    if let Some(subdir) = &site.output_subdir {
        validate_path_segment("output_subdir", subdir)?;
    }

    if site.max_pages == Some(0) {
        return Err(ConfigError::Validation(format!(
            "max_pages of site '{}' must be >= 1",
            site.name
        )));
    }

    if let Some(selector) = &site.content_selector {
        Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            selector: selector.clone(),
            message: format!("{:?}", e),
        })?;
    }

    if let Some(label) = &site.fallback_encoding {
        if Encoding::for_label(label.as_bytes()).is_none() {
            return Err(ConfigError::UnknownEncoding(label.clone()));
        }
    }

    Ok(())
}

/// Accepts only absolute http(s) URLs
fn validate_http_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

/// Prefixes and subdirectories are joined onto the output directory, so each
/// must stay a single relative path segment
fn validate_path_segment(field: &str, segment: &str) -> Result<(), ConfigError> {
    let escapes = segment.contains('/')
        || segment.contains('\\')
        || segment == "."
        || segment == ".."
        || Path::new(segment).is_absolute();
    if escapes {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must be a single path segment",
            field, segment
        )));
    }
    Ok(())
}
