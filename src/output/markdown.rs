//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl:
//! per-site statistics followed by the list of saved articles.

use crate::output::CrawlReport;
use crate::state::PageOutcome;
use crate::OutputResult;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary from crawl reports
///
/// # Arguments
///
/// * `reports` - One report per crawled site
/// * `config_hash` - Hash of the configuration file used
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn generate_markdown_summary(
    reports: &[CrawlReport],
    config_hash: &str,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_summary(reports, config_hash, Local::now());

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats crawl reports as markdown
pub fn format_markdown_summary(
    reports: &[CrawlReport],
    config_hash: &str,
    generated_at: DateTime<Local>,
) -> String {
    let mut md = String::new();

    md.push_str("# Corpus Crawl Summary\n\n");

    md.push_str("## Run Information\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S %z")
    ));
    md.push_str(&format!("- **Config Hash**: {}\n", config_hash));
    md.push_str(&format!("- **Sites**: {}\n", reports.len()));
    md.push_str(&format!(
        "- **Articles Saved**: {}\n\n",
        reports.iter().map(|r| r.entries.len()).sum::<usize>()
    ));

    md.push_str("## Site Statistics\n\n");
    md.push_str("| Site | Processed | Detail | Index | Saved | Empty | Failed | Non-2xx | Duplicates | Seconds |\n");
    md.push_str("|------|-----------|--------|-------|-------|-------|--------|---------|------------|---------|\n");
    for report in reports {
        let stats = &report.stats;
        md.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {:.1} |\n",
            stats.site,
            stats.urls_processed,
            stats.detail_pages,
            stats.index_pages,
            stats.pages_saved(),
            stats.count(PageOutcome::EmptyContent),
            stats.fetch_failures(),
            stats.error_responses(),
            stats.duplicates_skipped,
            stats.elapsed.as_secs_f64()
        ));
    }
    md.push('\n');

    for report in reports {
        md.push_str(&format!("## {}\n\n", report.stats.site));
        md.push_str(&format!(
            "Output directory: `{}`\n\n",
            report.directory.display()
        ));

        if report.entries.is_empty() {
            md.push_str("_No articles saved._\n\n");
            continue;
        }

        md.push_str("| # | Title | URL | File |\n");
        md.push_str("|---|-------|-----|------|\n");
        for entry in &report.entries {
            let file = entry
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                entry.ordinal,
                escape_cell(&entry.title),
                entry.url,
                file
            ));
        }
        md.push('\n');
    }

    md
}

/// Keeps a value from breaking out of its table cell
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
