//! Corpus-Crawler main entry point
//!
//! This is the command-line interface for the news corpus crawler.

use anyhow::Context;
use clap::Parser;
use corpus_crawler::config::{load_config_with_hash, Config};
use corpus_crawler::crawler::{format_user_agent, run_crawl, CrawlOptions, SiteProfile};
use corpus_crawler::output::{generate_markdown_summary, print_statistics};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Corpus-Crawler: builds a plain-text news corpus
///
/// Crawls each configured news site breadth-first, saves every article page
/// as a numbered UTF-8 text file, and reports what was collected.
#[derive(Parser, Debug)]
#[command(name = "corpus-crawler")]
#[command(version = "1.0.0")]
#[command(about = "Builds a plain-text corpus from news sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the resolved sites without crawling
    #[arg(long)]
    dry_run: bool,

    /// Only crawl the named site (repeatable)
    #[arg(long = "site", value_name = "NAME")]
    sites: Vec<String>,

    /// Crawl all selected sites in parallel
    #[arg(long)]
    parallel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).with_context(|| format!("loading {}", cli.config.display()));
        }
    };

    let options = CrawlOptions {
        sites: cli.sites,
        parallel: cli.parallel,
    };

    if cli.dry_run {
        handle_dry_run(&config, &options)?;
    } else {
        handle_crawl(&config, &options, &config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("corpus_crawler=info,warn"),
            1 => EnvFilter::new("corpus_crawler=debug,info"),
            2 => EnvFilter::new("corpus_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config, options: &CrawlOptions) -> anyhow::Result<()> {
    let profiles = SiteProfile::resolve_all(config, &options.sites)?;

    println!("=== Corpus-Crawler Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages per site: {}", config.crawler.max_pages);
    println!("  Delay: {}s", config.crawler.delay_seconds);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_seconds
    );
    println!(
        "  Parallel sites: {}",
        options.parallel || config.crawler.parallel_sites
    );

    println!("\nUser Agent:");
    println!("  {}", format_user_agent(&config.user_agent));

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    if let Some(summary) = &config.output.summary_path {
        println!("  Summary: {}", summary);
    }

    println!("\nSites ({}):", profiles.len());
    for profile in &profiles {
        println!("  - {} <{}>", profile.name, profile.seed);
        println!(
            "    files: {}/{}_N.txt (max {})",
            profile.output_dir.display(),
            profile.output_prefix,
            profile.max_pages
        );
        println!(
            "    detail pages: contain '{}' and longer than {} chars",
            profile.detail_rule.year_marker, profile.detail_rule.min_length
        );
        println!("    fallback encoding: {}", profile.fallback_encoding.name());
        for prefix in profile.allow.prefixes() {
            println!("    * {}", prefix);
        }
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: &Config,
    options: &CrawlOptions,
    config_hash: &str,
) -> anyhow::Result<()> {
    tracing::info!("Configured sites: {}", config.sites.len());

    let reports = match run_crawl(config, options).await {
        Ok(reports) => {
            tracing::info!("Crawl completed successfully");
            reports
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    for report in &reports {
        print_statistics(&report.stats);
        println!();
    }

    if let Some(summary_path) = &config.output.summary_path {
        generate_markdown_summary(&reports, config_hash, Path::new(summary_path))
            .with_context(|| format!("writing summary to {}", summary_path))?;
        println!("✓ Summary written to: {}", summary_path);
    }

    Ok(())
}
