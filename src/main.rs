//! Ripple-Sitemap main entry point
//!
//! This is the command-line interface for the Ripple-Sitemap crawler.

use anyhow::Context;
use clap::Parser;
use ripple_sitemap::config::{load_config_with_hash, validate, Config};
use ripple_sitemap::crawler::crawl_with_cancellation;
use ripple_sitemap::output::{print_statistics, write_entries, write_sitemap};
use std::io;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Ripple-Sitemap: a single-domain sitemap crawler
///
/// Starting from a seed URL, Ripple-Sitemap fetches every page of the seed's
/// domain it can reach through links and writes a deduplicated list of the
/// pages and images it found.
#[derive(Parser, Debug)]
#[command(name = "ripple-sitemap")]
#[command(version)]
#[command(about = "A single-domain sitemap crawler", long_about = None)]
struct Cli {
    /// Seed URL, e.g. golangweekly.com or https://blog.rust-lang.org
    #[arg(value_name = "SEED")]
    seed: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the sitemap is written into
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Maximum number of concurrent page fetches
    #[arg(long, value_name = "N")]
    max_concurrent: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the sitemap to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_settings(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(e);
        }
    };

    handle_crawl(&cli, &config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_sitemap=info,warn"),
            1 => EnvFilter::new("ripple_sitemap=debug,info"),
            2 => EnvFilter::new("ripple_sitemap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads the config file if one was given, then applies CLI overrides
fn load_settings(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("reading {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(dir) = &cli.output_dir {
        config.output.directory = dir.clone();
    }
    if let Some(max_concurrent) = cli.max_concurrent {
        config.crawler.max_concurrent_pages_open = max_concurrent;
    }

    validate(&config).context("invalid command line override")?;
    Ok(config)
}

/// Handles the main crawl operation
async fn handle_crawl(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping crawl");
            ctrl_c.cancel();
        }
    });

    let sitemap = match crawl_with_cancellation(&cli.seed, config, cancel).await {
        Ok(sitemap) => sitemap,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    if cli.stdout {
        write_entries(io::stdout().lock(), &sitemap).context("writing sitemap to stdout")?;
    } else {
        let path = write_sitemap(&sitemap, &config.output)?;
        if !cli.quiet {
            print_statistics(&sitemap.statistics);
            println!(
                "\nSuccessfully crawled {} links! Sitemap written to {}",
                sitemap.len(),
                path.display()
            );
        }
    }

    Ok(())
}
