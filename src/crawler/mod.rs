//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - HTML tokenizing and link extraction
//! - Task scheduling under a concurrency ceiling
//! - Overall crawl coordination and completion detection

mod coordinator;
mod extractor;
mod fetcher;
mod parser;
mod scheduler;
mod task;

pub use coordinator::{Coordinator, Sitemap};
pub use extractor::{extract_candidates, extract_page, Candidate, LinkKind};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use parser::{tags, tokenize, Tag};
pub use scheduler::Scheduler;
pub use task::{crawl_page, TaskReport};

use crate::config::Config;
use crate::url::parse_seed;
use crate::{Result, SitemapError};
use tokio_util::sync::CancellationToken;

/// Crawls the domain of `seed` and returns its sitemap
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Parse and canonicalize the seed
/// 2. Build the HTTP client
/// 3. Fetch the seed and every in-domain page reachable from it
/// 4. Collect the extracted pages and their images
///
/// # Errors
///
/// * `SitemapError::InvalidSeed` - the seed is not a usable http(s) URL
/// * `SitemapError::HttpClient` - the HTTP client could not be built
///
/// Fetch failures never surface here; the failed page is left out.
pub async fn crawl(seed: &str, config: &Config) -> Result<Sitemap> {
    crawl_with_cancellation(seed, config, CancellationToken::new()).await
}

/// Like [`crawl`], but stops early with `SitemapError::Cancelled` once
/// `cancel` fires
pub async fn crawl_with_cancellation(
    seed: &str,
    config: &Config,
    cancel: CancellationToken,
) -> Result<Sitemap> {
    let seed_url = parse_seed(seed).map_err(|source| SitemapError::InvalidSeed {
        seed: seed.to_string(),
        source,
    })?;

    Coordinator::new(seed_url, config)?.run(cancel).await
}
