//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator is the single owner of the discovery sets. It seeds the
//! crawl, receives a report from every finished page task, decides which
//! candidates become new tasks or sitemap entries, and detects completion
//! when no task is outstanding.

use crate::config::Config;
use crate::crawler::extractor::{Candidate, LinkKind};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::scheduler::Scheduler;
use crate::crawler::task::TaskReport;
use crate::output::CrawlStatistics;
use crate::state::{DiscoveryStore, PageState};
use crate::url::{same_domain, CanonicalUrl};
use crate::{Result, SitemapError};
use tokio_util::sync::CancellationToken;

/// The result of a finished crawl
#[derive(Debug, Clone)]
pub struct Sitemap {
    /// The canonical seed the crawl started from
    pub seed: CanonicalUrl,

    /// Pages that were fetched and extracted, in completion order
    pub pages: Vec<CanonicalUrl>,

    /// Distinct images referenced by those pages, in discovery order
    pub images: Vec<CanonicalUrl>,

    /// Counters and timestamps gathered during the crawl
    pub statistics: CrawlStatistics,
}

impl Sitemap {
    /// All entries, pages first and then images
    pub fn entries(&self) -> impl Iterator<Item = &CanonicalUrl> {
        self.pages.iter().chain(self.images.iter())
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.pages.len() + self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.images.is_empty()
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    seed: CanonicalUrl,
    store: DiscoveryStore,
    scheduler: Scheduler,
    pages: Vec<CanonicalUrl>,
    images: Vec<CanonicalUrl>,
    stats: CrawlStatistics,
}

impl Coordinator {
    /// Creates a coordinator for one seed
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP client cannot be built.
    pub fn new(seed: CanonicalUrl, config: &Config) -> Result<Self> {
        let client = build_http_client(config)?;
        let scheduler = Scheduler::new(client, &config.crawler);

        Ok(Self {
            seed,
            store: DiscoveryStore::new(),
            scheduler,
            pages: Vec::new(),
            images: Vec::new(),
            stats: CrawlStatistics::start(),
        })
    }

    /// Runs the crawl to completion
    ///
    /// Returns once every spawned task has reported. If `cancel` fires first,
    /// all outstanding tasks are aborted and `SitemapError::Cancelled` is
    /// returned.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<Sitemap> {
        tracing::info!("Starting crawl of {}", self.seed);

        let seed = self.seed.clone();
        self.enqueue_page(seed);

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    tracing::warn!(
                        "Crawl cancelled with {} page(s) outstanding",
                        self.scheduler.outstanding()
                    );
                    self.scheduler.shutdown().await;
                    return Err(SitemapError::Cancelled);
                }

                report = self.scheduler.next_report() => match report {
                    Some(report) => self.handle_report(report),
                    None => break,
                },
            }
        }

        self.stats.tasks_spawned = self.scheduler.spawned() as u64;
        self.stats.images_found = self.store.images().len() as u64;
        self.stats.finish();
        tracing::info!(
            "Crawl completed: {} pages, {} images, {} failed in {:.2}s",
            self.stats.pages_crawled,
            self.stats.images_found,
            self.stats.pages_failed,
            self.stats.duration_seconds().unwrap_or_default()
        );

        Ok(Sitemap {
            seed: self.seed,
            pages: self.pages,
            images: self.images,
            statistics: self.stats,
        })
    }

    /// Applies one finished task's outcome
    fn handle_report(&mut self, report: TaskReport) {
        debug_assert!(PageState::Fetching.can_transition_to(report.state));

        if !report.state.is_success() {
            self.stats.pages_failed += 1;
            return;
        }

        self.stats.pages_crawled += 1;
        self.pages.push(report.url);

        for candidate in report.candidates {
            self.handle_candidate(candidate);
        }

        if self.stats.pages_crawled % 50 == 0 {
            tracing::info!(
                "Progress: {} pages crawled, {} discovered, {} outstanding",
                self.stats.pages_crawled,
                self.store.pages().len(),
                self.scheduler.outstanding()
            );
        }
    }

    fn handle_candidate(&mut self, candidate: Candidate) {
        match candidate.kind {
            LinkKind::Image => {
                if self.store.insert_image(&candidate.url) {
                    self.images.push(candidate.url);
                }
            }
            LinkKind::Page => {
                if !same_domain(&candidate.url, &self.seed) {
                    tracing::trace!("Skipping off-domain link {}", candidate.url);
                    self.stats.off_domain_links += 1;
                    return;
                }
                self.enqueue_page(candidate.url);
            }
        }
    }

    /// Check-and-insert, then spawn; a page already seen is ignored
    fn enqueue_page(&mut self, url: CanonicalUrl) {
        if self.store.insert_page(&url) {
            self.scheduler.spawn(url);
        }
    }
}
