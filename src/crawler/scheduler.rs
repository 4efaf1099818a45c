//! Scheduler for page tasks
//!
//! This module handles:
//! - Spawning one task per discovered page
//! - Global concurrency limiting via a semaphore
//! - Collecting task reports and counting outstanding tasks

use crate::config::CrawlerConfig;
use crate::crawler::task::{crawl_page, TaskReport};
use crate::state::CompletionTracker;
use crate::url::{CanonicalUrl, LinkResolution};
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Scheduler owns the running page tasks
///
/// Tasks are spawned immediately; each one waits for a permit from the
/// global semaphore before it opens a connection, so at most
/// `max-concurrent-pages-open` fetches are in flight at any time.
pub struct Scheduler {
    /// Running page tasks
    tasks: JoinSet<TaskReport>,

    /// Global semaphore for limiting concurrent fetches
    permits: Arc<Semaphore>,

    /// Shared HTTP client (internally reference counted)
    client: Client,

    resolution: LinkResolution,

    /// Spawned vs. finished task counts
    tracker: CompletionTracker,
}

impl Scheduler {
    /// Creates a new scheduler with no tasks
    pub fn new(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            tasks: JoinSet::new(),
            permits: Arc::new(Semaphore::new(config.max_concurrent_pages_open as usize)),
            client,
            resolution: config.link_resolution,
            tracker: CompletionTracker::new(),
        }
    }

    /// Spawns a crawl task for a page
    ///
    /// The caller must have already won the page's discovery check-and-insert,
    /// so each page is spawned at most once.
    pub fn spawn(&mut self, url: CanonicalUrl) {
        let permits = Arc::clone(&self.permits);
        let client = self.client.clone();
        let resolution = self.resolution;

        self.tracker.task_spawned();
        self.tasks.spawn(async move {
            let _permit = match permits.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::debug!("Scheduler closed before {} was fetched", url);
                    return TaskReport::failed(url);
                }
            };
            crawl_page(&client, url, resolution).await
        });
    }

    /// Waits for the next finished task
    ///
    /// Returns `None` once every spawned task has finished, which is the
    /// crawl's completion signal. A task that panicked is logged and counted
    /// as finished.
    pub async fn next_report(&mut self) -> Option<TaskReport> {
        loop {
            if self.tracker.is_complete() {
                return None;
            }

            match self.tasks.join_next().await? {
                Ok(report) => {
                    debug_assert!(report.state.is_terminal());
                    self.tracker.task_finished();
                    return Some(report);
                }
                Err(e) => {
                    tracing::warn!("Page task did not finish: {}", e);
                    self.tracker.task_finished();
                }
            }
        }
    }

    /// Number of tasks spawned but not yet reported
    pub fn outstanding(&self) -> usize {
        self.tracker.outstanding()
    }

    /// Total number of tasks spawned
    pub fn spawned(&self) -> usize {
        self.tracker.spawned()
    }

    /// Stops handing out permits and aborts every running task
    pub async fn shutdown(&mut self) {
        self.permits.close();
        self.tasks.shutdown().await;
        tracing::debug!(
            "Scheduler shut down with {} task(s) outstanding",
            self.tracker.outstanding()
        );
    }
}
