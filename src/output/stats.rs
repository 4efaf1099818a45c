//! Crawl statistics
//!
//! Counters are filled in by the coordinator while the crawl runs and
//! printed once it finishes.

use chrono::{DateTime, Utc};

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the seed task was spawned
    pub started_at: DateTime<Utc>,

    /// When the last task finished; `None` while the crawl is running
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages that reached `Extracted`
    pub pages_crawled: u64,

    /// Pages that ended in `FetchFailed`
    pub pages_failed: u64,

    /// Distinct images recorded
    pub images_found: u64,

    /// Page links dropped because they left the seed's domain
    pub off_domain_links: u64,

    /// Page tasks spawned, the seed included
    pub tasks_spawned: u64,
}

impl CrawlStatistics {
    /// Starts a fresh set of counters, stamped now
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_crawled: 0,
            pages_failed: 0,
            images_found: 0,
            off_domain_links: 0,
            tasks_spawned: 0,
        }
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Elapsed wall time in seconds, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Number of lines the sitemap will hold
    pub fn total_links(&self) -> u64 {
        self.pages_crawled + self.images_found
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!(
        "  Started: {}",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(duration) = stats.duration_seconds() {
        println!("  Duration: {:.2}s", duration);
    }
    println!("  Tasks spawned: {}", stats.tasks_spawned);
    println!();

    println!("Results:");
    println!("  Pages crawled: {}", stats.pages_crawled);
    println!("  Pages failed: {}", stats.pages_failed);
    println!("  Images found: {}", stats.images_found);
    println!("  Off-domain links skipped: {}", stats.off_domain_links);
    println!("  Sitemap entries: {}", stats.total_links());
    println!();

    let attempted = stats.pages_crawled + stats.pages_failed;
    let success_rate = if attempted > 0 {
        (stats.pages_crawled as f64 / attempted as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Success Rate: {:.1}% ({} / {} pages successfully crawled)",
        success_rate, stats.pages_crawled, attempted
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_has_zero_counters() {
        let stats = CrawlStatistics::start();

        assert_eq!(stats.pages_crawled, 0);
        assert_eq!(stats.total_links(), 0);
        assert!(stats.finished_at.is_none());
        assert!(stats.duration_seconds().is_none());
    }

    #[test]
    fn test_finish_sets_duration() {
        let mut stats = CrawlStatistics::start();
        stats.finish();

        let duration = stats.duration_seconds().unwrap();
        assert!(duration >= 0.0);
    }

    #[test]
    fn test_total_links() {
        let mut stats = CrawlStatistics::start();
        stats.pages_crawled = 12;
        stats.images_found = 3;
        stats.pages_failed = 4;

        assert_eq!(stats.total_links(), 15);
    }
}
