//! Output module for writing sitemaps and crawl statistics
//!
//! This module handles:
//! - Naming the sitemap file after the seed's host
//! - Writing the newline-delimited sitemap
//! - Recording and printing crawl statistics

pub mod stats;
mod writer;

pub use stats::{print_statistics, CrawlStatistics};
pub use writer::{sitemap_label, sitemap_path, write_entries, write_sitemap};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot derive a sitemap name from host '{0}'")]
    InvalidLabel(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
