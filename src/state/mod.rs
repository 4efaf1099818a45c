//! State module for tracking crawl progress
//!
//! This module holds the per-crawl state. It is created when a crawl starts
//! and dropped when it ends.
//!
//! # Components
//!
//! - `PageState`: Tracks the state of individual pages (queued, fetching, extracted, ...)
//! - `DiscoveryStore`: The page and image dedup sets
//! - `CompletionTracker`: Outstanding-task count used to detect the end of a crawl

mod discovery;
mod page_state;
mod tracker;

// Re-export main types
pub use discovery::{DiscoverySet, DiscoveryStore};
pub use page_state::PageState;
pub use tracker::CompletionTracker;
