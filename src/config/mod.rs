//! Configuration module for Ripple-Sitemap
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, `Config::default()` is used.
//!
//! # Example
//!
//! ```no_run
//! use ripple_sitemap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Writing sitemaps to: {}", config.output.directory);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
