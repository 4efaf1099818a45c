use crate::config::types::Config;
use crate::config::validation::validate;
use crate::{ConfigError, ConfigResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Reads, parses and validates a configuration file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use ripple_sitemap::config::load_config;
///
/// let config = load_config(Path::new("crawl.toml")).unwrap();
/// println!("Max concurrent fetches: {}", config.crawler.max_concurrent_pages_open);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    load_config_with_hash(path).map(|(config, _)| config)
}

/// SHA-256 of the configuration file, hex encoded
///
/// Logged at startup so two sitemaps can be traced back to the same settings.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    fs::read_to_string(path)
        .map(|content| hash_content(&content))
        .map_err(ConfigError::from)
}

/// Loads a configuration together with the hash of the exact text parsed
///
/// The file is read once, so the hash always matches the settings returned.
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, hash_content(&content)))
}

/// Parses and validates TOML configuration text
fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn hash_content(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
