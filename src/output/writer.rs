//! Sitemap file writer
//!
//! The sitemap is a plain text file, one canonical URL per line, pages
//! first and then images. It is named after the seed's host.

use crate::config::OutputConfig;
use crate::crawler::Sitemap;
use crate::output::{OutputError, OutputResult};
use crate::url::CanonicalUrl;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use url::{Host, Url};

/// Derives the sitemap file's base name from a URL's host
///
/// | Host | Label |
/// |------|-------|
/// | `golangweekly.com` | `golangweekly` |
/// | `blog.rust-lang.org` | `rust-lang` |
/// | `localhost` | `localhost` |
/// | `127.0.0.1` | `127-0-0-1` |
/// | `[::1]` | `--1` |
pub fn sitemap_label(url: &Url) -> OutputResult<String> {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let labels: Vec<&str> = domain
                .trim_end_matches('.')
                .split('.')
                .filter(|label| !label.is_empty())
                .collect();

            match labels.len() {
                0 => Err(OutputError::InvalidLabel(domain.to_string())),
                1 => Ok(labels[0].to_string()),
                n => Ok(labels[n - 2].to_string()),
            }
        }
        Some(Host::Ipv4(ip)) => Ok(ip.to_string().replace('.', "-")),
        Some(Host::Ipv6(ip)) => Ok(ip.to_string().replace(':', "-")),
        None => Err(OutputError::InvalidLabel(url.to_string())),
    }
}

/// Full path of the sitemap file for a seed
pub fn sitemap_path(config: &OutputConfig, seed: &CanonicalUrl) -> OutputResult<PathBuf> {
    let label = sitemap_label(seed.as_url())?;
    Ok(PathBuf::from(&config.directory).join(format!("{}.{}", label, config.extension)))
}

/// Writes every sitemap entry as its own line, returning the number written
pub fn write_entries<W: Write>(mut out: W, sitemap: &Sitemap) -> io::Result<usize> {
    let mut written = 0;
    for entry in sitemap.entries() {
        writeln!(out, "{}", entry)?;
        written += 1;
    }
    out.flush()?;
    Ok(written)
}

/// Writes the sitemap under the configured output directory
///
/// The directory is created if it does not exist and an existing file for
/// the same host is overwritten. Returns the path written.
pub fn write_sitemap(sitemap: &Sitemap, config: &OutputConfig) -> OutputResult<PathBuf> {
    let path = sitemap_path(config, &sitemap.seed)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(&path)?;
    let written = write_entries(BufWriter::new(file), sitemap)?;
    tracing::info!("Wrote {} entries to {}", written, path.display());

    Ok(path)
}
