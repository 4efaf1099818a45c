//! URL handling module for Ripple-Sitemap
//!
//! This module provides link canonicalization against a base URL, seed URL
//! parsing, and the same-domain filter that decides which pages are followed.

mod canonical;
mod domain;
mod seed;

// Re-export main functions
pub use canonical::{canonicalize, canonicalize_with, CanonicalUrl, LinkResolution};
pub use domain::{extract_domain, same_domain};
pub use seed::parse_seed;
