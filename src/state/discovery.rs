//! Deduplication of discovered pages and images

use crate::url::CanonicalUrl;
use std::collections::HashSet;

/// A set of canonical URLs whose insert is the "have I seen this" gate
#[derive(Debug, Default)]
pub struct DiscoverySet {
    seen: HashSet<CanonicalUrl>,
}

impl DiscoverySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the URL, returning true only the first time it is seen
    ///
    /// Membership test and insert are one operation, so a URL can never pass
    /// the gate twice.
    pub fn insert(&mut self, url: &CanonicalUrl) -> bool {
        if self.seen.contains(url.as_str()) {
            return false;
        }
        self.seen.insert(url.clone())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// The two discovery sets of a crawl: pages and images
///
/// Owned by the crawl coordinator, which is the only writer. Fetch tasks
/// report their candidates back instead of touching the sets.
#[derive(Debug, Default)]
pub struct DiscoveryStore {
    pages: DiscoverySet,
    images: DiscoverySet,
}

impl DiscoveryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-insert for a page; true means a fetch task should be spawned
    pub fn insert_page(&mut self, url: &CanonicalUrl) -> bool {
        self.pages.insert(url)
    }

    /// Check-and-insert for an image; true means it should be recorded
    pub fn insert_image(&mut self, url: &CanonicalUrl) -> bool {
        self.images.insert(url)
    }

    pub fn pages(&self) -> &DiscoverySet {
        &self.pages
    }

    pub fn images(&self) -> &DiscoverySet {
        &self.images
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(raw: &str) -> CanonicalUrl {
        CanonicalUrl::parse(raw).unwrap()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = DiscoverySet::new();
        assert!(set.insert(&canonical("http://a.com/x")));
        assert!(!set.insert(&canonical("http://a.com/x")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_equivalent_raw_forms_dedup() {
        let mut set = DiscoverySet::new();
        assert!(set.insert(&canonical("http://a.com")));
        assert!(!set.insert(&canonical("http://a.com/")));
        assert!(!set.insert(&canonical("http://A.COM/#top")));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_pages_and_images_are_separate() {
        let mut store = DiscoveryStore::new();
        let url = canonical("http://a.com/logo.png");

        assert!(store.insert_page(&url));
        assert!(store.insert_image(&url));
        assert!(!store.insert_image(&url));

        assert_eq!(store.pages().len(), 1);
        assert_eq!(store.images().len(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = DiscoveryStore::new();
        assert!(store.pages().is_empty());
        assert!(store.images().is_empty());
    }
}
