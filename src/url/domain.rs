use crate::url::CanonicalUrl;
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use ripple_sitemap::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a candidate URL lives on the seed's host
///
/// Hosts are compared for exact equality (no subdomain matching). The scheme
/// is ignored, so an https link on an http seed's host is in-domain. A port
/// only counts when it is written out; default ports are never part of the
/// comparison. A URL without a host is never in-domain.
///
/// # Examples
///
/// ```
/// use ripple_sitemap::url::{same_domain, CanonicalUrl};
///
/// let seed = CanonicalUrl::parse("http://a.com").unwrap();
/// assert!(same_domain(&CanonicalUrl::parse("http://a.com/x").unwrap(), &seed));
/// assert!(same_domain(&CanonicalUrl::parse("https://a.com/y").unwrap(), &seed));
/// assert!(!same_domain(&CanonicalUrl::parse("http://b.com/x").unwrap(), &seed));
/// ```
pub fn same_domain(candidate: &CanonicalUrl, seed: &CanonicalUrl) -> bool {
    let candidate = candidate.as_url();
    let seed = seed.as_url();

    match (extract_domain(candidate), extract_domain(seed)) {
        (Some(a), Some(b)) => a == b && candidate.port() == seed.port(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical(raw: &str) -> CanonicalUrl {
        CanonicalUrl::parse(raw).unwrap()
    }

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_host_is_same_domain() {
        assert!(same_domain(
            &canonical("http://a.com/x"),
            &canonical("http://a.com")
        ));
        assert!(same_domain(
            &canonical("http://golangweekly.com/issues1"),
            &canonical("http://golangweekly.com")
        ));
    }

    #[test]
    fn test_different_host_is_not_same_domain() {
        assert!(!same_domain(
            &canonical("http://b.com/x"),
            &canonical("http://a.com")
        ));
        assert!(!same_domain(
            &canonical("http://news.ycombinator.com/news"),
            &canonical("http://golangweekly.com")
        ));
    }

    #[test]
    fn test_subdomains_are_not_same_domain() {
        assert!(!same_domain(
            &canonical("http://www.a.com/"),
            &canonical("http://a.com")
        ));
        assert!(!same_domain(
            &canonical("http://blog.a.com/"),
            &canonical("http://a.com")
        ));
    }

    #[test]
    fn test_scheme_does_not_matter() {
        assert!(same_domain(
            &canonical("https://a.com/x"),
            &canonical("http://a.com")
        ));
        assert!(same_domain(
            &canonical("http://golangweekly.com/issues/1"),
            &canonical("https://golangweekly.com")
        ));
    }

    #[test]
    fn test_default_ports_are_ignored() {
        assert!(same_domain(
            &canonical("https://a.com/secure"),
            &canonical("https://a.com:443/")
        ));
        assert!(same_domain(
            &canonical("https://a.com/secure"),
            &canonical("http://a.com:80/")
        ));
    }

    #[test]
    fn test_explicit_port_matters() {
        assert!(!same_domain(
            &canonical("http://a.com:8080/"),
            &canonical("http://a.com/")
        ));
        assert!(same_domain(
            &canonical("https://a.com:8080/docs"),
            &canonical("http://a.com:8080")
        ));
    }
}
