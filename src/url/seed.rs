use crate::url::CanonicalUrl;
use crate::{UrlError, UrlResult};
use url::{ParseError, Url};

/// Parses the seed URL given on the command line
///
/// The seed may be absolute or a bare host/path, in which case the scheme
/// defaults to `http`. A seed that can't be turned into an http(s) URL with
/// a host is an error; the crawl never starts.
///
/// # Examples
///
/// ```
/// use ripple_sitemap::url::parse_seed;
///
/// let seed = parse_seed("golangweekly.com/issue1").unwrap();
/// assert_eq!(seed.as_str(), "http://golangweekly.com/issue1");
/// assert_eq!(seed.host(), Some("golangweekly.com"));
/// ```
pub fn parse_seed(raw: &str) -> UrlResult<CanonicalUrl> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Parse("seed URL is empty".to_string()));
    }

    match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            CanonicalUrl::from_url(url)
        }
        // `localhost:8080/x` parses with `localhost` as the scheme
        Ok(url) if looks_like_host_and_port(raw, url.scheme()) => with_default_scheme(raw),
        Ok(url) => Err(UrlError::InvalidScheme(url.scheme().to_string())),
        Err(ParseError::RelativeUrlWithoutBase) => with_default_scheme(raw),
        Err(e) => Err(UrlError::Parse(e.to_string())),
    }
}

fn looks_like_host_and_port(raw: &str, scheme: &str) -> bool {
    !raw.contains("://")
        && raw
            .get(scheme.len() + 1..)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_digit())
}

fn with_default_scheme(raw: &str) -> UrlResult<CanonicalUrl> {
    let url = Url::parse(&format!("http://{}", raw)).map_err(|e| UrlError::Parse(e.to_string()))?;
    CanonicalUrl::from_url(url)
}
