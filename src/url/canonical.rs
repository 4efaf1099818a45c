use crate::{UrlError, UrlResult};
use serde::Deserialize;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::Url;

/// Substrings that mark a link as non-navigable wherever they appear
const EXCLUDED_SCHEME_MARKERS: &[&str] = &["mailto:", "javascript:"];

/// Strategy for turning a relative link into an absolute URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkResolution {
    /// RFC 3986 reference resolution against the page URL
    #[default]
    Reference,

    /// Site root (`scheme://host/`) joined with the link minus its leading slashes
    SiteRoot,
}

/// An absolute http(s) URL in the form used as the deduplication key
///
/// Two raw links that resolve to the same `CanonicalUrl` are the same page
/// or image. The canonical string drops the fragment, and drops the trailing
/// slash of a bare root path so `http://a.com` and `http://a.com/` compare
/// equal.
#[derive(Debug, Clone)]
pub struct CanonicalUrl {
    url: Url,
    key: String,
}

impl CanonicalUrl {
    /// Builds a canonical URL from an already parsed URL
    ///
    /// Fails for anything that is not http(s) or has no host.
    pub fn from_url(mut url: Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }
        if url.host_str().is_none() {
            return Err(UrlError::MissingHost);
        }

        url.set_fragment(None);

        let mut key = url.as_str().to_string();
        if url.path() == "/" && url.query().is_none() && key.ends_with('/') {
            key.pop();
        }

        Ok(Self { url, key })
    }

    /// Parses an absolute URL string into its canonical form
    pub fn parse(raw: &str) -> UrlResult<Self> {
        let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_url(url)
    }

    /// The canonical string
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// The parsed URL (fragment already removed)
    pub fn as_url(&self) -> &Url {
        &self.url
    }

    /// The host component
    pub fn host(&self) -> Option<&str> {
        self.url.host_str()
    }
}

impl PartialEq for CanonicalUrl {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CanonicalUrl {}

impl Hash for CanonicalUrl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl Borrow<str> for CanonicalUrl {
    fn borrow(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Canonicalizes a raw link found on a page, resolving relative links as
/// RFC 3986 references against `base`
///
/// # Rules
///
/// Applied in order:
///
/// 1. `/` and `#` on their own are rejected
/// 2. Links containing `mailto:` or `javascript:` anywhere are rejected
/// 3. Links starting with `http` are taken as absolute
/// 4. Links starting with `www` get an `http://` prefix
/// 5. Anything else is relative to `base`
///
/// A result that is not http(s), or that fails to parse, is rejected.
///
/// # Examples
///
/// ```
/// use ripple_sitemap::url::canonicalize;
/// use url::Url;
///
/// let base = Url::parse("http://golangweekly.com").unwrap();
/// let url = canonicalize("/issues/1", &base).unwrap();
/// assert_eq!(url.as_str(), "http://golangweekly.com/issues/1");
///
/// assert!(canonicalize("mailto:someone@golangweekly.com", &base).is_err());
/// ```
pub fn canonicalize(raw: &str, base: &Url) -> UrlResult<CanonicalUrl> {
    canonicalize_with(raw, base, LinkResolution::Reference)
}

/// Canonicalizes a raw link using the given relative-link strategy
pub fn canonicalize_with(
    raw: &str,
    base: &Url,
    resolution: LinkResolution,
) -> UrlResult<CanonicalUrl> {
    if let Some(reason) = excluded_reason(raw) {
        return Err(UrlError::Excluded(reason.to_string()));
    }

    let url = if raw.starts_with("http") {
        parse_absolute(raw)?
    } else if raw.starts_with("www") {
        parse_absolute(&format!("http://{}", raw))?
    } else {
        match resolution {
            LinkResolution::Reference => base
                .join(raw)
                .map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?,
            LinkResolution::SiteRoot => resolve_from_site_root(raw, base)?,
        }
    };

    CanonicalUrl::from_url(url)
}

/// Returns why a link can never name a new resource, if it can't
fn excluded_reason(raw: &str) -> Option<&'static str> {
    match raw {
        "/" => return Some("bare root path"),
        "#" => return Some("bare fragment"),
        _ => {}
    }

    EXCLUDED_SCHEME_MARKERS
        .iter()
        .find(|marker| raw.contains(*marker))
        .copied()
}

fn parse_absolute(raw: &str) -> UrlResult<Url> {
    Url::parse(raw).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))
}

/// Joins `raw` onto `scheme://host[:port]/` of the base after stripping its
/// leading slashes
fn resolve_from_site_root(raw: &str, base: &Url) -> UrlResult<Url> {
    let host = base.host_str().ok_or(UrlError::MissingHost)?;

    let mut root = format!("{}://{}", base.scheme(), host);
    if let Some(port) = base.port() {
        root.push_str(&format!(":{}", port));
    }
    root.push('/');

    parse_absolute(&format!("{}{}", root, strip_leading_slashes(raw)))
}

/// Strips leading `/` characters but always leaves at least one character
fn strip_leading_slashes(raw: &str) -> &str {
    let mut rest = raw;
    while rest.len() > 1 && rest.starts_with('/') {
        rest = &rest[1..];
    }
    rest
}
