//! Page extractor: turns a tag stream into canonical link and image candidates

use crate::crawler::parser::{tags, tokenize, Tag};
use crate::url::{canonicalize_with, CanonicalUrl, LinkResolution};
use url::Url;

/// What a discovered URL points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkKind {
    /// An `<a href>` target; followed when in-domain
    Page,
    /// An `<img src>` target; recorded, never fetched
    Image,
}

/// A canonicalized URL found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: LinkKind,
    pub url: CanonicalUrl,
}

struct TagRule {
    tag: &'static str,
    attr: &'static str,
    kind: LinkKind,
}

/// Checked in order; the page rule comes first
const TAG_RULES: &[TagRule] = &[
    TagRule {
        tag: "a",
        attr: "href",
        kind: LinkKind::Page,
    },
    TagRule {
        tag: "img",
        attr: "src",
        kind: LinkKind::Image,
    },
];

/// Lazily extracts candidates from a tag sequence
///
/// `<a>` tags with a non-empty `href` become pages and `<img>` tags with a
/// non-empty `src` become images. Every value is canonicalized against
/// `base`; tags without a usable value and rejected links are dropped.
///
/// # Example
///
/// ```
/// use ripple_sitemap::crawler::{extract_candidates, LinkKind, Tag};
/// use ripple_sitemap::url::LinkResolution;
/// use url::Url;
///
/// let base = Url::parse("http://golangweekly.com").unwrap();
/// let tags = vec![
///     Tag::new("a", vec![("href", "/issues/1")]),
///     Tag::new("a", vec![("href", "#")]),
///     Tag::new("img", vec![("src", "logo.png")]),
/// ];
///
/// let found: Vec<_> = extract_candidates(tags, &base, LinkResolution::Reference).collect();
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].kind, LinkKind::Page);
/// assert_eq!(found[1].url.as_str(), "http://golangweekly.com/logo.png");
/// ```
pub fn extract_candidates<'a, I>(
    tags: I,
    base: &'a Url,
    resolution: LinkResolution,
) -> impl Iterator<Item = Candidate> + 'a
where
    I: IntoIterator<Item = Tag<'a>>,
    I::IntoIter: 'a,
{
    tags.into_iter().filter_map(move |tag| {
        let (kind, raw) = raw_candidate(&tag)?;
        match canonicalize_with(raw, base, resolution) {
            Ok(url) => Some(Candidate { kind, url }),
            Err(e) => {
                tracing::trace!("Dropping <{}> link {:?}: {}", tag.name, raw, e);
                None
            }
        }
    })
}

/// Parses a page body and collects its candidates
///
/// Base is the URL the body was served from (after redirects).
pub fn extract_page(body: &str, base: &Url, resolution: LinkResolution) -> Vec<Candidate> {
    let document = tokenize(body);
    extract_candidates(tags(&document), base, resolution).collect()
}

/// Matches a tag against the rules and returns its raw link value
fn raw_candidate<'a>(tag: &Tag<'a>) -> Option<(LinkKind, &'a str)> {
    let rule = TAG_RULES.iter().find(|rule| rule.tag == tag.name)?;

    match tag.attr(rule.attr).map(str::trim) {
        Some(value) if !value.is_empty() => Some((rule.kind, value)),
        _ => {
            tracing::trace!("Skipping <{}> without a usable {}", tag.name, rule.attr);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://golangweekly.com").unwrap()
    }

    fn extract(body: &str) -> Vec<(LinkKind, String)> {
        extract_page(body, &base(), LinkResolution::Reference)
            .into_iter()
            .map(|c| (c.kind, c.url.as_str().to_string()))
            .collect()
    }

    #[test]
    fn test_anchor_is_page_candidate() {
        let found = extract(r#"<a href="http://golangweekly.com/issue1">link</a>"#);
        assert_eq!(
            found,
            vec![(LinkKind::Page, "http://golangweekly.com/issue1".to_string())]
        );
    }

    #[test]
    fn test_img_is_image_candidate() {
        let found = extract(r#"<img src="http://golangweekly.com/something.png">"#);
        assert_eq!(
            found,
            vec![(
                LinkKind::Image,
                "http://golangweekly.com/something.png".to_string()
            )]
        );
    }

    #[test]
    fn test_tags_without_attribute_are_skipped() {
        assert!(extract(r#"<img>image</img>"#).is_empty());
        assert!(extract(r#"<a name="top">anchor</a>"#).is_empty());
        assert!(extract(r#"<a href="">empty</a><img src="  ">"#).is_empty());
    }

    #[test]
    fn test_other_tags_are_ignored() {
        let found = extract(
            r#"<link rel="stylesheet" href="/style.css"><script src="/app.js"></script><br/>"#,
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_rejected_links_are_dropped() {
        let found = extract(
            r##"
            <a href="/">home</a>
            <a href="#">top</a>
            <a href="mailto:jarvisprestidge@gmail.com">mail</a>
            <a href="javascript:void(0)">js</a>
            <a href="/issues">issues</a>
            "##,
        );
        assert_eq!(
            found,
            vec![(LinkKind::Page, "http://golangweekly.com/issues".to_string())]
        );
    }

    #[test]
    fn test_relative_links_resolve_against_page() {
        let page = Url::parse("http://golangweekly.com/issues/12/").unwrap();
        let found = extract_page(
            r#"<a href="../11/">prev</a><img src="cover.png">"#,
            &page,
            LinkResolution::Reference,
        );

        assert_eq!(found[0].url.as_str(), "http://golangweekly.com/issues/11/");
        assert_eq!(
            found[1].url.as_str(),
            "http://golangweekly.com/issues/12/cover.png"
        );
    }

    #[test]
    fn test_off_domain_links_are_still_candidates() {
        // Domain filtering happens in the coordinator, not here
        let found = extract(r#"<a href="http://news.ycombinator.com/news">hn</a>"#);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_extraction_is_lazy() {
        let tags = vec![
            Tag::new("a", vec![("href", "/one")]),
            Tag::new("a", vec![("href", "/two")]),
        ];
        let base = base();
        let mut candidates = extract_candidates(tags, &base, LinkResolution::Reference);

        assert_eq!(
            candidates.next().map(|c| c.url.as_str().to_string()),
            Some("http://golangweekly.com/one".to_string())
        );
        assert!(candidates.next().is_some());
        assert!(candidates.next().is_none());
    }
}
