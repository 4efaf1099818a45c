//! HTML tokenizer glue
//!
//! Turns a page body into a lazy sequence of element tags in document order.
//! Each element of the parsed tree stands for one start tag; end tags, text
//! and comments never show up. Parsing is lenient: malformed markup still
//! produces a tree, so there is no error case.

use scraper::Html;

/// A start tag with its attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// Lowercase tag name
    pub name: &'a str,

    /// Attributes in source order
    pub attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Tag<'a> {
    pub fn new(name: &'a str, attributes: Vec<(&'a str, &'a str)>) -> Self {
        Self { name, attributes }
    }

    /// Returns the value of the first attribute named `key`
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| *value)
    }
}

/// Parses an HTML document
pub fn tokenize(body: &str) -> Html {
    Html::parse_document(body)
}

/// Iterates over the element tags of a parsed document in document order
///
/// # Example
///
/// ```
/// use ripple_sitemap::crawler::{tags, tokenize};
///
/// let document = tokenize(r#"<p><a href="/about">About</a></p>"#);
/// let anchor = tags(&document).find(|tag| tag.name == "a").unwrap();
/// assert_eq!(anchor.attr("href"), Some("/about"));
/// ```
pub fn tags(document: &Html) -> impl Iterator<Item = Tag<'_>> + '_ {
    document
        .root_element()
        .descendants()
        .filter_map(|node| node.value().as_element())
        .map(|element| Tag {
            name: element.name(),
            attributes: element.attrs().collect(),
        })
}
