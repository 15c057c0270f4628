//! Filters applied to configuration text before it reaches the page.
//!
//! Free-text fields are embedded as raw HTML, so they go through an
//! [`ammonia`] allow-list that keeps nothing but anchors with web links.
//! Style fields are embedded inside `style="..."` attributes and are reduced
//! to a conservative character set.

use std::collections::{HashMap, HashSet};

use ammonia::{Builder, UrlRelative};

/// Replacement `href` for anchors whose target is not an http(s) URL.
pub const PLACEHOLDER_HREF: &str = "#";

/// Longest style value kept after filtering.
pub const MAX_STYLE_LEN: usize = 100;

/// Strip all markup except `<a href="http(s)://...">`.
///
/// Anchors whose `href` is missing, relative or uses any other scheme keep
/// their text but point at [`PLACEHOLDER_HREF`]. Script and style elements
/// are dropped together with their content.
pub fn sanitize_html(input: &str) -> String {
    let tags: HashSet<&str> = ["a"].into_iter().collect();
    let anchor_attributes: HashSet<&str> = ["href"].into_iter().collect();
    let tag_attributes: HashMap<&str, HashSet<&str>> =
        [("a", anchor_attributes)].into_iter().collect();
    let schemes: HashSet<&str> = ["http", "https"].into_iter().collect();

    let cleaned = Builder::default()
        .tags(tags)
        .tag_attributes(tag_attributes)
        .generic_attributes(HashSet::new())
        .url_schemes(schemes)
        .url_relative(UrlRelative::Deny)
        .link_rel(None)
        .clean(input)
        .to_string();

    // Only `href` can survive on an anchor, so a bare `<a>` is one whose
    // target was rejected. Literal text "<a>" is escaped and never matches.
    cleaned.replace("<a>", &format!("<a href=\"{PLACEHOLDER_HREF}\">"))
}

/// Reduce a value destined for an inline style to a safe character set.
pub fn sanitize_style(input: &str) -> String {
    input
        .chars()
        .filter(|c| is_style_char(*c))
        .take(MAX_STYLE_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_style_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_ascii_whitespace()
        || matches!(c, '#' | '-' | ',' | '.' | '\'' | '"')
}
