// src/normalize.rs
//! HTML-fragment-to-plain-text normalization.
//!
//! The quote sections are blog-editorial markup, so this decodes only the
//! entities that actually occur there. Numeric character references and
//! unknown named entities are dropped outright rather than rendered.

use once_cell::sync::OnceCell;
use regex::Regex;

/// Ordered entity table; `&amp;` is decoded first, matching how the source
/// markup escapes already-escaped text.
const ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&nbsp;", " "),
];

/// Normalize one extracted fragment: strip tags, decode the fixed entity
/// table, collapse whitespace, trim.
///
/// Callers pass individual fragments (one `<p>` body at a time), never whole
/// pages, so stray markup elsewhere on the page cannot leak into the output.
pub fn normalize(fragment: &str) -> String {
    // 1) Strip markup tags (non-greedy, across newlines)
    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"(?s)<[^>]*?>").unwrap());
    let mut out = re_tags.replace_all(fragment, "").into_owned();

    // 2) Fixed entity table, in order
    for (entity, plain) in ENTITIES {
        out = out.replace(entity, plain);
    }

    // 3) Numeric character references are dropped, not rendered
    static RE_NUMERIC: OnceCell<Regex> = OnceCell::new();
    let re_numeric = RE_NUMERIC.get_or_init(|| Regex::new(r"&#x?[0-9a-fA-F]+;").unwrap());
    out = re_numeric.replace_all(&out, "").into_owned();

    // 4) Any other named entity is dropped
    static RE_NAMED: OnceCell<Regex> = OnceCell::new();
    let re_named = RE_NAMED.get_or_init(|| Regex::new(r"&[a-zA-Z][a-zA-Z0-9]*;").unwrap());
    out = re_named.replace_all(&out, "").into_owned();

    // 5) Collapse whitespace runs (incl. U+00A0) and trim
    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    let out = re_ws.replace_all(&out, " ");
    out.trim().to_string()
}
