// src/extract.rs
//! Anchored section extraction over raw page text.
//!
//! This is deliberately an index-based scan, not a DOM parse: find the anchor,
//! find the next section boundary, slice. It tolerates attribute noise on
//! tags (extra attributes, either quote style, self-closing slashes) but
//! assumes paragraph/heading/rule tags are well-formed and non-nested. That
//! fragility is a known trade against the source site's stable markup.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;

/// Hard stop when no closing heading follows the section.
const SECTION_SCAN_CAP: usize = 8000;
/// The section structurally holds at most this many thoughts per edition.
const MAX_ITEMS: usize = 3;
/// Normalized fragments at or below this length are markup noise.
const MIN_FRAGMENT_CHARS: usize = 5;

static RE_HR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<hr\b[^>]*>").unwrap());
static RE_PARA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>").unwrap());
static RE_H2_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</h2\s*>").unwrap());
static RE_H2_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<h2[\s>]").unwrap());

/// Extract up to three quote texts from the anchored section of a page.
///
/// Returns an empty vec when the anchor is absent — that is the normal
/// "this page has no quotes section" signal, not an error.
pub fn extract_quotes(body: &str, anchor_id: &str) -> Vec<String> {
    let Some(section) = isolate_section(body, anchor_id) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for group in RE_HR.split(section) {
        if items.len() == MAX_ITEMS {
            break;
        }
        let fragments: Vec<String> = RE_PARA
            .captures_iter(group)
            .map(|cap| normalize(&cap[1]))
            .filter(|text| text.chars().count() > MIN_FRAGMENT_CHARS)
            .collect();
        if !fragments.is_empty() {
            items.push(fragments.join(" "));
        }
    }
    items
}

/// Slice out the text between the anchor heading and the next `<h2`, or
/// `SECTION_SCAN_CAP` characters past the section start when no further
/// heading exists.
fn isolate_section<'a>(body: &'a str, anchor_id: &str) -> Option<&'a str> {
    let re_anchor = Regex::new(&format!(
        r#"(?i)\bid\s*=\s*["']{}["']"#,
        regex::escape(anchor_id)
    ))
    .ok()?;
    let anchor = re_anchor.find(body)?;

    // The section begins after the closing tag of the heading holding the anchor.
    let close = RE_H2_CLOSE.find(&body[anchor.end()..])?;
    let start = anchor.end() + close.end();
    let after = &body[start..];

    let end = match RE_H2_OPEN.find(after) {
        Some(m) => m.start(),
        None => floor_char_boundary(after, SECTION_SCAN_CAP.min(after.len())),
    };
    Some(&after[..end])
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
