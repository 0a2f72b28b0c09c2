// tests/section_extract.rs
use brainfood_sync::extract::extract_quotes;

const ANCHOR: &str = "insights";

fn page_with_section(section_html: &str) -> String {
    format!(
        concat!(
            "<html><body>",
            "<h1 class=\"entry-title\">Brain Food</h1>",
            "<p>Welcome back to another edition of the newsletter.</p>",
            "<h2 id=\"{anchor}\">Insights</h2>",
            "{section}",
            "<h2 id=\"tidbit\">Tidbit</h2>",
            "<p>Unrelated closing remarks live down here.</p>",
            "</body></html>",
        ),
        anchor = ANCHOR,
        section = section_html,
    )
}

#[test]
fn three_group_cap_ignores_the_fourth() {
    let body = page_with_section(concat!(
        "<p>First worthwhile thought.</p>",
        "<hr/>",
        "<p>Second worthwhile thought.</p>",
        "<hr class=\"wp-block-separator\">",
        "<p>Third worthwhile thought.</p>",
        "<hr />",
        "<p>Fourth thought that must not appear.</p>",
    ));
    let out = extract_quotes(&body, ANCHOR);
    assert_eq!(
        out,
        vec![
            "First worthwhile thought.",
            "Second worthwhile thought.",
            "Third worthwhile thought.",
        ]
    );
}

#[test]
fn short_fragments_do_not_make_an_item() {
    // A group whose only paragraph normalizes to 4 chars contributes nothing.
    let body = page_with_section(concat!(
        "<p>A real quote with substance.</p>",
        "<hr/>",
        "<p>tiny</p>",
        "<hr/>",
        "<p>Another real quote with substance.</p>",
    ));
    let out = extract_quotes(&body, ANCHOR);
    assert_eq!(
        out,
        vec![
            "A real quote with substance.",
            "Another real quote with substance.",
        ]
    );
}

#[test]
fn group_fragments_join_in_document_order() {
    let body = page_with_section(concat!(
        "<p>\u{201C}Part one of the quote,</p>",
        "<p>and part two of it.\u{201D}</p>",
        "<p>&mdash; Someone Famous</p>",
    ));
    let out = extract_quotes(&body, ANCHOR);
    assert_eq!(
        out,
        vec![
            "\u{201C}Part one of the quote, and part two of it.\u{201D} \u{2014} Someone Famous"
        ]
    );
}

#[test]
fn fragments_are_normalized_individually() {
    // Entity table decoded, inline tags stripped, numeric reference dropped.
    let body = page_with_section(
        "<p>He said &ldquo;keep&nbsp;going&rdquo; &#8230; <em>twice</em>.</p>",
    );
    let out = extract_quotes(&body, ANCHOR);
    assert_eq!(out, vec!["He said \u{201C}keep going\u{201D} twice."]);
}

#[test]
fn absent_anchor_means_no_section() {
    let body = "<html><body><h2 id=\"tidbit\">Tidbit</h2><p>No insights this week.</p></body></html>";
    assert!(extract_quotes(body, ANCHOR).is_empty());
}
