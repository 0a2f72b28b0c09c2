// src/slugdate.rs
//! Publication dates are encoded in article slugs as `<month>-<day>-<year>`,
//! e.g. `february-22-2026`. This is the only source of dates in the pipeline.

use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Parse a `<month>-<day>-<year>` slug into a calendar date.
///
/// Returns `None` (never panics) when the slug has fewer than three tokens,
/// the year is not exactly 4 digits, the day is not 1-2 digits, the month
/// name is unknown, or the combination is not a real calendar date. Slugs
/// with extra leading words fail the month lookup and are rejected the same
/// way.
pub fn parse_slug_date(slug: &str) -> Option<NaiveDate> {
    let tokens: Vec<&str> = slug.split('-').collect();
    if tokens.len() < 3 {
        return None;
    }

    let year_tok = tokens[tokens.len() - 1];
    let day_tok = tokens[tokens.len() - 2];
    if year_tok.len() != 4 || !year_tok.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if day_tok.is_empty() || day_tok.len() > 2 || !day_tok.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month_name = tokens[..tokens.len() - 2].join("-");
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(&month_name))? as u32
        + 1;

    let year: i32 = year_tok.parse().ok()?;
    let day: u32 = day_tok.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Human-readable edition label for a publication date,
/// e.g. `Brain Food – February 22, 2026`.
pub fn edition_label(date: NaiveDate) -> String {
    format!("Brain Food \u{2013} {}", date.format("%B %-d, %Y"))
}
