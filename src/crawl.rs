// src/crawl.rs
//! One incremental crawl: index page → candidate links → per-article
//! extraction → merge into the store.
//!
//! The watermark is an explicit value threaded load → filter → merge →
//! persist; nothing here holds ambient mutable state, so the interesting
//! pieces stay independently testable.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::extract::extract_quotes;
use crate::fetch::PageSource;
use crate::slugdate::{edition_label, parse_slug_date};
use crate::store::{self, Quote};

/// Transient per-run article descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCandidate {
    pub url: String,
    pub slug: String,
    pub date: NaiveDate,
}

/// Counters reported after a run, for the summary log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub candidates: usize,
    pub articles_fetched: usize,
    pub quotes_added: usize,
    pub watermark: NaiveDate,
}

/// Pull candidate article links off the index page.
///
/// Links must be absolute under `article_prefix`, with a lowercase
/// letters/digits/hyphens slug and a trailing slash. The index repeats links
/// (cards, nav, pagination), so candidates are a set; index order carries no
/// meaning.
pub fn index_candidates(
    index_body: &str,
    article_prefix: &str,
) -> Result<BTreeSet<(String, String)>> {
    let pattern = format!("{}([a-z0-9-]+)/", regex::escape(article_prefix));
    let re = regex::Regex::new(&pattern).context("building article link pattern")?;

    let mut links = BTreeSet::new();
    for cap in re.captures_iter(index_body) {
        links.insert((cap[0].to_string(), cap[1].to_string()));
    }
    Ok(links)
}

/// Keep candidates strictly newer than the watermark, oldest first.
///
/// Oldest-first matters: if a later fetch fails, the watermark still ends up
/// reflecting true chronological progress.
pub fn newer_candidates(
    links: impl IntoIterator<Item = (String, String)>,
    watermark: NaiveDate,
) -> Vec<ArticleCandidate> {
    let mut out: Vec<ArticleCandidate> = links
        .into_iter()
        .filter_map(|(url, slug)| {
            let date = parse_slug_date(&slug)?;
            (date > watermark).then(|| ArticleCandidate { url, slug, date })
        })
        .collect();
    out.sort_by_key(|c| c.date);
    out
}

/// Run one full sync: load state, crawl what's new, merge, persist.
///
/// Index fetch and store I/O failures propagate (fatal); a single article
/// fetch failure or a page without the section only costs that article.
pub async fn run_sync<S: PageSource + ?Sized>(cfg: &SyncConfig, source: &S) -> Result<SyncOutcome> {
    let state = store::load(&cfg.state_path)?;
    info!(watermark = %state.last_updated, quotes = state.quotes.len(), "loaded quote store");

    let index_body = source
        .fetch_page(&cfg.index_url)
        .await
        .with_context(|| format!("fetching index page {}", cfg.index_url))?;

    let links = index_candidates(&index_body, &cfg.article_prefix)?;
    let candidates = newer_candidates(links, state.last_updated);
    info!(candidates = candidates.len(), "new editions since watermark");

    let mut gathered: Vec<Quote> = Vec::new();
    let mut articles_fetched = 0usize;
    for candidate in &candidates {
        let body = match source.fetch_page(&candidate.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!(url = %candidate.url, error = %e, "article fetch failed, skipping");
                continue;
            }
        };
        articles_fetched += 1;

        let texts = extract_quotes(&body, &cfg.anchor_id);
        if texts.is_empty() {
            debug!(slug = %candidate.slug, "no quotes section on page");
            continue;
        }

        let edition = edition_label(candidate.date);
        debug!(slug = %candidate.slug, quotes = texts.len(), "extracted quotes");
        gathered.extend(texts.into_iter().map(|text| Quote {
            text,
            edition: edition.clone(),
            date: candidate.date,
        }));
    }

    let quotes_added = gathered.len();
    let merged = store::merge(state, gathered, cfg.retention_editions);
    store::save(&cfg.state_path, &merged)?;

    let outcome = SyncOutcome {
        candidates: candidates.len(),
        articles_fetched,
        quotes_added,
        watermark: merged.last_updated,
    };
    info!(
        candidates = outcome.candidates,
        fetched = outcome.articles_fetched,
        added = outcome.quotes_added,
        watermark = %outcome.watermark,
        "sync complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_links_are_deduplicated_and_strict() {
        let prefix = "https://fs.blog/brain-food/";
        let body = concat!(
            "<a href=\"https://fs.blog/brain-food/february-22-2026/\">card</a>",
            "<a href=\"https://fs.blog/brain-food/february-22-2026/\">repeat</a>",
            "<a href=\"https://fs.blog/brain-food/February-22-2026/\">uppercase slug</a>",
            "<a href=\"https://fs.blog/other/march-1-2026/\">wrong prefix</a>",
            "<a href=\"https://fs.blog/brain-food/march-1-2026\">no trailing slash</a>",
        );
        let links = index_candidates(body, prefix).unwrap();
        assert_eq!(
            links.into_iter().collect::<Vec<_>>(),
            vec![(
                "https://fs.blog/brain-food/february-22-2026/".to_string(),
                "february-22-2026".to_string()
            )]
        );
    }

    #[test]
    fn filter_drops_unparseable_and_stale_then_sorts_ascending() {
        let watermark: NaiveDate = "2026-01-15".parse().unwrap();
        let links = vec![
            ("u1".to_string(), "february-1-2026".to_string()),
            ("u2".to_string(), "january-18-2026".to_string()),
            ("u3".to_string(), "january-4-2026".to_string()), // below watermark
            ("u4".to_string(), "about-the-author".to_string()), // no date
        ];
        let got = newer_candidates(links, watermark);
        let slugs: Vec<&str> = got.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, ["january-18-2026", "february-1-2026"]);
    }

    #[test]
    fn watermark_boundary_is_strict() {
        let watermark: NaiveDate = "2026-01-18".parse().unwrap();
        let links = vec![("u".to_string(), "january-18-2026".to_string())];
        assert!(newer_candidates(links, watermark).is_empty());
    }
}
