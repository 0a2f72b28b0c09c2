// src/store.rs
//! Durable quote store: JSON file on disk, merge with a bounded retention
//! window, watermark recomputation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Watermark used before any edition has been ingested.
pub const DEFAULT_WATERMARK: &str = "1970-01-01";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub edition: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub last_updated: NaiveDate,
    pub quotes: Vec<Quote>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            last_updated: default_watermark(),
            quotes: Vec::new(),
        }
    }
}

pub fn default_watermark() -> NaiveDate {
    // Fixed literal, cannot fail to parse.
    DEFAULT_WATERMARK.parse().expect("default watermark literal")
}

/// Read prior state. A missing file means a first run and yields the default
/// state; a present-but-unreadable file fails loudly so a corrupt store never
/// silently resets the watermark.
pub fn load(path: &Path) -> Result<StoreState> {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)
            .with_context(|| format!("state file {} is corrupt", path.display())),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(StoreState::default()),
        Err(e) => Err(e).with_context(|| format!("reading state file {}", path.display())),
    }
}

/// Persist state as pretty-printed JSON, via a sibling temp file and rename
/// so a failed run never leaves a half-written store behind.
pub fn save(path: &Path, state: &StoreState) -> Result<()> {
    let mut body = serde_json::to_string_pretty(state).context("serializing store state")?;
    body.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);
    fs::write(tmp, &body).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(tmp, path).with_context(|| format!("moving {} into place", path.display()))?;
    Ok(())
}

/// Merge newly scraped quotes into prior state.
///
/// New quotes append after existing ones; same-date ordering is never
/// reshuffled. Retention keeps the `retention` most recent *distinct dates*
/// (an edition with many quotes and one with a single quote each count once).
/// The watermark becomes the maximum date across the combined, pre-trim
/// sequence, or stays at the prior value when no quotes exist at all.
pub fn merge(mut state: StoreState, new_quotes: Vec<Quote>, retention: usize) -> StoreState {
    state.quotes.extend(new_quotes);

    let dates: BTreeSet<NaiveDate> = state.quotes.iter().map(|q| q.date).collect();
    if let Some(&max) = dates.iter().next_back() {
        state.last_updated = max;
    }

    let keep: HashSet<NaiveDate> = dates.iter().rev().take(retention).copied().collect();
    state.quotes.retain(|q| keep.contains(&q.date));
    state
}
