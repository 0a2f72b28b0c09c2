// src/config.rs
//! Runtime configuration: compiled defaults, optionally overridden by a TOML
//! file (env-pointed or `config/brainfood.toml`), plus a state-path env
//! override for deployments that keep the store elsewhere.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "BRAINFOOD_CONFIG_PATH";
pub const ENV_STATE_PATH: &str = "BRAINFOOD_STATE_PATH";
const DEFAULT_CONFIG_PATH: &str = "config/brainfood.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Blog listing page; fetching this is fatal when it fails.
    pub index_url: String,
    /// Absolute prefix candidate article links must carry.
    pub article_prefix: String,
    /// Element id marking the start of the quotes section.
    pub anchor_id: String,
    /// JSON store read at start and rewritten at the end of a run.
    pub state_path: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_redirects: usize,
    /// Distinct publication dates kept after a merge.
    pub retention_editions: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            index_url: "https://fs.blog/brain-food/".to_string(),
            article_prefix: "https://fs.blog/brain-food/".to_string(),
            anchor_id: "insights".to_string(),
            state_path: PathBuf::from("quotes.json"),
            user_agent: concat!("brainfood-sync/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            max_redirects: 5,
            retention_editions: 12,
        }
    }
}

/// Load configuration using env var + fallbacks:
/// 1) $BRAINFOOD_CONFIG_PATH (must exist when set)
/// 2) config/brainfood.toml
/// 3) compiled defaults
///
/// `$BRAINFOOD_STATE_PATH` overrides the state path regardless of source.
pub fn load_config() -> Result<SyncConfig> {
    let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if !pb.exists() {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        load_config_from(&pb)?
    } else {
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            load_config_from(&default_p)?
        } else {
            SyncConfig::default()
        }
    };

    if let Ok(p) = std::env::var(ENV_STATE_PATH) {
        cfg.state_path = PathBuf::from(p);
    }
    Ok(cfg)
}

pub fn load_config_from(path: &Path) -> Result<SyncConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
