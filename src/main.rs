//! brainfood-sync — Binary Entrypoint
//! One batch run: crawl new editions, merge into the quote store, exit.
//!
//! Exit status is non-zero only for run-level failures (index fetch, store
//! I/O); per-article failures are logged and skipped inside the crawl.

use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use brainfood_sync::{config, crawl, fetch::HttpFetcher};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("brainfood_sync=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cfg = config::load_config()?;
    let fetcher = HttpFetcher::new(
        &cfg.user_agent,
        Duration::from_secs(cfg.timeout_secs),
        cfg.max_redirects,
    )?;
    crawl::run_sync(&cfg, &fetcher).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env in local/dev; no-op elsewhere.
    let _ = dotenvy::dotenv();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = ?e, "sync run failed");
        std::process::exit(1);
    }
}
