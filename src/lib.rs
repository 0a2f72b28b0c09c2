// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod crawl;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod slugdate;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::{load_config, SyncConfig};
pub use crate::crawl::{run_sync, SyncOutcome};
pub use crate::fetch::{FetchError, HttpFetcher, PageSource};
pub use crate::store::{Quote, StoreState};
