// src/fetch.rs
//! Redirect-following page retrieval.
//!
//! Redirects are resolved by hand (the client is built with
//! `Policy::none()`) so the hop budget and relative `Location` handling stay
//! explicit and testable. A single transport failure propagates to the
//! caller; the orchestrator decides whether it is fatal.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{redirect, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("redirect budget of {budget} hops exhausted fetching {url}")]
    RedirectBudget { url: String, budget: usize },
    #[error("redirect from {url} carried no Location header")]
    MissingLocation { url: String },
    #[error("redirect from {url} targets unresolvable location {location}")]
    BadLocation { url: String, location: String },
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: StatusCode },
    #[error("transport failure fetching {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Seam between the orchestrator and the network; tests substitute a
/// canned-page implementation.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
    max_redirects: usize,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration, max_redirects: usize) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            max_redirects,
        })
    }
}

#[async_trait]
impl PageSource for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let mut current = url.to_string();

        // One initial request plus up to `max_redirects` followed hops.
        for hop in 0..=self.max_redirects {
            let response = self
                .client
                .get(&current)
                .send()
                .await
                .map_err(|source| FetchError::Transport {
                    url: current.clone(),
                    source,
                })?;

            let status = response.status();
            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.to_string())
                    .ok_or_else(|| FetchError::MissingLocation {
                        url: current.clone(),
                    })?;
                let next = resolve_location(&current, &location).ok_or_else(|| {
                    FetchError::BadLocation {
                        url: current.clone(),
                        location: location.clone(),
                    }
                })?;
                debug!(from = %current, to = %next, hop, "following redirect");
                current = next;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::Status {
                    url: current,
                    status,
                });
            }

            return response
                .text()
                .await
                .map_err(|source| FetchError::Transport {
                    url: current.clone(),
                    source,
                });
        }

        Err(FetchError::RedirectBudget {
            url: current,
            budget: self.max_redirects,
        })
    }
}

/// Resolve a possibly-relative `Location` against the URL that issued it.
fn resolve_location(current: &str, location: &str) -> Option<String> {
    let base = Url::parse(current).ok()?;
    Some(base.join(location).ok()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_locations_resolve_against_origin() {
        assert_eq!(
            resolve_location("https://fs.blog/brain-food/", "/brain-food/feb-1-2026/").unwrap(),
            "https://fs.blog/brain-food/feb-1-2026/"
        );
    }

    #[test]
    fn absolute_locations_pass_through() {
        assert_eq!(
            resolve_location("https://fs.blog/a/", "https://example.org/b").unwrap(),
            "https://example.org/b"
        );
    }
}
