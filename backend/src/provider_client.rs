//! Provider Client
//!
//! Fans a member id out to every configured benefit data provider and
//! collects the responses that could be fetched and decoded.
//!
//! # Failure isolation
//! One bad provider must never fail the request. A provider that times out,
//! answers non-2xx, or returns an undecodable body is logged and skipped;
//! the remaining providers still contribute. Only the caller decides what an
//! empty collection means.
//!
//! # Architecture
//! ```text
//! member_id ─┬─ GET provider A ──ok──┐
//!            ├─ GET provider B ──err─┼──▶ [responses from A, C]
//!            └─ GET provider C ──ok──┘
//! ```

use crate::{
    config::CoalesceConfig,
    error::{CoalesceError, Result},
    types::ProviderResponse,
};
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// HTTP client for the configured benefit data providers
pub struct ProviderClient {
    http: reqwest::Client,
}

impl ProviderClient {
    /// Build a client with the configured connect and per-request timeouts
    ///
    /// The request timeout bounds the whole call, so one hanging provider
    /// cannot stall a fetch indefinitely.
    pub fn new(config: &CoalesceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CoalesceError::Request(format!(
                "Failed to build HTTP client: {}", e
            )))?;

        Ok(Self { http })
    }

    /// Fetch benefit data for a member from every provider
    ///
    /// Providers are queried concurrently, each in its own task; a failing
    /// task never cancels its siblings. Responses are collected in completion
    /// order, which carries no meaning downstream.
    ///
    /// # Returns
    /// The successfully decoded responses. An empty vector is a valid
    /// outcome, not an error at this layer.
    pub async fn fetch_all(&self, member_id: i64, urls: &[String]) -> Vec<ProviderResponse> {
        let mut tasks = JoinSet::new();

        for url in urls {
            let target = format!("{}{}", url, member_id);
            let http = self.http.clone();

            tasks.spawn(async move {
                let result = fetch_one(&http, &target).await;
                (target, result)
            });
        }

        let mut responses = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((target, Ok(data))) => {
                    debug!("Fetched data from {}: {:?}", target, data);
                    responses.push(data);
                }
                Ok((target, Err(e))) => {
                    warn!("Skipping provider {}: {}", target, e);
                }
                Err(e) => {
                    warn!("Provider fetch task failed: {}", e);
                }
            }
        }

        info!(
            "Collected {} of {} provider responses",
            responses.len(),
            urls.len()
        );

        responses
    }
}

/// Fetch and decode a single provider response
async fn fetch_one(http: &reqwest::Client, target: &str) -> Result<ProviderResponse> {
    debug!("Requesting data from: {}", target);

    // Step 1: Issue the GET; transport errors and non-2xx statuses are both
    // request failures
    let response = http
        .get(target)
        .send()
        .await
        .map_err(|e| CoalesceError::Request(format!("{}", e)))?
        .error_for_status()
        .map_err(|e| CoalesceError::Request(format!("{}", e)))?;

    // Step 2: Decode the body; any parse failure counts as a decode failure
    // regardless of the underlying cause
    let data = response
        .json::<ProviderResponse>()
        .await
        .map_err(|e| CoalesceError::Decode(format!("{}", e)))?;

    Ok(data)
}
