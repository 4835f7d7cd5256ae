// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - HTTP Fetcher
 * Paced outbound requests with rotating User-Agents
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::Client;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use crate::config::ReconConfig;
use crate::errors::ReconError;

/// Used when a caller hands over an empty rotation list
const FALLBACK_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Tri-state result of a single fetch. A 403 from the remote host is a
/// distinct signal (the presentation layer renders it as a "forbidden"
/// placeholder), everything else non-2xx collapses into `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Ok(Vec<u8>),
    Forbidden,
    Error,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchOutcome::Ok(_))
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self {
            FetchOutcome::Ok(bytes) => Some(bytes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// HTTP client for the reconnaissance pipeline.
///
/// Every outbound request sleeps a random duration drawn uniformly from the
/// configured delay range first (human pacing), and carries a User-Agent
/// picked at random from the configured list. Requests are never retried;
/// callers decide what a failure means.
pub struct HttpClient {
    client: Client,
    delay_range: (f64, f64),
    user_agents: Vec<String>,
    rng: Mutex<StdRng>,
}

impl HttpClient {
    pub fn new(config: &ReconConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .tcp_keepalive(Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            client,
            delay_range: (config.delay_min_secs, config.delay_max_secs),
            user_agents: config.user_agents.clone(),
            rng: Mutex::new(rng),
        })
    }

    /// Override the pacing interval (seconds).
    pub fn with_delay_range(mut self, min: f64, max: f64) -> Self {
        self.delay_range = (min, max);
        self
    }

    /// Override the User-Agent rotation list.
    pub fn with_user_agents(mut self, user_agents: Vec<String>) -> Self {
        self.user_agents = user_agents;
        self
    }

    /// Send a GET request and normalize the result into the tri-state
    /// outcome: 2xx is `Ok(body)`, 403 is `Forbidden`, anything else
    /// (including transport failures) is `Error`.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        self.fetch_with_params(url, &[]).await
    }

    /// `fetch` with query parameters appended to the URL.
    pub async fn fetch_with_params(&self, url: &str, params: &[(&str, &str)]) -> FetchOutcome {
        match self.request(url, params, &[]).await {
            Ok(response) if response.status_code == 403 => {
                debug!("Forbidden (403) from {}", url);
                FetchOutcome::Forbidden
            }
            Ok(response) if response.is_success() => FetchOutcome::Ok(response.body),
            Ok(response) => {
                debug!("HTTP {} from {}", response.status_code, url);
                FetchOutcome::Error
            }
            Err(e) => {
                debug!("Request to {} failed: {}", url, e);
                FetchOutcome::Error
            }
        }
    }

    /// Send a paced GET request and return the raw status and body.
    ///
    /// Used where the caller needs to tell statuses apart (the profile
    /// lookup distinguishes 429 from other failures); `fetch` is built on
    /// top of this.
    pub async fn request(
        &self,
        url: &str,
        params: &[(&str, &str)],
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, ReconError> {
        self.pace().await;

        let mut builder = self
            .client
            .get(url)
            .header("User-Agent", self.pick_user_agent())
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header("Accept-Language", "en-US,en;q=0.9");

        if !params.is_empty() {
            builder = builder.query(params);
        }

        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let response = builder.send().await?;
        let status_code = response.status().as_u16();
        let body = response.bytes().await.unwrap_or_default().to_vec();

        Ok(HttpResponse { status_code, body })
    }

    fn pick_user_agent(&self) -> String {
        if self.user_agents.is_empty() {
            return FALLBACK_USER_AGENT.to_string();
        }

        let index = {
            let mut rng = self.rng.lock().unwrap();
            rng.random_range(0..self.user_agents.len())
        };
        self.user_agents[index].clone()
    }

    /// Blocking random delay before each request. The guard is dropped
    /// before the await point so the client stays Send.
    async fn pace(&self) {
        let (min, max) = self.delay_range;
        if max <= 0.0 {
            return;
        }

        let delay = {
            let mut rng = self.rng.lock().unwrap();
            rng.random_range(min..=max)
        };

        debug!("Sleeping {:.2}s before request", delay);
        tokio::time::sleep(Duration::from_secs_f64(delay)).await;
    }
}
