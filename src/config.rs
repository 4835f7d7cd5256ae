// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{ReconError, ReconResult};

/// Realistic browser User-Agents rotated across requests to avoid trivial
/// blocking
const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_6) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReconConfig {
    /// Lower bound of the random pre-request delay, in seconds
    #[validate(range(min = 0.0, max = 120.0))]
    #[serde(default = "default_delay_min")]
    pub delay_min_secs: f64,

    /// Upper bound of the random pre-request delay, in seconds
    #[validate(range(min = 0.0, max = 120.0))]
    #[serde(default = "default_delay_max")]
    pub delay_max_secs: f64,

    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[validate(length(min = 1))]
    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,

    /// Seed for the delay/User-Agent RNG; set for deterministic behavior
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_delay_min() -> f64 {
    3.0
}

fn default_delay_max() -> f64 {
    7.0
}

fn default_timeout() -> u64 {
    15
}

fn default_max_results() -> usize {
    20
}

fn default_user_agents() -> Vec<String> {
    DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect()
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            delay_min_secs: default_delay_min(),
            delay_max_secs: default_delay_max(),
            request_timeout_secs: default_timeout(),
            max_results: default_max_results(),
            user_agents: default_user_agents(),
            rng_seed: None,
        }
    }
}

impl ReconConfig {
    /// Load configuration from VARJO_* environment variables on top of the
    /// defaults, then validate.
    pub fn from_env() -> ReconResult<Self> {
        let mut config = Self::default();

        if let Ok(min) = std::env::var("VARJO_DELAY_MIN") {
            config.delay_min_secs = parse_var("VARJO_DELAY_MIN", &min)?;
        }

        if let Ok(max) = std::env::var("VARJO_DELAY_MAX") {
            config.delay_max_secs = parse_var("VARJO_DELAY_MAX", &max)?;
        }

        if let Ok(timeout) = std::env::var("VARJO_TIMEOUT") {
            config.request_timeout_secs = parse_var("VARJO_TIMEOUT", &timeout)?;
        }

        if let Ok(max_results) = std::env::var("VARJO_MAX_RESULTS") {
            config.max_results = parse_var("VARJO_MAX_RESULTS", &max_results)?;
        }

        if let Ok(agents) = std::env::var("VARJO_USER_AGENTS") {
            config.user_agents = agents
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(seed) = std::env::var("VARJO_RNG_SEED") {
            config.rng_seed = Some(parse_var("VARJO_RNG_SEED", &seed)?);
        }

        config.validated()
    }

    /// Run range/length checks plus cross-field constraints.
    pub fn validated(self) -> ReconResult<Self> {
        self.validate()
            .map_err(|e| ReconError::Configuration(e.to_string()))?;

        if self.delay_min_secs > self.delay_max_secs {
            return Err(ReconError::Configuration(format!(
                "delay_min_secs ({}) exceeds delay_max_secs ({})",
                self.delay_min_secs, self.delay_max_secs
            )));
        }

        Ok(self)
    }

    /// Result cap for one query: an explicit CLI value wins over the
    /// configured one.
    pub fn effective_max_results(&self, cli_override: Option<usize>) -> usize {
        cli_override.unwrap_or(self.max_results)
    }

    /// Config with pacing disabled and a fixed seed, for tests.
    pub fn immediate() -> Self {
        Self {
            delay_min_secs: 0.0,
            delay_max_secs: 0.0,
            rng_seed: Some(0),
            ..Self::default()
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, raw: &str) -> ReconResult<T> {
    raw.parse()
        .map_err(|_| ReconError::Configuration(format!("Invalid {}: {}", name, raw)))
}
