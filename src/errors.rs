// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Error Types
 * Failure taxonomy for the reconnaissance pipeline
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use thiserror::Error;

/// Main reconnaissance error type.
///
/// Nothing here is fatal to a run: transport and HTTP failures degrade to
/// empty link lists in the orchestrator, and profile failures become
/// structured `{username, error}` records before they reach a caller.
#[derive(Error, Debug)]
pub enum ReconError {
    /// Transport-level failure: timeout, DNS, connection reset
    #[error("Network error for {url}: {reason}")]
    Network { url: String, reason: String },

    /// Non-2xx HTTP status. A 403 never reaches this variant; it travels
    /// as `FetchOutcome::Forbidden` instead.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Profile collaborator failure, including the rate-limited case
    #[error("Profile lookup failed for {username}: {reason}")]
    Profile { username: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Report generation errors
    #[error("Report error: {0}")]
    Report(String),
}

impl ReconError {
    /// True for the distinguished rate-limit case.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ReconError::Status { status, .. } => *status == 429,
            ReconError::Profile { reason, .. } => reason.contains("429"),
            _ => false,
        }
    }
}

/// Convert reqwest errors to our error types
impl From<reqwest::Error> for ReconError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(|u| u.to_string()).unwrap_or_default();

        if err.is_timeout() {
            ReconError::Network {
                url,
                reason: "connection timeout".to_string(),
            }
        } else if err.is_connect() {
            ReconError::Network {
                url,
                reason: "connection refused".to_string(),
            }
        } else if let Some(status) = err.status() {
            ReconError::Status {
                status: status.as_u16(),
                url,
            }
        } else {
            ReconError::Network {
                url,
                reason: err.to_string(),
            }
        }
    }
}

impl From<csv::Error> for ReconError {
    fn from(err: csv::Error) -> Self {
        ReconError::Report(err.to_string())
    }
}

/// Result type for reconnaissance operations
pub type ReconResult<T> = Result<T, ReconError>;
