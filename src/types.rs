// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};

/// Links found for a single dork query. Never mutated after the
/// orchestrator builds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DorkResult {
    #[serde(rename = "type")]
    pub dork_type: String,
    pub query: String,
    pub urls: Vec<String>,
}

/// Full output of one orchestration run. Replaced wholesale on each run;
/// there is no incremental update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub target: String,
    pub dorks: Vec<DorkResult>,
    pub executed_at: String,
}

impl OrchestrationResult {
    /// True when every dork degraded to an empty link list, which usually
    /// means the search engine is blocking this host.
    pub fn is_empty(&self) -> bool {
        self.dorks.iter().all(|d| d.urls.is_empty())
    }
}

/// Result of the standalone image dork query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDorkResult {
    pub target: String,
    pub query: String,
    pub urls: Vec<String>,
}

/// Public links surfaced by the private sniffer query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnifferResult {
    pub username: String,
    pub query: String,
    pub urls: Vec<String>,
}

/// Public profile metadata from the social-platform lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMetadata {
    pub username: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub id: String,
    pub profile_pic_url: String,
    pub is_private: bool,
}

/// Structured lookup failure. Upstream faults (including rate limiting)
/// are converted into this shape instead of being raised.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileFailure {
    pub username: String,
    pub error: String,
}

/// Outcome of a profile lookup: metadata on success, a `{username, error}`
/// record on any upstream failure.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProfileReport {
    Profile(ProfileMetadata),
    Failed(ProfileFailure),
}

impl ProfileReport {
    pub fn failed(username: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Failed(ProfileFailure {
            username: username.into(),
            error: error.into(),
        })
    }

    pub fn username(&self) -> &str {
        match self {
            Self::Profile(p) => &p.username,
            Self::Failed(f) => &f.username,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Profile(_) => None,
            Self::Failed(f) => Some(&f.error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorStatus {
    Ok,
    Error,
}

/// Follower count comparison between two points in time.
#[derive(Debug, Clone, Serialize)]
pub struct FollowerDelta {
    pub username: String,
    pub previous_followers: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<i64>,
    pub status: MonitorStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
