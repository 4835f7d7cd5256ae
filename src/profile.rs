// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Profile Intelligence
 * Public social-profile metadata lookup and follower monitoring
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use std::sync::Arc;
use tracing::{debug, info};

use crate::http_client::HttpClient;
use crate::types::{FollowerDelta, MonitorStatus, ProfileMetadata, ProfileReport};

/// Public web-profile JSON endpoint
const PROFILE_ENDPOINT: &str = "https://i.instagram.com/api/v1/users/web_profile_info/";

/// App id the web client sends; without it the endpoint answers 403
const IG_APP_ID: &str = "936619743392459";

/// Profile metadata client.
///
/// Every failure mode, including the distinguished rate-limit case, is
/// converted into a structured `{username, error}` report; no fault is
/// ever raised to the caller.
pub struct ProfileClient {
    http: Arc<HttpClient>,
    endpoint: String,
}

impl ProfileClient {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            endpoint: PROFILE_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests use a mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Look up public metadata for a username.
    pub async fn get_profile_metadata(&self, username: &str) -> ProfileReport {
        let username = username.trim_start_matches('@');
        info!("Fetching profile metadata for: {}", username);

        let response = match self
            .http
            .request(
                &self.endpoint,
                &[("username", username)],
                &[("x-ig-app-id", IG_APP_ID)],
            )
            .await
        {
            Ok(response) => response,
            Err(e) => return ProfileReport::failed(username, e.to_string()),
        };

        match response.status_code {
            429 => ProfileReport::failed(username, "HTTP 429 Too Many Requests"),
            status if !(200..300).contains(&status) => {
                ProfileReport::failed(username, format!("HTTP {}", status))
            }
            _ => Self::parse_profile(username, &response.body),
        }
    }

    fn parse_profile(username: &str, body: &[u8]) -> ProfileReport {
        let json: serde_json::Value = match serde_json::from_slice(body) {
            Ok(json) => json,
            Err(e) => return ProfileReport::failed(username, format!("malformed response: {}", e)),
        };

        let user = &json["data"]["user"];
        if user.is_null() {
            return ProfileReport::failed(username, "profile not found");
        }

        ProfileReport::Profile(ProfileMetadata {
            username: user["username"].as_str().unwrap_or(username).to_string(),
            bio: user["biography"].as_str().unwrap_or_default().to_string(),
            followers: user["edge_followed_by"]["count"].as_u64().unwrap_or(0),
            following: user["edge_follow"]["count"].as_u64().unwrap_or(0),
            id: user["id"].as_str().unwrap_or_default().to_string(),
            profile_pic_url: user["profile_pic_url_hd"]
                .as_str()
                .or_else(|| user["profile_pic_url"].as_str())
                .unwrap_or_default()
                .to_string(),
            is_private: user["is_private"].as_bool().unwrap_or(false),
        })
    }

    /// Compare the current follower count against a previous reading.
    pub async fn monitor_followers(&self, username: &str, previous: u64) -> FollowerDelta {
        match self.get_profile_metadata(username).await {
            ProfileReport::Profile(profile) => {
                let current = profile.followers;
                debug!(
                    "{}: {} followers (was {})",
                    profile.username, current, previous
                );
                FollowerDelta {
                    username: profile.username,
                    previous_followers: previous,
                    current_followers: Some(current),
                    delta: Some(current as i64 - previous as i64),
                    status: MonitorStatus::Ok,
                    error: None,
                }
            }
            ProfileReport::Failed(failure) => FollowerDelta {
                username: failure.username,
                previous_followers: previous,
                current_followers: None,
                delta: None,
                status: MonitorStatus::Error,
                error: Some(failure.error),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_success() {
        let body = serde_json::json!({
            "data": {
                "user": {
                    "username": "testuser",
                    "biography": "hello",
                    "edge_followed_by": {"count": 100},
                    "edge_follow": {"count": 50},
                    "id": "12345",
                    "profile_pic_url_hd": "https://pic.url",
                    "is_private": false
                }
            }
        });

        let report = ProfileClient::parse_profile("testuser", body.to_string().as_bytes());
        match report {
            ProfileReport::Profile(p) => {
                assert_eq!(p.username, "testuser");
                assert_eq!(p.bio, "hello");
                assert_eq!(p.followers, 100);
                assert_eq!(p.following, 50);
                assert_eq!(p.id, "12345");
                assert!(!p.is_private);
            }
            ProfileReport::Failed(f) => panic!("unexpected failure: {}", f.error),
        }
    }

    #[test]
    fn test_parse_profile_missing_user() {
        let body = br#"{"data": {"user": null}}"#;
        let report = ProfileClient::parse_profile("ghost", body);
        assert_eq!(report.error(), Some("profile not found"));
    }

    #[test]
    fn test_parse_profile_malformed_body() {
        let report = ProfileClient::parse_profile("baduser", b"<html>not json</html>");
        assert_eq!(report.username(), "baduser");
        assert!(report.error().unwrap().contains("malformed response"));
    }
}
