// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Search Result Extraction
 * Scrapes organic result links from the search engine's HTML and unwraps
 * its outbound-link redirector
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::http_client::{FetchOutcome, HttpClient};

/// CSS class marking organic result anchors in DuckDuckGo's HTML endpoint
pub const RESULT_LINK_SELECTOR: &str = "a.result__a";

/// Path marker of the engine's outbound-link redirector
const REDIRECT_PATH_MARKER: &str = "duckduckgo.com/l/";

/// HTML (non-JS) search endpoint
pub const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Recover the true destination from the engine's redirect wrapper.
///
/// Hrefs without the redirector path marker pass through unchanged. For
/// wrapped links the percent-decoded `uddg` query parameter is the real
/// destination; if it is missing or the href does not parse, the href is
/// returned unchanged. Never fails on malformed input, and is idempotent
/// on already-unwrapped URLs.
pub fn unwrap_redirect(href: &str) -> String {
    if !href.contains(REDIRECT_PATH_MARKER) {
        return href.to_string();
    }

    // The engine emits scheme-relative redirect hrefs
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let parsed = match Url::parse(&absolute) {
        Ok(url) => url,
        Err(_) => return href.to_string(),
    };

    for (key, value) in parsed.query_pairs() {
        if key == "uddg" {
            return value.into_owned();
        }
    }

    href.to_string()
}

/// Collect result-anchor hrefs from an HTML document, in document order.
///
/// Anchors without an href are skipped; every collected href is
/// redirect-unwrapped exactly once; collection stops at `max_count`.
pub fn extract_links(html: &str, marker_selector: &str, max_count: usize) -> Vec<String> {
    let selector = match Selector::parse(marker_selector) {
        Ok(selector) => selector,
        Err(_) => {
            warn!("Invalid result marker selector: {}", marker_selector);
            return Vec::new();
        }
    };

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for anchor in document.select(&selector) {
        let href = match anchor.value().attr("href") {
            Some(href) => href,
            None => continue,
        };
        links.push(unwrap_redirect(href));
        if links.len() >= max_count {
            break;
        }
    }

    links
}

/// Search engine client: one paced GET per query, scraped down to a list
/// of destination URLs.
pub struct SearchClient {
    http: Arc<HttpClient>,
    endpoint: String,
}

impl SearchClient {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            endpoint: SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests use a mock server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Run one query and return up to `max_results` unwrapped result URLs.
    ///
    /// Engine-level failures degrade to an empty list so that one failed
    /// query never cancels the queries after it.
    pub async fn search(&self, query: &str, max_results: usize) -> Vec<String> {
        debug!("Searching: {}", query);

        match self
            .http
            .fetch_with_params(&self.endpoint, &[("q", query)])
            .await
        {
            FetchOutcome::Ok(body) => {
                let html = String::from_utf8_lossy(&body);
                let links = extract_links(&html, RESULT_LINK_SELECTOR, max_results);
                debug!("Query returned {} links", links.len());
                links
            }
            FetchOutcome::Forbidden => {
                warn!("Search engine is blocking requests from this host");
                Vec::new()
            }
            FetchOutcome::Error => {
                debug!("Search request failed, treating as zero results");
                Vec::new()
            }
        }
    }
}
