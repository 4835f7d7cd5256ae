// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Dork Catalog and Orchestrator
 * Builds person-target search dork queries and runs them sequentially
 * through the search pipeline
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use tracing::{debug, info};

use crate::search::SearchClient;
use crate::types::{DorkResult, ImageDorkResult, OrchestrationResult, SnifferResult};

/// A named dork query template with one substitution slot for the target.
#[derive(Debug, Clone, Copy)]
pub struct DorkTemplate {
    pub type_name: &'static str,
    pub query_pattern: &'static str,
}

/// Fixed dork catalog. Declaration order is the iteration order, and that
/// order is observable in the orchestration output.
pub const DORK_CATALOG: &[DorkTemplate] = &[
    DorkTemplate {
        type_name: "Fotos e Imagens",
        query_pattern: "\"{target}\" (filetype:jpg OR filetype:png OR filetype:jpeg)",
    },
    DorkTemplate {
        type_name: "Perfis em Redes Sociais",
        query_pattern: "\"{target}\" (site:instagram.com OR site:facebook.com OR site:linkedin.com OR site:twitter.com)",
    },
    DorkTemplate {
        type_name: "Fotos em Redes Sociais",
        query_pattern: "site:instagram.com OR site:pinterest.com \"{target}\" (filetype:jpg OR filetype:png)",
    },
    DorkTemplate {
        type_name: "Mencoes Publicas",
        query_pattern: "\"{target}\" -site:instagram.com -site:facebook.com -site:linkedin.com",
    },
];

/// Dork types whose results may contain direct image links
pub const IMAGE_DORK_TYPES: &[&str] = &["Fotos e Imagens", "Fotos em Redes Sociais"];

/// Recognized image extensions, matched case-insensitively
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

const IMAGE_DORK_PATTERN: &str =
    "\"{target}\" (filetype:jpg OR filetype:png OR intitle:\"index of\" DCIM)";

/// Raw links pulled per image query. Most engine results are pages rather
/// than direct image files, so the query searches wider than the gallery
/// cap and the cap is applied after extension filtering.
const IMAGE_SEARCH_WIDTH: usize = 24;

const SNIFFER_PATTERN: &str =
    "site:instagram.com \"{target}\" intext:\"collab\" OR intext:\"tagged\"";

/// Substitute the target into each selected catalog template, in request
/// order. An empty selection means the whole catalog in declaration order.
/// Requested types absent from the catalog are silently dropped; that is a
/// policy, not an error.
pub fn build_queries(target: &str, selected_types: &[String]) -> Vec<(String, String)> {
    if selected_types.is_empty() {
        return DORK_CATALOG
            .iter()
            .map(|t| (t.type_name.to_string(), substitute(t.query_pattern, target)))
            .collect();
    }

    let mut queries = Vec::new();
    for requested in selected_types {
        match DORK_CATALOG.iter().find(|t| t.type_name == requested) {
            Some(template) => queries.push((
                template.type_name.to_string(),
                substitute(template.query_pattern, target),
            )),
            None => debug!("Skipping unknown dork type: {}", requested),
        }
    }
    queries
}

fn substitute(pattern: &str, target: &str) -> String {
    pattern.replace("{target}", target)
}

/// True when the URL ends in a recognized image extension.
pub fn has_image_extension(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Filter an orchestration result down to direct image URLs.
///
/// Only entries from image-bearing dork types are considered, and within
/// those only URLs with a recognized image extension. Entry order and URL
/// order are preserved.
pub fn filter_images(result: &OrchestrationResult) -> Vec<String> {
    let mut image_urls = Vec::new();
    for entry in &result.dorks {
        if !IMAGE_DORK_TYPES.contains(&entry.dork_type.as_str()) {
            continue;
        }
        for url in &entry.urls {
            if has_image_extension(url) {
                image_urls.push(url.clone());
            }
        }
    }
    image_urls
}

/// Runs dork queries one at a time through the search pipeline.
///
/// Strictly sequential: each query issues its own paced request, so total
/// wall-clock cost grows linearly with the number of selected types. A
/// failed query degrades to an empty link list and the run continues.
pub struct DorkOrchestrator {
    search: SearchClient,
}

impl DorkOrchestrator {
    pub fn new(search: SearchClient) -> Self {
        Self { search }
    }

    /// Run every selected dork type against the target and collect one
    /// `DorkResult` per valid type, in request order.
    pub async fn run(
        &self,
        target: &str,
        selected_types: &[String],
        max_results: usize,
    ) -> OrchestrationResult {
        info!("Running dork orchestration for target: {}", target);

        let mut dorks = Vec::new();
        for (dork_type, query) in build_queries(target, selected_types) {
            let urls = self.search.search(&query, max_results).await;
            info!("{}: {} links", dork_type, urls.len());
            dorks.push(DorkResult {
                dork_type,
                query,
                urls,
            });
        }

        OrchestrationResult {
            target: target.to_string(),
            dorks,
            executed_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Single image-focused dork, results pre-filtered to direct image
    /// links. `max_images` caps the filtered gallery, not the raw search.
    pub async fn image_dork(&self, target: &str, max_images: usize) -> ImageDorkResult {
        let query = substitute(IMAGE_DORK_PATTERN, target);
        let search_width = max_images.max(IMAGE_SEARCH_WIDTH);
        let urls = self
            .search
            .search(&query, search_width)
            .await
            .into_iter()
            .filter(|url| has_image_extension(url))
            .take(max_images)
            .collect();

        ImageDorkResult {
            target: target.to_string(),
            query,
            urls,
        }
    }

    /// Fixed query surfacing public collab/tag mentions of a username.
    pub async fn private_sniffer(&self, username: &str, max_results: usize) -> SnifferResult {
        let query = substitute(SNIFFER_PATTERN, username);
        let urls = self.search.search(&query, max_results).await;

        SnifferResult {
            username: username.to_string(),
            query,
            urls,
        }
    }
}
