// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Report Export
 * Flattens session findings into CSV and JSON reports
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use csv::Writer;
use serde::Serialize;

use crate::errors::{ReconError, ReconResult};
use crate::types::{OrchestrationResult, SnifferResult};

/// In-memory findings of one operator session. Discarded when the process
/// exits; nothing is persisted.
#[derive(Debug, Default, Clone)]
pub struct SessionResults {
    pub dorks: Option<OrchestrationResult>,
    pub sniffer: Option<SnifferResult>,
    pub gallery: Vec<String>,
}

/// Flatten an orchestration result into (type, url) display rows.
pub fn link_table(result: &OrchestrationResult) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    for entry in &result.dorks {
        for url in &entry.urls {
            rows.push((entry.dork_type.clone(), url.clone()));
        }
    }
    rows
}

/// Export session findings as CSV with `tipo`,`url` columns: one row per
/// (source type, url) pair across dork results, sniffer links and the
/// image gallery.
pub fn export_csv(session: &SessionResults) -> ReconResult<String> {
    let mut wtr = Writer::from_writer(vec![]);

    wtr.write_record(["tipo", "url"])?;

    if let Some(dorks) = &session.dorks {
        for (tipo, url) in link_table(dorks) {
            wtr.write_record([&tipo, &url])?;
        }
    }

    if let Some(sniffer) = &session.sniffer {
        for url in &sniffer.urls {
            wtr.write_record(["instagram_collab", url])?;
        }
    }

    for url in &session.gallery {
        wtr.write_record(["image_gallery", url])?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| ReconError::Report(e.to_string()))?;
    String::from_utf8(data).map_err(|e| ReconError::Report(e.to_string()))
}

/// Pretty-printed JSON rendering of any exportable value.
pub fn export_json<T: Serialize>(value: &T) -> ReconResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ReconError::Report(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DorkResult;

    fn sample_orchestration() -> OrchestrationResult {
        OrchestrationResult {
            target: "johndoe".to_string(),
            dorks: vec![
                DorkResult {
                    dork_type: "Credenciais".to_string(),
                    query: "q1".to_string(),
                    urls: vec!["https://a.com".to_string(), "https://b.com".to_string()],
                },
                DorkResult {
                    dork_type: "Mencoes Publicas".to_string(),
                    query: "q2".to_string(),
                    urls: vec!["https://c.com".to_string()],
                },
            ],
            executed_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_link_table_flattens_in_order() {
        let rows = link_table(&sample_orchestration());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ("Credenciais".to_string(), "https://a.com".to_string()));
        assert_eq!(rows[2], ("Mencoes Publicas".to_string(), "https://c.com".to_string()));
    }

    #[test]
    fn test_export_csv_header_and_rows() {
        let session = SessionResults {
            dorks: Some(sample_orchestration()),
            sniffer: Some(SnifferResult {
                username: "johndoe".to_string(),
                query: "q".to_string(),
                urls: vec!["https://ig.com/p/abc".to_string()],
            }),
            gallery: vec!["https://a.com/1.jpg".to_string()],
        };

        let csv = export_csv(&session).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "tipo,url");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "Credenciais,https://a.com");
        assert_eq!(lines[4], "instagram_collab,https://ig.com/p/abc");
        assert_eq!(lines[5], "image_gallery,https://a.com/1.jpg");
    }

    #[test]
    fn test_export_csv_empty_session() {
        let csv = export_csv(&SessionResults::default()).unwrap();
        assert_eq!(csv.trim(), "tipo,url");
    }

    #[test]
    fn test_export_json_round_trips() {
        let json = export_json(&sample_orchestration()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["target"], "johndoe");
        assert_eq!(parsed["dorks"][0]["type"], "Credenciais");
    }
}
