// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Varjo - Evidence Gallery
 * Fetches discovered images and reads their embedded metadata, including
 * GPS coordinates when present
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use exif::{In, Reader, Tag, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::http_client::{FetchOutcome, HttpClient};

/// One degree/minute/second component as an EXIF rational
pub type DmsRational = (u32, u32);

/// Convert a GPS degree/minute/second rational triple plus hemisphere
/// reference letter into signed decimal degrees. `S` and `W` negate.
pub fn dms_to_decimal(dms: [DmsRational; 3], reference: &str) -> f64 {
    let to_f64 = |(num, den): DmsRational| {
        if den == 0 {
            0.0
        } else {
            num as f64 / den as f64
        }
    };

    let [degrees, minutes, seconds] = dms;
    let decimal = to_f64(degrees) + to_f64(minutes) / 60.0 + to_f64(seconds) / 3600.0;

    match reference {
        "S" | "W" => -decimal,
        _ => decimal,
    }
}

/// Read all EXIF tags from raw image bytes into a tag-name → value map.
/// Images without EXIF (or bytes that are not an image at all) yield an
/// empty map.
pub fn extract_exif(bytes: &[u8]) -> BTreeMap<String, String> {
    if bytes.is_empty() {
        return BTreeMap::new();
    }

    let mut cursor = std::io::Cursor::new(bytes);
    let exif = match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif,
        Err(e) => {
            debug!("No EXIF data: {}", e);
            return BTreeMap::new();
        }
    };

    let mut tags = BTreeMap::new();
    for field in exif.fields() {
        tags.insert(
            field.tag.to_string(),
            field.display_value().with_unit(&exif).to_string(),
        );
    }
    tags
}

/// Extract GPS coordinates from raw image bytes as signed decimal
/// (latitude, longitude), when the EXIF GPS block is complete.
pub fn gps_coordinates(bytes: &[u8]) -> Option<(f64, f64)> {
    let mut cursor = std::io::Cursor::new(bytes);
    let exif = Reader::new().read_from_container(&mut cursor).ok()?;

    let latitude = dms_field(&exif, Tag::GPSLatitude)?;
    let latitude_ref = ref_field(&exif, Tag::GPSLatitudeRef)?;
    let longitude = dms_field(&exif, Tag::GPSLongitude)?;
    let longitude_ref = ref_field(&exif, Tag::GPSLongitudeRef)?;

    Some((
        dms_to_decimal(latitude, &latitude_ref),
        dms_to_decimal(longitude, &longitude_ref),
    ))
}

fn dms_field(exif: &exif::Exif, tag: Tag) -> Option<[DmsRational; 3]> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(parts) if parts.len() >= 3 => Some([
            (parts[0].num, parts[0].denom),
            (parts[1].num, parts[1].denom),
            (parts[2].num, parts[2].denom),
        ]),
        _ => None,
    }
}

fn ref_field(exif: &exif::Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Ascii(parts) if !parts.is_empty() => {
            Some(String::from_utf8_lossy(&parts[0]).trim().to_string())
        }
        _ => None,
    }
}

/// Link an operator can open to inspect a coordinate pair.
pub fn maps_url(latitude: f64, longitude: f64) -> String {
    format!("https://maps.google.com/?q={},{}", latitude, longitude)
}

/// Fetches gallery images through the paced HTTP client and saves them to
/// disk on request.
pub struct ImageGallery {
    http: Arc<HttpClient>,
}

impl ImageGallery {
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Fetch one image. A 403 surfaces as `Forbidden` so the caller can
    /// render an access-denied placeholder instead of aborting.
    pub async fn fetch_image(&self, url: &str) -> FetchOutcome {
        self.http.fetch(url).await
    }

    /// Write image bytes under `dir`, named after the URL's last path
    /// segment.
    pub fn save_image(&self, url: &str, bytes: &[u8], dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create download dir {:?}", dir))?;

        let path = dir.join(file_name_for(url));
        std::fs::write(&path, bytes).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(path)
    }
}

fn file_name_for(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.last().map(|s| s.to_string()))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "image".to_string())
}
