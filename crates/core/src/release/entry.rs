use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use url::Url;

use crate::taxonomy::UniversalCategory;

/// One normalized, downloadable search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultEntry {
    pub title: String,
    /// Stable identifier: the download link, else the magnet link.
    pub guid: Url,
    pub details_uri: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_uri: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnet_uri: Option<Url>,
    /// Size in bytes.
    pub size: u64,
    pub seeders: u32,
    pub leechers: u32,
    /// Completed downloads.
    pub grabs: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<u32>,
    pub publish_date: DateTime<Utc>,
    /// Never empty.
    pub categories: BTreeSet<UniversalCategory>,
    pub download_volume_factor: f64,
    pub upload_volume_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_seed_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_seed_time_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_uri: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResultEntry {
    /// Whether downloading this entry does not count against the ratio.
    pub fn is_freeleech(&self) -> bool {
        self.download_volume_factor == 0.0
    }
}
