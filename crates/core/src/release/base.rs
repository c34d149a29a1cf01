use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use thiserror::Error;
use url::Url;

use super::compose::{reconcile_publish_date, variant_title};
use super::ResultEntry;
use crate::taxonomy::UniversalCategory;

/// Why a variant did not become an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationDrop {
    #[error("variant has neither a download link nor a magnet link")]
    NoDownloadMethod,

    #[error("variant has no publish date")]
    NoPublishDate,

    #[error("variant resolved to no categories")]
    NoCategories,
}

/// Item-level fields shared by every variant of one logical release.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseBase {
    pub title: String,
    pub details_uri: Url,
    pub categories: BTreeSet<UniversalCategory>,
    pub publish_date: Option<DateTime<Utc>>,
    pub poster_uri: Option<Url>,
    pub imdb_id: Option<String>,
    pub description: Option<String>,
    pub download_volume_factor: f64,
    pub upload_volume_factor: f64,
}

impl ReleaseBase {
    pub fn new(title: impl Into<String>, details_uri: Url) -> Self {
        Self {
            title: title.into(),
            details_uri,
            categories: BTreeSet::new(),
            publish_date: None,
            poster_uri: None,
            imdb_id: None,
            description: None,
            download_volume_factor: 1.0,
            upload_volume_factor: 1.0,
        }
    }

    /// Build the entry for one variant, copying the item fields and
    /// overriding whatever the variant carries.
    pub fn variant(&self, variant: Variant) -> Result<ResultEntry, ValidationDrop> {
        let guid = variant
            .download_uri
            .clone()
            .or_else(|| variant.magnet_uri.clone())
            .ok_or(ValidationDrop::NoDownloadMethod)?;

        let publish_date = reconcile_publish_date(self.publish_date, variant.updated_at)
            .ok_or(ValidationDrop::NoPublishDate)?;

        let categories = variant
            .categories
            .unwrap_or_else(|| self.categories.clone());
        if categories.is_empty() {
            return Err(ValidationDrop::NoCategories);
        }

        Ok(ResultEntry {
            title: variant_title(&self.title, &variant.tags),
            guid,
            details_uri: variant.details_uri.unwrap_or_else(|| self.details_uri.clone()),
            download_uri: variant.download_uri,
            magnet_uri: variant.magnet_uri,
            size: variant.size,
            seeders: variant.seeders,
            leechers: variant.leechers,
            grabs: variant.grabs,
            files: variant.files,
            publish_date,
            categories,
            download_volume_factor: variant
                .download_volume_factor
                .unwrap_or(self.download_volume_factor),
            upload_volume_factor: variant
                .upload_volume_factor
                .unwrap_or(self.upload_volume_factor),
            minimum_seed_ratio: None,
            minimum_seed_time_seconds: None,
            poster_uri: self.poster_uri.clone(),
            imdb_id: self.imdb_id.clone(),
            description: self.description.clone(),
        })
    }
}

/// Per-variant fields. Unset overrides inherit from the [`ReleaseBase`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variant {
    /// Quality or format tags appended to the title.
    pub tags: Vec<String>,
    pub details_uri: Option<Url>,
    pub download_uri: Option<Url>,
    pub magnet_uri: Option<Url>,
    pub size: u64,
    pub seeders: u32,
    pub leechers: u32,
    pub grabs: u32,
    pub files: Option<u32>,
    pub updated_at: Option<DateTime<Utc>>,
    pub categories: Option<BTreeSet<UniversalCategory>>,
    pub download_volume_factor: Option<f64>,
    pub upload_volume_factor: Option<f64>,
}

/// Entries produced from one or more records, plus how many variants were
/// dropped along the way.
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub entries: Vec<ResultEntry>,
    pub dropped: usize,
}

impl Expansion {
    pub fn push(&mut self, result: Result<ResultEntry, ValidationDrop>) {
        match result {
            Ok(entry) => self.entries.push(entry),
            Err(_) => self.dropped += 1,
        }
    }

    pub fn extend(&mut self, other: Expansion) {
        self.entries.extend(other.entries);
        self.dropped += other.dropped;
    }

    pub fn into_entries(self) -> Vec<ResultEntry> {
        self.entries
    }
}
