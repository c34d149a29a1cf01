//! Site-wide seeding and accounting rules applied after expansion.

use serde::Serialize;

use crate::release::ResultEntry;

/// Fixed per-site values stamped onto every entry.
///
/// Only the fields that are set are written, so applying a policy twice
/// gives the same entries as applying it once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeedPolicy {
    pub minimum_seed_ratio: Option<f64>,
    pub minimum_seed_time_seconds: Option<u64>,
    pub download_volume_factor: Option<f64>,
    pub upload_volume_factor: Option<f64>,
}

impl SeedPolicy {
    /// A policy that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Private-tracker seeding requirements.
    pub fn with_seed_requirements(ratio: f64, seed_time_seconds: u64) -> Self {
        Self {
            minimum_seed_ratio: Some(ratio),
            minimum_seed_time_seconds: Some(seed_time_seconds),
            ..Default::default()
        }
    }

    /// Site-wide freeleech: downloads are free, uploads count fully.
    pub fn freeleech() -> Self {
        Self {
            download_volume_factor: Some(0.0),
            upload_volume_factor: Some(1.0),
            ..Default::default()
        }
    }

    pub fn is_noop(&self) -> bool {
        *self == Self::none()
    }

    pub fn apply(&self, mut entries: Vec<ResultEntry>) -> Vec<ResultEntry> {
        if self.is_noop() {
            return entries;
        }
        for entry in &mut entries {
            self.apply_to(entry);
        }
        entries
    }

    pub fn apply_to(&self, entry: &mut ResultEntry) {
        if let Some(ratio) = self.minimum_seed_ratio {
            entry.minimum_seed_ratio = Some(ratio);
        }
        if let Some(secs) = self.minimum_seed_time_seconds {
            entry.minimum_seed_time_seconds = Some(secs);
        }
        if let Some(factor) = self.download_volume_factor {
            entry.download_volume_factor = factor;
        }
        if let Some(factor) = self.upload_volume_factor {
            entry.upload_volume_factor = factor;
        }
    }
}
