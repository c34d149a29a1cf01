use std::collections::BTreeSet;
use url::Url;

use crate::events::{report, AdapterEvent, EventSink};
use crate::taxonomy::{CategoryMap, UniversalCategory};

/// What expansion needs besides the record itself.
pub struct ExpandContext<'a> {
    pub adapter_id: &'a str,
    pub categories: &'a CategoryMap,
    pub sink: &'a dyn EventSink,
}

impl<'a> ExpandContext<'a> {
    pub fn new(adapter_id: &'a str, categories: &'a CategoryMap, sink: &'a dyn EventSink) -> Self {
        Self {
            adapter_id,
            categories,
            sink,
        }
    }

    /// Resolve a site category, reporting ids that have no mapping.
    pub fn resolve_category(&self, local_id: &str) -> BTreeSet<UniversalCategory> {
        match self.categories.lookup(local_id) {
            Some(found) => found.clone(),
            None => {
                report(
                    self.sink,
                    AdapterEvent::UnmappedCategory {
                        adapter: self.adapter_id.to_string(),
                        local_id: local_id.trim().to_string(),
                    },
                );
                self.categories.resolve(local_id)
            }
        }
    }

    /// Parse an optional link, reporting values that are not valid URLs.
    pub fn link(&self, field: &str, raw: Option<&str>) -> Option<Url> {
        let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
        match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                self.degraded(field, format!("invalid URL {:?}: {}", raw, e));
                None
            }
        }
    }

    /// Report a field that was present but unusable.
    pub fn degraded(&self, field: &str, reason: impl Into<String>) {
        report(
            self.sink,
            AdapterEvent::DegradedField {
                adapter: self.adapter_id.to_string(),
                field: field.to_string(),
                reason: reason.into(),
            },
        );
    }
}
