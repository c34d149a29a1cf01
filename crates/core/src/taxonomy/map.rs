//! Per-adapter mapping between site category ids and the universal taxonomy.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use super::UniversalCategory;

/// Errors raised while building a category map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryMapError {
    #[error("Category {local_id} is already mapped (as \"{existing_label}\")")]
    DuplicateLocalId {
        local_id: String,
        existing_label: String,
    },

    #[error("Category {local_id} must map to at least one universal category")]
    EmptyMapping { local_id: String },
}

/// One site category and the universal categories it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMapping {
    /// The site's own category id.
    pub local_id: String,
    /// Universal categories this id resolves to (never empty).
    pub universal: BTreeSet<UniversalCategory>,
    /// The site's label for the category.
    pub label: String,
}

/// Ordered, append-only table of [`CategoryMapping`]s.
///
/// Built once when an adapter is constructed and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    mappings: Vec<CategoryMapping>,
    index: HashMap<String, usize>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mapping.
    ///
    /// The first registration of a local id is authoritative: a second one is
    /// rejected rather than overwriting it.
    pub fn add_mapping(
        &mut self,
        local_id: impl Into<String>,
        universal: impl IntoIterator<Item = UniversalCategory>,
        label: impl Into<String>,
    ) -> Result<(), CategoryMapError> {
        let local_id = local_id.into();

        if let Some(&existing) = self.index.get(&local_id) {
            return Err(CategoryMapError::DuplicateLocalId {
                local_id,
                existing_label: self.mappings[existing].label.clone(),
            });
        }

        let universal: BTreeSet<_> = universal.into_iter().collect();
        if universal.is_empty() {
            return Err(CategoryMapError::EmptyMapping { local_id });
        }

        self.index.insert(local_id.clone(), self.mappings.len());
        self.mappings.push(CategoryMapping {
            local_id,
            universal,
            label: label.into(),
        });
        Ok(())
    }

    /// Build a map from `(local_id, category, label)` triples, for sites
    /// whose categories are all 1:1.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, CategoryMapError>
    where
        I: IntoIterator<Item = (S, UniversalCategory, &'static str)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (local_id, category, label) in pairs {
            map.add_mapping(local_id, [category], label)?;
        }
        Ok(map)
    }

    /// The registered categories for `local_id`, if any.
    pub fn lookup(&self, local_id: &str) -> Option<&BTreeSet<UniversalCategory>> {
        self.index
            .get(local_id.trim())
            .map(|&i| &self.mappings[i].universal)
    }

    /// Resolve `local_id`, falling back to [`UniversalCategory::Other`].
    pub fn resolve(&self, local_id: &str) -> BTreeSet<UniversalCategory> {
        self.lookup(local_id)
            .cloned()
            .unwrap_or_else(|| BTreeSet::from([UniversalCategory::Other]))
    }

    /// Local ids matching any of `wanted`, in registration order.
    ///
    /// A mapping matches when one of its categories is wanted, or is a
    /// subcategory of a wanted top-level category.
    pub fn local_ids_for(&self, wanted: &[UniversalCategory]) -> Vec<&str> {
        if wanted.is_empty() {
            return vec![];
        }

        self.mappings
            .iter()
            .filter(|m| {
                m.universal
                    .iter()
                    .any(|c| wanted.iter().any(|w| c.is_within(*w)))
            })
            .map(|m| m.local_id.as_str())
            .collect()
    }

    pub fn mappings(&self) -> &[CategoryMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
