//! The site-independent search query.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::taxonomy::UniversalCategory;

static IMDB_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:tt)?(\d{7,})$").expect("valid IMDB id regex"));

/// Query vocabulary an adapter can declare support for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryField {
    SearchTerm,
    Season,
    Episode,
    ImdbId,
    Categories,
}

/// A search request in universal terms.
///
/// Adapters ignore whatever fields their site cannot express.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniversalQuery {
    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    /// External catalog id, e.g. an IMDB id (`tt0944947`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Restrict results to these categories.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<UniversalCategory>,
}

impl UniversalQuery {
    /// A free-text search.
    pub fn search(term: &str) -> Self {
        Self {
            search_term: Some(term.to_string()),
            ..Default::default()
        }
    }

    pub fn with_season_episode(mut self, season: u32, episode: Option<u32>) -> Self {
        self.season = Some(season);
        self.episode = episode;
        self
    }

    pub fn with_external_id(mut self, id: &str) -> Self {
        self.external_id = Some(id.to_string());
        self
    }

    pub fn with_categories(mut self, categories: Vec<UniversalCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Whether no field is set. The empty query asks a site for its latest
    /// releases.
    pub fn is_empty(&self) -> bool {
        self.term().is_none()
            && self.season.is_none()
            && self.episode.is_none()
            && self.external_id.is_none()
            && self.categories.is_empty()
    }

    /// The trimmed search term, `None` when absent or blank.
    pub fn term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Episode designator such as `S01E05`, or `S01` for a whole season.
    pub fn episode_string(&self) -> Option<String> {
        self.season.map(|s| match self.episode {
            Some(e) => format!("S{:02}E{:02}", s, e),
            None => format!("S{:02}", s),
        })
    }

    /// Search term and episode designator joined by a space.
    pub fn query_string(&self) -> String {
        let mut parts = vec![];

        if let Some(term) = self.term() {
            parts.push(term.to_string());
        }
        if let Some(ep) = self.episode_string() {
            parts.push(ep);
        }

        parts.join(" ")
    }

    /// The external id normalized to `tt`-prefixed form, if it is an IMDB id.
    pub fn imdb_id(&self) -> Option<String> {
        let id = self.external_id.as_deref()?.trim();
        IMDB_ID
            .captures(id)
            .and_then(|c| c.get(1))
            .map(|digits| format!("tt{}", digits.as_str()))
    }

    /// The query fields that carry a value.
    pub fn populated_fields(&self) -> Vec<QueryField> {
        let mut fields = vec![];
        if self.term().is_some() {
            fields.push(QueryField::SearchTerm);
        }
        if self.season.is_some() {
            fields.push(QueryField::Season);
        }
        if self.episode.is_some() {
            fields.push(QueryField::Episode);
        }
        if self.imdb_id().is_some() {
            fields.push(QueryField::ImdbId);
        }
        if !self.categories.is_empty() {
            fields.push(QueryField::Categories);
        }
        fields
    }
}
