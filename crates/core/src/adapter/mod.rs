//! The uniform search contract every site adapter implements.
//!
//! A site is described by a [`SiteProtocol`] (how to translate a query, parse
//! a response and expand records into entries). [`Adapter`] composes a
//! protocol with its category map, seed policy, transport and event sink and
//! exposes it as an [`Indexer`].

mod aggregator;
mod composed;
mod error;

pub use aggregator::{AdapterResults, AggregateResult, Aggregator, SetupReport};
pub use composed::Adapter;
pub use error::{AdapterError, ParseError};

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::query::{QueryField, SiteRequest, UniversalQuery};
use crate::release::{ExpandContext, Expansion, ResultEntry};
use crate::taxonomy::CategoryMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerType {
    Public,
    Private,
}

/// Static description of an adapter.
#[derive(Debug, Clone, Serialize)]
pub struct AdapterInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Base URL, always ending in `/`.
    pub site_link: String,
    /// BCP 47 language tag of the site's content.
    pub language: String,
    pub tracker_type: TrackerType,
    pub supported_fields: Vec<QueryField>,
    /// Whether [`Indexer::setup`] must see at least one release.
    pub verify_on_setup: bool,
}

impl AdapterInfo {
    pub fn supports_field(&self, field: QueryField) -> bool {
        self.supported_fields.contains(&field)
    }
}

/// Site-specific behaviour, free of I/O.
pub trait SiteProtocol: Send + Sync + 'static {
    /// One logical item as parsed from the site.
    type Record: Send;

    /// Build the request for `query`. Must be deterministic.
    fn translate(&self, query: &UniversalQuery, categories: &CategoryMap) -> SiteRequest;

    /// Decode a response body into records, in payload order.
    fn parse(&self, body: &[u8], content_type: Option<&str>)
        -> Result<Vec<Self::Record>, ParseError>;

    /// Turn one record into zero or more entries.
    fn expand(&self, record: Self::Record, ctx: &ExpandContext<'_>) -> Expansion;
}

/// A searchable site.
#[async_trait]
pub trait Indexer: Send + Sync {
    fn info(&self) -> &AdapterInfo;

    fn categories(&self) -> &CategoryMap;

    fn id(&self) -> &str {
        &self.info().id
    }

    /// Whether calling [`search`](Indexer::search) with `query` makes sense.
    ///
    /// The empty query is always supported. Otherwise the adapter must
    /// declare the query's search term or external id, and when the query
    /// filters by category at least one filter must map to a site category.
    fn supports(&self, query: &UniversalQuery) -> bool {
        if query.is_empty() {
            return true;
        }

        let info = self.info();
        let has_term = query.term().is_some() && info.supports_field(QueryField::SearchTerm);
        let has_id = query.imdb_id().is_some() && info.supports_field(QueryField::ImdbId);
        let filters_only = query.term().is_none() && query.external_id.is_none();

        if !(has_term || has_id || filters_only) {
            return false;
        }

        if !query.categories.is_empty() {
            return !self.categories().local_ids_for(&query.categories).is_empty();
        }

        true
    }

    async fn search(&self, query: &UniversalQuery) -> Result<Vec<ResultEntry>, AdapterError>;

    /// Verify the adapter works. Adapters that declare `verify_on_setup` run
    /// one empty search and require at least one result.
    async fn setup(&self) -> Result<(), AdapterError> {
        if !self.info().verify_on_setup {
            return Ok(());
        }

        let entries = self.search(&UniversalQuery::default()).await?;
        debug!(adapter = %self.id(), entries = entries.len(), "Setup search complete");

        if entries.is_empty() {
            return Err(AdapterError::Configuration(
                "Could not find releases from this URL".to_string(),
            ));
        }
        Ok(())
    }
}
