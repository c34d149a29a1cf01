use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

use super::{AdapterError, Indexer};
use crate::query::UniversalQuery;
use crate::release::ResultEntry;

/// Entries returned by one adapter.
#[derive(Debug, Clone, Serialize)]
pub struct AdapterResults {
    pub adapter: String,
    pub entries: Vec<ResultEntry>,
}

/// Outcome of a search across several adapters.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub query: UniversalQuery,
    /// Successful adapters, in registration order.
    pub results: Vec<AdapterResults>,
    /// Adapters that failed, with the error message.
    pub failures: BTreeMap<String, String>,
    /// Adapters not queried because they cannot express the query.
    pub skipped: Vec<String>,
    pub duration_ms: u64,
}

impl AggregateResult {
    /// All entries, in adapter registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ResultEntry> {
        self.results.iter().flat_map(|r| r.entries.iter())
    }

    pub fn total(&self) -> usize {
        self.results.iter().map(|r| r.entries.len()).sum()
    }
}

/// Result of running every adapter's setup.
#[derive(Default)]
pub struct SetupReport {
    pub ready: Vec<Arc<dyn Indexer>>,
    pub failures: BTreeMap<String, AdapterError>,
}

/// Fans one query out to many adapters.
pub struct Aggregator {
    adapters: Vec<Arc<dyn Indexer>>,
}

impl Aggregator {
    pub fn new(adapters: Vec<Arc<dyn Indexer>>) -> Self {
        Self { adapters }
    }

    /// Search every adapter that supports `query`, concurrently.
    ///
    /// A failing adapter is reported in `failures` and never prevents the
    /// others from returning.
    pub async fn search(&self, query: &UniversalQuery) -> AggregateResult {
        let start = Instant::now();

        let (eligible, skipped): (Vec<_>, Vec<_>) =
            self.adapters.iter().partition(|a| a.supports(query));
        let skipped: Vec<String> = skipped.iter().map(|a| a.id().to_string()).collect();

        debug!(
            adapters = eligible.len(),
            fields = ?query.populated_fields(),
            skipped = ?skipped,
            "Starting parallel search"
        );

        let search_futures: Vec<_> = eligible
            .iter()
            .map(|adapter| async move {
                let result = adapter.search(query).await;
                (adapter.id().to_string(), result)
            })
            .collect();

        let outcomes = futures::future::join_all(search_futures).await;

        let mut results = Vec::new();
        let mut failures = BTreeMap::new();

        for (adapter, outcome) in outcomes {
            match outcome {
                Ok(entries) => results.push(AdapterResults { adapter, entries }),
                Err(e) => {
                    warn!(adapter = %adapter, error = %e, "Adapter search failed");
                    failures.insert(adapter, e.to_string());
                }
            }
        }

        let result = AggregateResult {
            query: query.clone(),
            results,
            failures,
            skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        debug!(
            results = result.total(),
            failures = result.failures.len(),
            duration_ms = result.duration_ms,
            "Search complete"
        );

        result
    }

    /// Run setup for every adapter, concurrently.
    pub async fn setup_all(&self) -> SetupReport {
        let setups = self.adapters.iter().map(|adapter| async move {
            let result = adapter.setup().await;
            (Arc::clone(adapter), result)
        });

        let mut report = SetupReport::default();
        for (adapter, result) in futures::future::join_all(setups).await {
            match result {
                Ok(()) => report.ready.push(adapter),
                Err(e) => {
                    warn!(adapter = %adapter.id(), error = %e, "Adapter setup failed");
                    report.failures.insert(adapter.id().to_string(), e);
                }
            }
        }
        report
    }
}
