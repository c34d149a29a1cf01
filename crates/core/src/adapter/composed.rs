use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{AdapterError, AdapterInfo, Indexer, SiteProtocol};
use crate::events::{report, AdapterEvent, EventSink};
use crate::metrics;
use crate::policy::SeedPolicy;
use crate::query::UniversalQuery;
use crate::release::{ExpandContext, Expansion, ResultEntry};
use crate::taxonomy::CategoryMap;
use crate::transport::Transport;

/// A site protocol wired to the pieces it needs to search.
///
/// Everything but the transport is read-only after construction, so one
/// adapter can serve concurrent searches.
pub struct Adapter<P: SiteProtocol> {
    info: AdapterInfo,
    protocol: P,
    categories: CategoryMap,
    policy: SeedPolicy,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
}

impl<P: SiteProtocol> Adapter<P> {
    pub fn new(
        info: AdapterInfo,
        protocol: P,
        categories: CategoryMap,
        policy: SeedPolicy,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        info!(
            adapter = %info.id,
            categories = categories.len(),
            transport = %transport.name(),
            "Adapter created"
        );

        Self {
            info,
            protocol,
            categories,
            policy,
            transport,
            sink,
        }
    }

    /// Expand parsed records and apply the seed policy. No I/O.
    pub fn normalize(&self, records: Vec<P::Record>) -> Vec<ResultEntry> {
        let ctx = ExpandContext::new(&self.info.id, &self.categories, self.sink.as_ref());

        let mut expansion = Expansion::default();
        for record in records {
            expansion.extend(self.protocol.expand(record, &ctx));
        }

        if expansion.dropped > 0 {
            metrics::VARIANTS_DROPPED
                .with_label_values(&[&self.info.id])
                .inc_by(expansion.dropped as u64);
            report(
                self.sink.as_ref(),
                AdapterEvent::VariantsDropped {
                    adapter: self.info.id.clone(),
                    count: expansion.dropped,
                },
            );
        }

        self.policy.apply(expansion.into_entries())
    }

    fn record_search(&self, result: &str, start: Instant) {
        metrics::SEARCHES
            .with_label_values(&[&self.info.id, result])
            .inc();
        metrics::SEARCH_DURATION
            .with_label_values(&[&self.info.id])
            .observe(start.elapsed().as_secs_f64());
    }
}

#[async_trait]
impl<P: SiteProtocol> Indexer for Adapter<P> {
    fn info(&self) -> &AdapterInfo {
        &self.info
    }

    fn categories(&self) -> &CategoryMap {
        &self.categories
    }

    async fn search(&self, query: &UniversalQuery) -> Result<Vec<ResultEntry>, AdapterError> {
        let start = Instant::now();
        let request = self.protocol.translate(query, &self.categories);
        debug!(adapter = %self.info.id, url = %request.full_url(), "Searching");

        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                self.record_search("transport_error", start);
                return Err(e.into());
            }
        };

        let records = match self
            .protocol
            .parse(&response.body, response.content_type.as_deref())
        {
            Ok(records) => records,
            Err(e) => {
                warn!(adapter = %self.info.id, error = %e, "Failed to parse response");
                report(
                    self.sink.as_ref(),
                    AdapterEvent::ParseFailed {
                        adapter: self.info.id.clone(),
                        reason: e.reason,
                    },
                );
                self.record_search("parse_error", start);
                return Ok(vec![]);
            }
        };

        let parsed = records.len();
        let entries = self.normalize(records);

        metrics::ENTRIES_EMITTED
            .with_label_values(&[&self.info.id])
            .inc_by(entries.len() as u64);
        self.record_search("ok", start);

        debug!(
            adapter = %self.info.id,
            records = parsed,
            entries = entries.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Search complete"
        );

        Ok(entries)
    }
}
