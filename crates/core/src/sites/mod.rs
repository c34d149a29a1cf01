//! Shipped site adapters and the config-driven registry.

pub mod alpharatio;
pub mod shizaproject;

use std::sync::Arc;
use tracing::info;

use crate::adapter::{Adapter, AdapterError, Indexer};
use crate::config::{Config, HttpConfig, IndexerConfig};
use crate::events::EventSink;
use crate::transport::{HttpTransport, HttpTransportConfig, Transport};

pub use alpharatio::{AlphaRatio, AlphaRatioOptions};
pub use shizaproject::ShizaProject;

/// Build one adapter from its configuration.
pub fn build_adapter(
    config: &IndexerConfig,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn EventSink>,
) -> Result<Arc<dyn Indexer>, AdapterError> {
    let id = config.id();
    let site_link = config.site_link();

    let adapter: Arc<dyn Indexer> = match config {
        IndexerConfig::ShizaProject(_) => Arc::new(Adapter::new(
            shizaproject::info(id, &site_link),
            ShizaProject::new(&site_link),
            shizaproject::categories()?,
            shizaproject::policy(),
            transport,
            sink,
        )),
        IndexerConfig::AlphaRatio(c) => Arc::new(Adapter::new(
            alpharatio::info(id, &site_link),
            AlphaRatio::new(
                &site_link,
                AlphaRatioOptions {
                    api_key: c.api_key.clone().filter(|k| !k.is_empty()),
                    freeleech_only: c.freeleech_only,
                    use_freeleech_tokens: c.use_freeleech_tokens,
                },
            ),
            alpharatio::categories()?,
            alpharatio::policy(),
            transport,
            sink,
        )),
    };

    Ok(adapter)
}

/// A fresh HTTP transport for one adapter.
pub fn http_transport(
    http: &HttpConfig,
    indexer: &IndexerConfig,
) -> Result<Arc<dyn Transport>, AdapterError> {
    let transport = HttpTransport::new(
        indexer.id(),
        HttpTransportConfig {
            timeout_secs: http.timeout_secs,
            user_agent: http.user_agent.clone(),
            cookie: indexer.cookie().map(str::to_string),
        },
    )?;
    Ok(Arc::new(transport))
}

/// Build every enabled adapter, each with its own HTTP transport.
pub fn build_adapters(
    config: &Config,
    sink: Arc<dyn EventSink>,
) -> Result<Vec<Arc<dyn Indexer>>, AdapterError> {
    let mut adapters = Vec::new();

    for indexer in config.indexers.iter().filter(|i| i.enabled()) {
        let transport = http_transport(&config.http, indexer)?;
        adapters.push(build_adapter(indexer, transport, Arc::clone(&sink))?);
    }

    info!(count = adapters.len(), "Adapters built");
    Ok(adapters)
}
