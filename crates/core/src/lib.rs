pub mod adapter;
pub mod config;
pub mod events;
pub mod metrics;
pub mod policy;
pub mod query;
pub mod release;
pub mod sites;
pub mod taxonomy;
pub mod testing;
pub mod transport;

pub use adapter::{
    Adapter, AdapterError, AdapterInfo, AggregateResult, Aggregator, Indexer, ParseError,
    SetupReport, SiteProtocol, TrackerType,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, IndexerConfig,
    SanitizedConfig,
};
pub use events::{AdapterEvent, ChannelSink, EventSink, NullSink, TracingSink};
pub use policy::SeedPolicy;
pub use query::{QueryField, SiteRequest, UniversalQuery};
pub use release::{ResultEntry, ValidationDrop};
pub use sites::{build_adapter, build_adapters};
pub use taxonomy::{CategoryMap, UniversalCategory};
pub use transport::{HttpTransport, RawResponse, Transport, TransportError};
