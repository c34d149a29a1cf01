mod cli;
mod metrics;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scour_core::{
    build_adapters, load_config, validate_config, AdapterInfo, Aggregator, ChannelSink, Config,
    EventSink, SanitizedConfig, TracingSink, UniversalQuery,
};
use scour_core::events::EventEnvelope;
use scour_core::taxonomy::CategoryMapping;

use cli::{CliOptions, Command, USAGE};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Buffer size for the adapter event channel
const EVENT_BUFFER_SIZE: usize = 1000;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = CliOptions::from_args().context("Invalid arguments")?;

    if options.command == Command::Help {
        println!("scour {}\n\n{}", VERSION, USAGE);
        return Ok(());
    }

    let config = load()?;

    match options.command {
        Command::Search(query) => search(&config, query).await?,
        Command::Setup => setup(&config).await?,
        Command::Indexers => indexers(&config)?,
        Command::Config => print_json(&SanitizedConfig::from(&config))?,
        Command::Help => {}
    }

    if options.metrics {
        eprintln!("{}", metrics::encode_metrics());
    }

    Ok(())
}

fn load() -> Result<Config> {
    // Determine config path
    let config_path = std::env::var("SCOUR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    // Compute config hash for logs
    let config_json = serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        version = VERSION,
        config_hash = &config_hash[..16],
        indexers = config.indexers.len(),
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

#[derive(Serialize)]
struct SearchOutput {
    #[serde(flatten)]
    result: scour_core::AggregateResult,
    events: Vec<EventEnvelope>,
}

/// Log and collect adapter events until every sender is dropped.
fn spawn_event_collector(mut rx: mpsc::Receiver<EventEnvelope>) -> JoinHandle<Vec<EventEnvelope>> {
    tokio::spawn(async move {
        let mut events = Vec::new();
        while let Some(envelope) = rx.recv().await {
            TracingSink.emit(envelope.event.clone());
            events.push(envelope);
        }
        events
    })
}

async fn search(config: &Config, query: UniversalQuery) -> Result<()> {
    let (sink, events_rx) = ChannelSink::channel(EVENT_BUFFER_SIZE);
    let collector = spawn_event_collector(events_rx);

    let adapters = build_adapters(config, Arc::new(sink)).context("Failed to build adapters")?;
    let aggregator = Aggregator::new(adapters);

    let result = aggregator.search(&query).await;
    // Closes the event channel.
    drop(aggregator);
    info!(
        entries = result.total(),
        failures = result.failures.len(),
        skipped = result.skipped.len(),
        duration_ms = result.duration_ms,
        "Search finished"
    );

    let events = collector.await.context("Event collector failed")?;

    print_json(&SearchOutput { result, events })
}

#[derive(Serialize)]
struct SetupOutput {
    ready: Vec<String>,
    failures: BTreeMap<String, String>,
}

async fn setup(config: &Config) -> Result<()> {
    let adapters =
        build_adapters(config, Arc::new(TracingSink)).context("Failed to build adapters")?;
    let report = Aggregator::new(adapters).setup_all().await;

    print_json(&SetupOutput {
        ready: report.ready.iter().map(|a| a.id().to_string()).collect(),
        failures: report
            .failures
            .iter()
            .map(|(id, e)| (id.clone(), e.to_string()))
            .collect(),
    })
}

#[derive(Serialize)]
struct IndexerSummary<'a> {
    #[serde(flatten)]
    info: &'a AdapterInfo,
    categories: &'a [CategoryMapping],
}

fn indexers(config: &Config) -> Result<()> {
    let adapters =
        build_adapters(config, Arc::new(TracingSink)).context("Failed to build adapters")?;

    let summaries: Vec<IndexerSummary<'_>> = adapters
        .iter()
        .map(|a| IndexerSummary {
            info: a.info(),
            categories: a.categories().mappings(),
        })
        .collect();

    print_json(&summaries)
}
