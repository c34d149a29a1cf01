//! Prometheus metrics for adapters.
//!
//! Collectors are created lazily; hosts register them with their own
//! registry via [`all_metrics`].

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Search Metrics
// =============================================================================

/// Adapter searches by result.
pub static SEARCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scour_searches_total", "Total adapter searches"),
        &["adapter", "result"], // "ok", "parse_error", "transport_error"
    )
    .unwrap()
});

/// Adapter search duration in seconds, transport included.
pub static SEARCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "scour_search_duration_seconds",
            "Duration of one adapter search",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["adapter"],
    )
    .unwrap()
});

/// Normalized entries returned to callers.
pub static ENTRIES_EMITTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scour_entries_emitted_total", "Total entries returned"),
        &["adapter"],
    )
    .unwrap()
});

/// Variants discarded during expansion.
pub static VARIANTS_DROPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "scour_variants_dropped_total",
            "Total variants dropped for failing validation",
        ),
        &["adapter"],
    )
    .unwrap()
});

// =============================================================================
// Observability Events
// =============================================================================

/// Adapter events by kind.
pub static ADAPTER_EVENTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scour_adapter_events_total", "Total adapter events"),
        &["adapter", "kind"], // "unmapped_category", "degraded_field", ...
    )
    .unwrap()
});

/// Every collector in this module.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCHES.clone()),
        Box::new(SEARCH_DURATION.clone()),
        Box::new(ENTRIES_EMITTED.clone()),
        Box::new(VARIANTS_DROPPED.clone()),
        Box::new(ADAPTER_EVENTS.clone()),
    ]
}
