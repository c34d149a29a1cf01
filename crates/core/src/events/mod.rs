//! Low-severity adapter events.
//!
//! Events are side observations of a search (an unmapped category, a link
//! that failed to parse). Emitting one never blocks and never fails a search.

mod sinks;

pub use sinks::{ChannelSink, NullSink, TracingSink};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics;

/// Something worth noting that happened inside an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AdapterEvent {
    /// A site category id with no registered mapping; entries fell back to
    /// `Other`.
    UnmappedCategory { adapter: String, local_id: String },

    /// A field was present but unusable and was treated as absent.
    DegradedField {
        adapter: String,
        field: String,
        reason: String,
    },

    /// The response did not match the expected schema.
    ParseFailed { adapter: String, reason: String },

    /// Variants dropped during one search for lacking a download method.
    VariantsDropped { adapter: String, count: usize },
}

impl AdapterEvent {
    pub fn adapter(&self) -> &str {
        match self {
            AdapterEvent::UnmappedCategory { adapter, .. }
            | AdapterEvent::DegradedField { adapter, .. }
            | AdapterEvent::ParseFailed { adapter, .. }
            | AdapterEvent::VariantsDropped { adapter, .. } => adapter,
        }
    }

    /// Snake-case event name, as used in metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AdapterEvent::UnmappedCategory { .. } => "unmapped_category",
            AdapterEvent::DegradedField { .. } => "degraded_field",
            AdapterEvent::ParseFailed { .. } => "parse_failed",
            AdapterEvent::VariantsDropped { .. } => "variants_dropped",
        }
    }
}

/// An event with the time it was emitted.
#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    pub timestamp: DateTime<Utc>,
    pub event: AdapterEvent,
}

impl EventEnvelope {
    pub fn now(event: AdapterEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Receives adapter events. Must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AdapterEvent);
}

/// Count `event` and hand it to `sink`.
pub(crate) fn report(sink: &dyn EventSink, event: AdapterEvent) {
    metrics::ADAPTER_EVENTS
        .with_label_values(&[event.adapter(), event.kind()])
        .inc();
    sink.emit(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = AdapterEvent::UnmappedCategory {
            adapter: "alpharatio".to_string(),
            local_id: "99".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"unmapped_category","adapter":"alpharatio","local_id":"99"}"#
        );
        assert_eq!(event.kind(), "unmapped_category");
        assert_eq!(event.adapter(), "alpharatio");
    }
}
