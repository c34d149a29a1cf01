use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{AdapterEvent, EventEnvelope, EventSink};

/// Writes events as tracing records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: AdapterEvent) {
        match &event {
            AdapterEvent::UnmappedCategory { adapter, local_id } => {
                debug!(adapter = %adapter, local_id = %local_id, "Unmapped category");
            }
            AdapterEvent::DegradedField {
                adapter,
                field,
                reason,
            } => {
                debug!(adapter = %adapter, field = %field, reason = %reason, "Degraded field");
            }
            AdapterEvent::ParseFailed { adapter, reason } => {
                warn!(adapter = %adapter, reason = %reason, "Response parse failed");
            }
            AdapterEvent::VariantsDropped { adapter, count } => {
                debug!(adapter = %adapter, count = count, "Variants dropped");
            }
        }
    }
}

/// Discards events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: AdapterEvent) {}
}

/// Forwards events over a bounded channel.
///
/// When the channel is full or closed the event is dropped and the error is
/// logged.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<EventEnvelope>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<EventEnvelope>) -> Self {
        Self { tx }
    }

    /// A sink together with the receiving end of its channel.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<EventEnvelope>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: AdapterEvent) {
        if let Err(e) = self.tx.try_send(EventEnvelope::now(event)) {
            tracing::error!("Failed to emit adapter event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dropped(count: usize) -> AdapterEvent {
        AdapterEvent::VariantsDropped {
            adapter: "shizaproject".to_string(),
            count,
        }
    }

    #[tokio::test]
    async fn test_channel_sink_forwards() {
        let (sink, mut rx) = ChannelSink::channel(4);
        sink.emit(dropped(2));

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event, dropped(2));
    }

    #[tokio::test]
    async fn test_channel_sink_full_does_not_block() {
        let (sink, mut rx) = ChannelSink::channel(1);
        sink.emit(dropped(1));
        sink.emit(dropped(2));

        assert_eq!(rx.recv().await.unwrap().event, dropped(1));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_channel_sink_closed_does_not_panic() {
        let (sink, rx) = ChannelSink::channel(1);
        drop(rx);
        sink.emit(dropped(1));
    }

    #[test]
    fn test_null_and_tracing_sinks() {
        NullSink.emit(dropped(1));
        TracingSink.emit(dropped(1));
    }
}
