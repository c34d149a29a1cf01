use std::sync::{Arc, Mutex};

use crate::events::{AdapterEvent, EventSink};

/// Event sink that keeps every event for assertions.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<AdapterEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The events emitted so far, oldest first.
    pub fn events(&self) -> Vec<AdapterEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Events of one kind, e.g. `"parse_failed"`.
    pub fn events_of(&self, kind: &str) -> Vec<AdapterEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.kind() == kind)
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: AdapterEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
