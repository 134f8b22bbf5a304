//! Dual-sink event recorder.
//!
//! # Responsibilities
//! - Normalize a finished event into both durable forms
//! - Append to the JSON-lines log, then insert into the SQLite store
//!
//! # Design Decisions
//! - Fixed write order: JSON log first, store second
//! - No transaction spans the two sinks. If the first write succeeds and
//!   the second fails, the sinks diverge for that event; this window is
//!   accepted and reported, not reconciled
//! - No dedup key; each real connection records exactly once by
//!   construction, so replays are not a concern

use crate::storage::event::ConnectionEvent;
use crate::storage::json_log::JsonLogSink;
use crate::storage::sqlite::EventStore;
use crate::storage::RecordError;

/// Writes each event to both sinks.
#[derive(Debug)]
pub struct EventRecorder {
    json_log: JsonLogSink,
    store: EventStore,
}

impl EventRecorder {
    pub fn new(json_log: JsonLogSink, store: EventStore) -> Self {
        Self { json_log, store }
    }

    /// Persist one fully populated event in both sinks.
    pub fn record(&self, event: &ConnectionEvent) -> Result<(), RecordError> {
        self.json_log.append(event)?;
        self.store.insert(event)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Origin;

    fn recorder(dir: &std::path::Path) -> EventRecorder {
        EventRecorder::new(
            JsonLogSink::new(dir.join("events.json")),
            EventStore::open(dir.join("events.db")).unwrap(),
        )
    }

    #[test]
    fn records_matching_entries_in_both_sinks() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = recorder(dir.path());

        let mut event = ConnectionEvent::capture("203.0.113.5".to_string(), 54321, b"curl x");
        event.enrich(Origin::unavailable(), true);
        recorder.record(&event).unwrap();

        let content = std::fs::read_to_string(dir.path().join("events.json")).unwrap();
        let line: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(line["ip"], "203.0.113.5");
        assert_eq!(line["port"], 54321);
        assert_eq!(line["data"], "curl x");
        assert_eq!(line["suspicious"], true);

        assert_eq!(recorder.store.count().unwrap(), 1);
    }

    #[test]
    fn json_sink_failure_surfaces_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = EventRecorder::new(
            JsonLogSink::new("/nonexistent-dir/events.json"),
            EventStore::open(dir.path().join("events.db")).unwrap(),
        );

        let event = ConnectionEvent::capture("203.0.113.5".to_string(), 1, b"x");
        assert!(recorder.record(&event).is_err());
        // Fixed write order: the store was never reached.
        assert_eq!(recorder.store.count().unwrap(), 0);
    }
}
