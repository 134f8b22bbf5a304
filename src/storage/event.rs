//! The connection event record.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::geo::Origin;

/// One captured connection, the unit of record for both sinks.
///
/// Constructed immediately after payload receipt, enriched in place with
/// origin and classification, recorded at most once, then discarded.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectionEvent {
    /// Instant the payload was captured.
    #[serde(serialize_with = "serialize_micros")]
    pub timestamp: DateTime<Utc>,

    /// Peer source IP, as reported by the accepted socket.
    pub ip: String,

    /// Peer source port.
    pub port: u16,

    /// Payload decoded to text (lossy) and trimmed. May be empty: a peer
    /// that connects and closes without sending is still a valid capture.
    pub data: String,

    /// Peer origin; unresolved fields hold the "N/A" sentinel.
    pub geo: Origin,

    /// Outcome of signature classification on `data`.
    pub suspicious: bool,
}

impl ConnectionEvent {
    /// Capture a raw payload from `ip:port`. Invalid UTF-8 sequences are
    /// replaced rather than failing; surrounding whitespace is trimmed.
    /// Origin and classification start unresolved and are filled by
    /// [`enrich`](Self::enrich).
    pub fn capture(ip: String, port: u16, raw: &[u8]) -> Self {
        Self {
            timestamp: Utc::now(),
            ip,
            port,
            data: String::from_utf8_lossy(raw).trim().to_string(),
            geo: Origin::unavailable(),
            suspicious: false,
        }
    }

    /// Attach the derived fields. Called exactly once, before recording.
    pub fn enrich(&mut self, geo: Origin, suspicious: bool) {
        self.geo = geo;
        self.suspicious = suspicious;
    }
}

/// ISO-8601 with microsecond precision, e.g. `2026-08-29T10:15:30.123456`.
fn serialize_micros<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&ts.format("%Y-%m-%dT%H:%M:%S%.6f"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_decodes_lossily_and_trims() {
        let event = ConnectionEvent::capture("203.0.113.5".to_string(), 54321, b"  hi \xff there \r\n");
        assert_eq!(event.data, "hi \u{fffd} there");
        assert_eq!(event.ip, "203.0.113.5");
        assert_eq!(event.port, 54321);
    }

    #[test]
    fn zero_byte_payload_is_valid() {
        let event = ConnectionEvent::capture("203.0.113.5".to_string(), 1, b"");
        assert_eq!(event.data, "");
        assert!(!event.suspicious);
    }

    #[test]
    fn serializes_with_expected_fields() {
        let mut event = ConnectionEvent::capture("203.0.113.5".to_string(), 54321, b"SELECT 1");
        event.enrich(
            Origin {
                country: "Germany".to_string(),
                city: "Berlin".to_string(),
                org: "Evil Org".to_string(),
            },
            true,
        );

        let value: serde_json::Value = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(value["ip"], "203.0.113.5");
        assert_eq!(value["port"], 54321);
        assert_eq!(value["data"], "SELECT 1");
        assert_eq!(value["geo"]["country"], "Germany");
        assert_eq!(value["geo"]["city"], "Berlin");
        assert_eq!(value["geo"]["org"], "Evil Org");
        assert_eq!(value["suspicious"], true);

        // ISO-8601 with microsecond precision.
        let ts = value["timestamp"].as_str().unwrap();
        assert_eq!(ts.len(), "2026-08-29T10:15:30.123456".len());
        assert!(ts.contains('T'));
    }
}
