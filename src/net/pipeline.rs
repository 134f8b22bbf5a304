//! Per-connection capture pipeline.
//!
//! # Responsibilities
//! - Gate the peer address before reading anything
//! - Receive one bounded payload chunk
//! - Classify and enrich, then record the event in both sinks
//! - Send the decoy reply to suspicious peers only
//!
//! # Connection States
//! ```text
//! Accepted → GateChecked → {Rejected | DataReceived}
//!          → ClassifiedAndEnriched → Recorded → Responded → Closed
//! ```
//!
//! # Design Decisions
//! - `handle` never returns an error: every failure is logged here and the
//!   socket is released on every exit path, so one bad connection cannot
//!   take down the listener
//! - Recorder failure is non-fatal; the connection still responds and closes
//! - Non-suspicious peers get no reply at all, and peers never see an
//!   internal error message

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::SnareConfig;
use crate::geo::GeoEnricher;
use crate::security::{AddressGate, GateDecision, SignatureSet};
use crate::storage::{ConnectionEvent, EventRecorder};

/// Fixed deceptive reply sent to suspicious peers. Resembles a shell that
/// failed to find a command; identical bytes every time.
pub const DECOY_REPLY: &[u8] = b"[root@honeypot /]$ command not found\n";

/// Orchestrates one connection's lifecycle. Shared read-only across
/// connection tasks.
pub struct Pipeline {
    gate: AddressGate,
    signatures: SignatureSet,
    enricher: GeoEnricher,
    recorder: EventRecorder,
    max_payload_bytes: usize,
}

impl Pipeline {
    /// Assemble the pipeline from validated configuration and an opened
    /// recorder. Pattern compilation happens once, here.
    pub fn new(config: &SnareConfig, recorder: EventRecorder) -> Result<Self, regex::Error> {
        Ok(Self {
            gate: AddressGate::new(&config.filters),
            signatures: SignatureSet::compile(&config.signatures.patterns)?,
            enricher: GeoEnricher::new(&config.geo),
            recorder,
            max_payload_bytes: config.listener.max_payload_bytes,
        })
    }

    /// Process one accepted connection to completion.
    ///
    /// The stream is dropped (and the socket closed) on every path out of
    /// this function, including early gate rejection and receive failure.
    pub async fn handle(&self, mut stream: TcpStream, peer: SocketAddr) {
        let ip = peer.ip().to_string();

        match self.gate.classify(&ip) {
            GateDecision::Block => {
                tracing::warn!(ip = %ip, "Blocked connection from deny-listed IP");
                return;
            }
            GateDecision::Ignore => {
                tracing::info!(ip = %ip, "Ignored connection from allow-listed IP");
                return;
            }
            GateDecision::Allow => {}
        }

        let mut buf = vec![0u8; self.max_payload_bytes];
        let received = match stream.read(&mut buf).await {
            // A zero-byte read (peer closed without sending) is a valid
            // empty payload and is still recorded.
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(ip = %ip, error = %e, "Failed to receive payload");
                return;
            }
        };

        let mut event = ConnectionEvent::capture(ip.clone(), peer.port(), &buf[..received]);
        let suspicious = self.signatures.is_suspicious(&event.data);
        let origin = self.enricher.lookup(&ip).await;
        event.enrich(origin, suspicious);

        tracing::info!(
            peer = %peer,
            origin = %event.geo,
            data = %event.data,
            "New connection captured"
        );
        if suspicious {
            tracing::warn!(
                peer = %peer,
                rule = ?self.signatures.first_match(&event.data),
                "Suspicious activity detected"
            );
        }

        if let Err(e) = self.recorder.record(&event) {
            tracing::error!(peer = %peer, error = %e, "Failed to record event");
        }

        if suspicious {
            // Keep the peer engaged; delivery failure is their problem.
            if let Err(e) = stream.write_all(DECOY_REPLY).await {
                tracing::debug!(peer = %peer, error = %e, "Decoy reply not delivered");
            }
        }
    }
}
