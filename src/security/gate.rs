//! Address gate: per-connection admission decision.
//!
//! # Responsibilities
//! - Classify a connecting address as blocked, ignored, or allowed
//! - Pure decision, no side effects
//!
//! # Design Decisions
//! - Deny takes precedence over allow; an address on both lists is blocked
//! - Blocked and ignored connections are closed before any byte is read,
//!   and neither produces an event (keeps the logs free of known noise)

use std::collections::HashSet;

use crate::config::FilterConfig;

/// Outcome of gating a connecting address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Address is on the deny list; drop the connection.
    Block,
    /// Address is on the allow list; drop silently, it is known traffic.
    Ignore,
    /// Address is unknown; proceed with capture.
    Allow,
}

/// Immutable IP filter gate, safe for unsynchronized concurrent reads.
#[derive(Debug)]
pub struct AddressGate {
    deny: HashSet<String>,
    allow: HashSet<String>,
}

impl AddressGate {
    /// Build the gate from the configured filter lists.
    pub fn new(filters: &FilterConfig) -> Self {
        Self {
            deny: filters.deny.iter().cloned().collect(),
            allow: filters.allow.iter().cloned().collect(),
        }
    }

    /// Decide what to do with a connection from `ip`.
    ///
    /// Deny is checked first: blocking is the stronger signal, so an address
    /// on both lists is blocked rather than ignored.
    pub fn classify(&self, ip: &str) -> GateDecision {
        if self.deny.contains(ip) {
            GateDecision::Block
        } else if self.allow.contains(ip) {
            GateDecision::Ignore
        } else {
            GateDecision::Allow
        }
    }
}
