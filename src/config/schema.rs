//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the trap.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the trap listener.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SnareConfig {
    /// Listener configuration (bind address, backpressure).
    pub listener: ListenerConfig,

    /// IP filter lists consulted before any payload is read.
    pub filters: FilterConfig,

    /// Suspicious-payload signature patterns.
    pub signatures: SignatureConfig,

    /// Geolocation lookup settings.
    pub geo: GeoConfig,

    /// Durable sink settings.
    pub storage: StorageConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:9999").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,

    /// Upper bound on bytes read from a single connection.
    pub max_payload_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:9999".to_string(),
            max_connections: 64,
            max_payload_bytes: 2048,
        }
    }
}

/// Static IP filter lists, loaded once at startup.
///
/// An address on the deny list is blocked; an address on the allow list is
/// silently ignored. Neither produces an event. Deny wins when an address
/// appears on both lists.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FilterConfig {
    /// Addresses to block outright.
    pub deny: Vec<String>,

    /// Addresses to ignore without logging an event (e.g., own scanners).
    pub allow: Vec<String>,
}

/// Signature patterns applied to received payloads.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Ordered regex patterns, matched case-insensitively.
    pub patterns: Vec<String>,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            patterns: vec![
                r"(select|union|insert|drop|delete|update).*".to_string(),
                r"(cmd|powershell|bash|sh).*".to_string(),
                r"(\.\./|%2e%2e/)".to_string(),
                r"(wget|curl|nc|ncat|telnet).*".to_string(),
            ],
        }
    }
}

/// Geolocation lookup configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeoConfig {
    /// Base URL of the ip-api.com-compatible lookup endpoint.
    /// The peer address is appended as a path segment.
    pub endpoint: String,

    /// Lookup timeout in seconds. A timed-out lookup yields sentinel values.
    pub timeout_secs: u64,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://ip-api.com/json".to_string(),
            timeout_secs: 5,
        }
    }
}

/// Durable sink configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the append-only JSON-lines log.
    pub json_log_path: String,

    /// Path of the SQLite event database.
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            json_log_path: "honeypot_logs.json".to_string(),
            db_path: "honeypot_logs.db".to_string(),
        }
    }
}
