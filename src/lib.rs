//! netsnare - deceptive TCP listener
//!
//! Accepts inbound connections on a single port, captures whatever the peer
//! sends, classifies the payload against attack signatures, enriches the
//! event with the peer's geographic origin, persists it to a JSON-lines log
//! and a SQLite store, and answers suspicious peers with a decoy reply.
//! It provides no real service; its output is forensic data.
//!
//! # Architecture Overview
//!
//! ```text
//!   Peer connection
//!       │
//!       ▼
//!   net::listener ──▶ net::pipeline
//!                        │
//!            ┌───────────┼──────────────┐
//!            ▼           ▼              ▼
//!     security::gate  security::   geo (origin
//!     (deny/allow)    signatures    lookup)
//!                        │
//!                        ▼
//!                  storage::recorder
//!                    ├── json_log (append-only lines)
//!                    └── sqlite   (queryable rows)
//! ```

pub mod config;
pub mod geo;
pub mod net;
pub mod security;
pub mod storage;

pub use config::SnareConfig;
pub use net::{Listener, Pipeline, DECOY_REPLY};
