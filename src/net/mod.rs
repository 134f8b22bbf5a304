//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → pipeline.rs (gate, receive, classify, enrich, record, respond)
//!     → socket closed
//! ```
//!
//! # Design Decisions
//! - Bounded accept queue prevents resource exhaustion
//! - Each connection runs on its own task so a stalled peer cannot block
//!   acceptance of new connections
//! - No protocol negotiation: plain bytes in, at most one decoy line out

pub mod listener;
pub mod pipeline;

pub use listener::{Listener, ListenerError};
pub use pipeline::{Pipeline, DECOY_REPLY};
