//! Durable event storage subsystem.
//!
//! # Data Flow
//! ```text
//! finished ConnectionEvent
//!     → recorder.rs
//!         → json_log.rs (append one JSON object per line)
//!         → sqlite.rs  (insert one row into `logs`)
//! ```
//!
//! # Design Decisions
//! - Two independent best-effort writes, no distributed transaction; the
//!   divergence window when one sink fails is accepted
//! - Each sink serializes its own writes internally, so the recorder can be
//!   called from concurrent connection tasks

pub mod event;
pub mod json_log;
pub mod recorder;
pub mod sqlite;

pub use event::ConnectionEvent;
pub use recorder::EventRecorder;

use thiserror::Error;

/// Error produced while persisting an event.
///
/// Recorder failure is non-fatal to a connection: the pipeline logs it and
/// still responds and closes.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to append to JSON log: {0}")]
    JsonLog(#[source] std::io::Error),

    #[error("failed to write to event store: {0}")]
    Store(#[from] rusqlite::Error),
}
