//! Append-only JSON-lines sink.
//!
//! # Responsibilities
//! - Serialize each event to one self-contained JSON object
//! - Append it as a single line; never truncate or rewrite the file
//!
//! # Design Decisions
//! - The file is opened in append mode per write; the sink holds no open
//!   handle between events
//! - A mutex serializes concurrent appends so lines from concurrent
//!   connections never interleave

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::storage::event::ConnectionEvent;
use crate::storage::RecordError;

/// The append-only structured log collaborator.
#[derive(Debug)]
pub struct JsonLogSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Append one event as one line. One call is one atomic unit: the line
    /// is fully serialized before the lock is taken, then written whole.
    pub fn append(&self, event: &ConnectionEvent) -> Result<(), RecordError> {
        let line = serde_json::to_string(event)?;

        let _guard = self.write_lock.lock().expect("json log mutex poisoned");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(RecordError::JsonLog)?;
        writeln!(file, "{}", line).map_err(RecordError::JsonLog)?;
        Ok(())
    }
}
