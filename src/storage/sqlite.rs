//! Queryable SQLite event store.
//!
//! # Responsibilities
//! - Create the `logs` table once if absent; never drop or alter it
//! - Insert one row per recorded event
//!
//! # Design Decisions
//! - The connection lives behind a mutex; one insert is one atomic unit,
//!   so rows from concurrent connections never interleave
//! - `suspicious` is stored as 0/1 for easy filtering in ad hoc queries

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection};

use crate::storage::event::ConnectionEvent;

/// The queryable structured store collaborator.
#[derive(Debug)]
pub struct EventStore {
    conn: Mutex<Connection>,
}

impl EventStore {
    /// Open (or create) the database and ensure the `logs` table exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT,
                ip TEXT,
                port INTEGER,
                data TEXT,
                country TEXT,
                city TEXT,
                org TEXT,
                suspicious INTEGER
            )",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert one event row.
    pub fn insert(&self, event: &ConnectionEvent) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().expect("event store mutex poisoned");
        conn.execute(
            "INSERT INTO logs (timestamp, ip, port, data, country, city, org, suspicious)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.timestamp.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
                event.ip,
                event.port,
                event.data,
                event.geo.country,
                event.geo.city,
                event.geo.org,
                event.suspicious as i64,
            ],
        )?;
        Ok(())
    }

    /// Number of stored rows. Used by tests and operator tooling.
    pub fn count(&self) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().expect("event store mutex poisoned");
        conn.query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Origin;

    #[test]
    fn creates_table_and_inserts_rows() {
        let dir = tempfile::tempdir().unwrap();
        let store = EventStore::open(dir.path().join("events.db")).unwrap();
        assert_eq!(store.count().unwrap(), 0);

        let mut event = ConnectionEvent::capture("203.0.113.5".to_string(), 54321, b"SELECT 1");
        event.enrich(
            Origin {
                country: "Germany".to_string(),
                city: "Berlin".to_string(),
                org: "Evil Org".to_string(),
            },
            true,
        );
        store.insert(&event).unwrap();
        assert_eq!(store.count().unwrap(), 1);

        let conn = store.conn.lock().unwrap();
        let (ip, port, data, country, suspicious): (String, u16, String, String, i64) = conn
            .query_row(
                "SELECT ip, port, data, country, suspicious FROM logs",
                [],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .unwrap();
        assert_eq!(ip, "203.0.113.5");
        assert_eq!(port, 54321);
        assert_eq!(data, "SELECT 1");
        assert_eq!(country, "Germany");
        assert_eq!(suspicious, 1);
    }

    #[test]
    fn reopening_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.db");

        let store = EventStore::open(&path).unwrap();
        let event = ConnectionEvent::capture("198.51.100.7".to_string(), 80, b"ping");
        store.insert(&event).unwrap();
        drop(store);

        let reopened = EventStore::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }
}
