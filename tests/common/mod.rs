//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use netsnare::config::SnareConfig;
use netsnare::net::{Listener, Pipeline};
use netsnare::storage::json_log::JsonLogSink;
use netsnare::storage::sqlite::EventStore;
use netsnare::storage::EventRecorder;

/// Start a mock geolocation backend that answers every request with the
/// given JSON body. Returns the address it listens on.
pub async fn start_mock_geo(body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Drain the request head before answering.
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A running snare bound to an ephemeral loopback port, with sinks in a
/// temporary directory.
pub struct TestSnare {
    pub addr: SocketAddr,
    pub json_log_path: PathBuf,
    pub db_path: PathBuf,
    _dir: tempfile::TempDir,
}

/// Start a snare with the given configurator applied on top of defaults.
/// The bind address, sink paths, and geo endpoint are filled in here.
pub async fn start_snare(geo_addr: SocketAddr, configure: impl FnOnce(&mut SnareConfig)) -> TestSnare {
    let dir = tempfile::tempdir().unwrap();
    let json_log_path = dir.path().join("events.json");
    let db_path = dir.path().join("events.db");

    let mut config = SnareConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.geo.endpoint = format!("http://{}", geo_addr);
    config.geo.timeout_secs = 1;
    config.storage.json_log_path = json_log_path.to_string_lossy().into_owned();
    config.storage.db_path = db_path.to_string_lossy().into_owned();
    configure(&mut config);

    let recorder = EventRecorder::new(
        JsonLogSink::new(&json_log_path),
        EventStore::open(&db_path).unwrap(),
    );
    let pipeline = Arc::new(Pipeline::new(&config, recorder).unwrap());
    let listener = Listener::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = listener.run(pipeline).await;
    });

    TestSnare {
        addr,
        json_log_path,
        db_path,
        _dir: dir,
    }
}

/// Wait until the JSON log contains `n` lines, returning them parsed.
/// Panics if the count is not reached within two seconds.
pub async fn wait_for_log_lines(path: &Path, n: usize) -> Vec<serde_json::Value> {
    for _ in 0..100 {
        if let Ok(content) = std::fs::read_to_string(path) {
            let lines: Vec<serde_json::Value> = content
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect();
            if lines.len() >= n {
                return lines;
            }
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("JSON log at {:?} never reached {} lines", path, n);
}

/// Count rows currently in the SQLite store.
pub fn store_rows(path: &Path) -> i64 {
    let conn = rusqlite::Connection::open(path).unwrap();
    conn.query_row("SELECT COUNT(*) FROM logs", [], |row| row.get(0))
        .unwrap()
}
