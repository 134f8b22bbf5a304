//! netsnare binary: wire configuration into the listener and run forever.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netsnare::config::loader::load_config;
use netsnare::config::SnareConfig;
use netsnare::net::{Listener, Pipeline};
use netsnare::storage::json_log::JsonLogSink;
use netsnare::storage::sqlite::EventStore;
use netsnare::storage::EventRecorder;

#[derive(Parser, Debug)]
#[command(name = "netsnare", about = "Deceptive TCP listener for capturing unsolicited traffic")]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured listening port.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netsnare=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SnareConfig::default(),
    };
    if let Some(port) = args.port {
        let mut addr: SocketAddr = config.listener.bind_address.parse()?;
        addr.set_port(port);
        config.listener.bind_address = addr.to_string();
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        max_payload_bytes = config.listener.max_payload_bytes,
        deny_listed = config.filters.deny.len(),
        allow_listed = config.filters.allow.len(),
        signatures = config.signatures.patterns.len(),
        "Configuration loaded"
    );

    // Storage setup failure is fatal: without sinks there is nothing to do.
    let store = EventStore::open(&config.storage.db_path)?;
    let json_log = JsonLogSink::new(&config.storage.json_log_path);
    let recorder = EventRecorder::new(json_log, store);

    let pipeline = Arc::new(Pipeline::new(&config, recorder)?);
    let listener = Listener::bind(&config.listener).await?;

    listener.run(pipeline).await?;
    Ok(())
}
