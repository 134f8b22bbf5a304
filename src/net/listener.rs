//! TCP listener implementation with backpressure.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Enforce max_connections limit via semaphore
//! - Dispatch each connection to its own task
//!
//! # Design Decisions
//! - Bind failure is fatal: without a bound socket there is nothing to do
//! - Accept failures are logged and the loop continues
//! - Nothing from an individual connection can fail the loop; the pipeline
//!   contains all per-connection errors

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Semaphore;

use crate::config::ListenerConfig;
use crate::net::pipeline::Pipeline;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// Failed to bind to address.
    Bind(std::io::Error),
    /// Failed to accept connection.
    Accept(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
            ListenerError::Accept(e) => write!(f, "Failed to accept: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// A bounded TCP listener that limits concurrent connections.
///
/// Uses a semaphore to enforce `max_connections`. When the limit is reached,
/// new connections will wait until a slot becomes available.
pub struct Listener {
    /// The underlying TCP listener.
    inner: TcpListener,
    /// Semaphore to limit concurrent connections.
    connection_limit: Arc<Semaphore>,
}

impl Listener {
    /// Bind to the configured address with connection limits.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
            ListenerError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
        })?;

        let listener = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;

        let local_addr = listener.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(
            address = %local_addr,
            max_connections = config.max_connections,
            "Listener bound, trap armed"
        );

        Ok(Self {
            inner: listener,
            connection_limit: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }

    /// Accept connections forever, handing each to its own pipeline task.
    ///
    /// Runs until the process is terminated externally; there is no graceful
    /// shutdown protocol. A slow or silent peer only occupies its own task
    /// (and one semaphore permit), never the accept loop.
    pub async fn run(self, pipeline: Arc<Pipeline>) -> Result<(), ListenerError> {
        loop {
            // Acquire permit first (backpressure)
            let permit = self
                .connection_limit
                .clone()
                .acquire_owned()
                .await
                .expect("Semaphore closed unexpectedly");

            let (stream, peer) = match self.inner.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to accept connection");
                    continue;
                }
            };

            tracing::debug!(
                peer_addr = %peer,
                available_permits = self.connection_limit.available_permits(),
                "Connection accepted"
            );

            let pipeline = Arc::clone(&pipeline);
            tokio::spawn(async move {
                pipeline.handle(stream, peer).await;
                drop(permit);
            });
        }
    }
}
