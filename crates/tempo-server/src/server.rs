//! Server startup and lifecycle

use crate::router::build_router;
use crate::shutdown::ShutdownSignal;
use crate::state::AppState;
use std::sync::Arc;
use tempo_config::Config;
use tempo_core::{Error, Result, SystemClock, TimeProvider};

/// The Tempo HTTP server
#[derive(Debug)]
pub struct Server {
    config: Arc<Config>,
    state: AppState,
    shutdown: ShutdownSignal,
}

impl Server {
    /// Create a server with the system clock.
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a server with a custom clock (deterministic tests).
    pub fn with_clock(config: Config, clock: Arc<dyn TimeProvider>) -> Self {
        let config = Arc::new(config);
        let state = AppState::new(Arc::clone(&config), clock);
        Self {
            config,
            state,
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Get shutdown signal
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Run the server until a shutdown signal arrives.
    pub async fn run(self) -> Result<()> {
        let listen = self.config.server.listen;

        let listener = tokio::net::TcpListener::bind(listen)
            .await
            .map_err(|e| Error::Runtime(format!("Failed to bind to {listen}: {e}")))?;

        tracing::info!(
            listen = %listen,
            compression_min_size = self.config.compression.min_size,
            sse_timeout_ms = self.config.sse.timeout.as_millis(),
            "Server listening"
        );

        let mut shutdown_rx = self.shutdown.subscribe();
        let router = build_router(self.state);

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                tracing::info!("Server shutting down gracefully");
            })
            .await
            .map_err(|e| Error::Runtime(format!("Server error: {e}")))?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
