// crates/kantine-server/src/server.rs
// ============================================================================
// Module: Server Lifecycle
// Description: Bind, serve, and gracefully shut down the HTTP surface.
// Purpose: Give hosts and tests one deterministic startup/teardown path.
// Dependencies: axum, kantine-config, kantine-core, kantine-store-sqlite, tokio
// ============================================================================

//! ## Overview
//! [`KantineServer`] assembles state from config: it opens the configured
//! store, loads the latest snapshot (or starts empty), binds the listener,
//! and serves the router until the shutdown signal fires. [`ServerHandle`]
//! exposes the bound address for clients and tests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use kantine_config::KantineConfig;
use kantine_config::StoreMode;
use kantine_core::LedgerState;
use kantine_core::LedgerStore;
use kantine_core::MemoryLedgerStore;
use kantine_core::StoreError;
use kantine_store_sqlite::SqliteLedgerStore;
use kantine_store_sqlite::SqliteStoreConfig;
use kantine_store_sqlite::SqliteStoreError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::routes::build_router;
use crate::state::AppState;
use crate::telemetry::MetricsSink;
use crate::telemetry::NoopMetricsSink;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Server lifecycle errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured store could not be opened.
    #[error("store open failed: {0}")]
    StoreOpen(#[from] SqliteStoreError),
    /// The initial snapshot could not be loaded.
    #[error("snapshot load failed: {0}")]
    SnapshotLoad(#[from] StoreError),
    /// The listener could not be bound.
    #[error("bind failed: {0}")]
    Bind(std::io::Error),
    /// Serving failed after startup.
    #[error("serve failed: {0}")]
    Serve(std::io::Error),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Assembled Kantine HTTP server.
pub struct KantineServer {
    /// Validated configuration.
    config: KantineConfig,
    /// Snapshot store.
    store: Arc<dyn LedgerStore + Send + Sync>,
    /// Telemetry sink.
    metrics: Arc<dyn MetricsSink>,
}

impl KantineServer {
    /// Builds a server from config, opening the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the sqlite store cannot be opened.
    pub fn from_config(config: KantineConfig) -> Result<Self, ServerError> {
        let store: Arc<dyn LedgerStore + Send + Sync> = match config.store.mode {
            StoreMode::Memory => Arc::new(MemoryLedgerStore::new()),
            StoreMode::Sqlite => {
                let path = config.store.path.clone().unwrap_or_default();
                let store_config = SqliteStoreConfig::new(PathBuf::from(path));
                Arc::new(SqliteLedgerStore::open(&store_config)?)
            }
        };
        Ok(Self {
            config,
            store,
            metrics: Arc::new(NoopMetricsSink),
        })
    }

    /// Builds a server over an existing store (used by tests and embedders).
    #[must_use]
    pub fn with_store(config: KantineConfig, store: Arc<dyn LedgerStore + Send + Sync>) -> Self {
        Self {
            config,
            store,
            metrics: Arc::new(NoopMetricsSink),
        }
    }

    /// Replaces the telemetry sink.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Binds the listener and spawns the serve loop.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] when the snapshot cannot be loaded or the
    /// listener cannot be bound.
    pub async fn spawn(self) -> Result<ServerHandle, ServerError> {
        let initial = self.store.load()?.unwrap_or_else(LedgerState::new);
        let state = Arc::new(AppState::new(
            initial,
            Arc::clone(&self.store),
            self.config.server.max_sessions,
            Arc::clone(&self.metrics),
        ));
        let router = build_router(state, self.config.server.max_body_bytes);
        let listener =
            TcpListener::bind(&self.config.server.bind).await.map_err(ServerError::Bind)?;
        let local_addr = listener.local_addr().map_err(ServerError::Bind)?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let join = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
                .map_err(ServerError::Serve)
        });
        Ok(ServerHandle {
            local_addr,
            shutdown: Some(shutdown_tx),
            join,
        })
    }
}

// ============================================================================
// SECTION: Server Handle
// ============================================================================

/// Handle for a spawned server.
pub struct ServerHandle {
    /// Bound listener address.
    local_addr: SocketAddr,
    /// Graceful shutdown trigger.
    shutdown: Option<oneshot::Sender<()>>,
    /// Serve task handle.
    join: JoinHandle<Result<(), ServerError>>,
}

impl ServerHandle {
    /// Returns the bound address.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Returns the HTTP base URL for clients.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Signals graceful shutdown and waits for the serve loop to finish.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = (&mut self.join).await;
    }
}

// Intentionally no Drop impl: allow runtime shutdown to cleanly tear down servers.
