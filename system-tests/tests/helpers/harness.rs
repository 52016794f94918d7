// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Kantine Server Harness
// Description: Helpers for spawning Kantine servers in system-tests.
// Purpose: Provide deterministic server startup and teardown for tests.
// Dependencies: kantine-config, kantine-server, tokio
// ============================================================================

use std::net::SocketAddr;
use std::net::TcpListener;
use std::path::Path;

use kantine_config::KantineConfig;
use kantine_config::ServerConfig;
use kantine_config::StoreConfig;
use kantine_config::StoreMode;
use kantine_server::KantineServer;
use kantine_server::ServerHandle;

use super::readiness::wait_for_server_ready;

/// Returns a free loopback address for test servers.
pub fn allocate_bind_addr() -> Result<SocketAddr, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("failed to bind loopback: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("failed to read listener address: {err}"))?;
    drop(listener);
    Ok(addr)
}

/// Builds a base Kantine config over the in-memory store.
pub fn base_config(bind: &str) -> KantineConfig {
    KantineConfig {
        server: ServerConfig {
            bind: bind.to_string(),
            max_body_bytes: 1024 * 1024,
            max_sessions: 256,
        },
        store: StoreConfig {
            mode: StoreMode::Memory,
            path: None,
        },
    }
}

/// Builds a base Kantine config over a SQLite store at `path`.
pub fn sqlite_config(bind: &str, path: &Path) -> KantineConfig {
    let mut config = base_config(bind);
    config.store = StoreConfig {
        mode: StoreMode::Sqlite,
        path: Some(path.display().to_string()),
    };
    config
}

/// Spawns a server for the config and waits until it answers health checks.
pub async fn spawn_server(config: KantineConfig) -> Result<ServerHandle, String> {
    let server = KantineServer::from_config(config).map_err(|err| err.to_string())?;
    let handle = server.spawn().await.map_err(|err| err.to_string())?;
    wait_for_server_ready(&handle.base_url()).await?;
    Ok(handle)
}

/// Spawns a server on a fresh loopback port over the in-memory store.
pub async fn spawn_memory_server() -> Result<ServerHandle, String> {
    let bind = allocate_bind_addr()?;
    spawn_server(base_config(&bind.to_string())).await
}
