// crates/kantine-config/src/lib.rs
// ============================================================================
// Module: Kantine Config Library
// Description: Canonical TOML configuration model with fail-closed validation.
// Purpose: Give the server and CLI one validated configuration source.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration loads from a TOML file (or falls back to defaults), then
//! validates fail-closed: bad bind addresses, oversized bodies, or a missing
//! store path reject the whole config. Loading guards the file itself too:
//! path length, file size, and UTF-8 encoding are checked before parsing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum length of a single config path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total config path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum config file size in bytes.
const MAX_CONFIG_BYTES: u64 = 1_048_576;
/// Default bind address.
const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default maximum request body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 1_048_576;
/// Hard upper bound for the request body size limit.
const MAX_BODY_BYTES_CEILING: usize = 16 * 1_048_576;
/// Default maximum number of live sessions.
const DEFAULT_MAX_SESSIONS: usize = 4_096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config path exceeds the supported length.
    #[error("config path exceeds max length")]
    PathTooLong,
    /// A config path component exceeds the supported length.
    #[error("config path component too long")]
    PathComponentTooLong,
    /// The config file could not be read.
    #[error("config file read failed: {0}")]
    Read(String),
    /// The config file exceeds the size limit.
    #[error("config file exceeds size limit")]
    FileTooLarge,
    /// The config file is not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// The config file is not valid TOML for this schema.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// A validated field holds an unacceptable value.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Server Section
// ============================================================================

/// HTTP server section.
///
/// # Invariants
/// - `bind` parses as a socket address.
/// - `max_body_bytes` stays within the documented ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address, host:port.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Maximum number of live session tokens.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            max_sessions: default_max_sessions(),
        }
    }
}

/// Default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Default request body size limit.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Default live session limit.
const fn default_max_sessions() -> usize {
    DEFAULT_MAX_SESSIONS
}

// ============================================================================
// SECTION: Store Section
// ============================================================================

/// Ledger store backend selection.
///
/// # Invariants
/// - Variants are stable for serialization and contract matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreMode {
    /// In-memory store; state is lost on shutdown.
    Memory,
    /// Durable SQLite snapshot store.
    Sqlite,
}

/// Ledger store section.
///
/// # Invariants
/// - `path` is required exactly when `mode` is [`StoreMode::Sqlite`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// Selected backend.
    #[serde(default = "default_store_mode")]
    pub mode: StoreMode,
    /// SQLite database path for the sqlite backend.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: default_store_mode(),
            path: None,
        }
    }
}

/// Default store backend.
const fn default_store_mode() -> StoreMode {
    StoreMode::Memory
}

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root Kantine configuration.
///
/// # Invariants
/// - A successfully loaded config has passed [`KantineConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KantineConfig {
    /// HTTP server section.
    #[serde(default)]
    pub server: ServerConfig,
    /// Ledger store section.
    #[serde(default)]
    pub store: StoreConfig,
}

impl KantineConfig {
    /// Loads and validates a config file, or defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the path, file, encoding, TOML shape, or
    /// field values are unacceptable.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        };
        validate_path(path)?;
        let metadata = fs::metadata(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::FileTooLarge);
        }
        let bytes = fs::read(path).map_err(|err| ConfigError::Read(err.to_string()))?;
        let text = str::from_utf8(&bytes).map_err(|_| ConfigError::NotUtf8)?;
        Self::parse(text)
    }

    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates field values fail-closed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            )));
        }
        if self.server.max_body_bytes == 0 || self.server.max_body_bytes > MAX_BODY_BYTES_CEILING {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes out of range".to_string(),
            ));
        }
        if self.server.max_sessions == 0 {
            return Err(ConfigError::Invalid("server.max_sessions must be positive".to_string()));
        }
        match self.store.mode {
            StoreMode::Memory => {}
            StoreMode::Sqlite => {
                let path_ok =
                    self.store.path.as_ref().is_some_and(|path| !path.trim().is_empty());
                if !path_ok {
                    return Err(ConfigError::Invalid(
                        "store.path required for sqlite mode".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Path Guards
// ============================================================================

/// Validates config path length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let raw = path.as_os_str();
    if raw.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::PathTooLong);
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::PathComponentTooLong);
        }
    }
    Ok(())
}
