// crates/kantine-cli/src/main.rs
// ============================================================================
// Module: Kantine CLI Entry Point
// Description: Command dispatcher for running and checking the Kantine server.
// Purpose: Provide a safe, localized CLI for server and config workflows.
// Dependencies: clap, kantine-config, kantine-server, tokio
// ============================================================================

//! ## Overview
//! The Kantine CLI runs the HTTP server from a validated TOML config and
//! offers a standalone config check. Inputs are untrusted and validated
//! fail-closed before anything binds or opens a database.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use kantine_config::KantineConfig;
use kantine_server::KantineServer;

// ============================================================================
// SECTION: CLI Shapes
// ============================================================================

/// Kantine canteen ordering and billing server.
#[derive(Debug, Parser)]
#[command(name = "kantine", version, about = "Canteen ordering and billing server")]
struct Cli {
    /// Selected subcommand.
    #[command(subcommand)]
    command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until interrupted.
    Serve {
        /// Path to the TOML config file; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate a config file and exit.
    CheckConfig {
        /// Path to the TOML config file; defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            emit_error(&message);
            ExitCode::FAILURE
        }
    }
}

/// Dispatches the parsed command.
fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Command::Serve { config } => serve(config.as_deref()),
        Command::CheckConfig { config } => {
            KantineConfig::load(config.as_deref()).map_err(|err| err.to_string())?;
            emit("config ok");
            Ok(())
        }
    }
}

/// Loads config, spawns the server, and waits for interruption.
fn serve(config_path: Option<&std::path::Path>) -> Result<(), String> {
    let config = KantineConfig::load(config_path).map_err(|err| err.to_string())?;
    let server = KantineServer::from_config(config).map_err(|err| err.to_string())?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| err.to_string())?;
    runtime.block_on(async move {
        let handle = server.spawn().await.map_err(|err| err.to_string())?;
        emit(&format!("listening on {}", handle.base_url()));
        tokio::signal::ctrl_c().await.map_err(|err| err.to_string())?;
        handle.shutdown().await;
        Ok(())
    })
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes one status line to stdout.
#[expect(clippy::print_stdout, reason = "CLI status output is the user interface.")]
fn emit(message: &str) {
    println!("{message}");
}

/// Writes one error line to stderr.
#[expect(clippy::print_stderr, reason = "CLI error output is the user interface.")]
fn emit_error(message: &str) {
    eprintln!("error: {message}");
}
