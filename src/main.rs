// Launchpad - bookmark groups for captured sessions
//
// Captured network sessions are organized into a user-editable tree of named
// groups. Sessions are dragged into groups, renamed through an alias stored
// on the session itself, and sent on to compose or the browser.
//
// Architecture:
// - Core (tree, dragdrop, rename, alias, menu): the tree interaction model
// - Launchpad view + extension: routes input, hooks into the host lifecycle
// - Host (tui): tab strip, captured session list, terminal rendering
// - Session feed: capture file and/or demo task over an mpsc channel

mod actions;
mod alias;
mod cli;
mod config;
mod demo;
mod dispatch;
mod dragdrop;
mod error;
mod extension;
mod host;
mod launchpad;
mod logging;
mod menu;
mod rename;
mod session;
mod tree;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use config::Config;
use logging::LogBuffer;
use session::SessionStore;
use tokio::sync::{mpsc, oneshot};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            print_config_error(&e);
            std::process::exit(1);
        }
    };
    cli.apply(&mut config);

    // Logs go to the TUI buffer (and optionally a file), never to stdout
    let log_buffer = LogBuffer::new();
    let _file_guard = logging::init(&config.logging, &log_buffer)?;

    tracing::info!(version = config::VERSION, "Launchpad starting");

    let mut store = SessionStore::new();
    if let Some(path) = &config.sessions_file {
        store.load_jsonl(path)?;
    }

    let (session_tx, session_rx) = mpsc::channel(256);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let demo_handle = if config.demo_mode {
        tracing::info!("Demo mode: generating sessions");
        Some(tokio::spawn(demo::run_demo(session_tx, shutdown_rx)))
    } else {
        drop(session_tx);
        None
    };

    let result = tui::run_tui(session_rx, store, log_buffer, config).await;

    let _ = shutdown_tx.send(());
    if let Some(handle) = demo_handle {
        let _ = handle.await;
    }

    tracing::info!("Launchpad stopped");
    result
}

/// Explain a config that exists but can't be loaded; the caller exits
fn print_config_error(e: &anyhow::Error) {
    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
    eprintln!("║  CONFIG ERROR - Failed to load configuration file           ║");
    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
    eprintln!("  Error: {:#}\n", e);
    eprintln!("  Tip: Check for:\n");
    eprintln!("    - Missing quotes around string values");
    eprintln!("    - Invalid boolean values (use true/false)");
    eprintln!("    - Typos in key or section names\n");
    eprintln!("  To reset, run `launchpad config --reset`.\n");
}
