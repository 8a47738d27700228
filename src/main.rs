//! atomic-ledger - service entry point
//!
//! Boot sequence: config -> logging -> store (seeded from fixture) ->
//! engine -> gateway.

use std::sync::Arc;
use std::time::Duration;

use atomic_ledger::config::AppConfig;
use atomic_ledger::engine::TransferEngine;
use atomic_ledger::gateway::{self, state::AppState};
use atomic_ledger::journal::TransactionLog;
use atomic_ledger::store::LedgerStore;
use atomic_ledger::{csv_io, logging};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);
    let _log_guard = logging::init_logging(&config);

    tracing::info!("Starting atomic-ledger in {} mode", env);

    let store = Arc::new(LedgerStore::new());
    if let Some(path) = &config.accounts_file {
        csv_io::load_accounts(&store, path)?;
    }

    let journal = Arc::new(TransactionLog::new());
    let engine = Arc::new(TransferEngine::with_lock_wait(
        store.clone(),
        journal,
        Duration::from_millis(config.engine.lock_wait_ms),
    ));

    let state = Arc::new(AppState::new(engine, store));
    let port = get_port_override().unwrap_or(config.gateway.port);
    gateway::run_server(&config.gateway.host, port, state).await
}
