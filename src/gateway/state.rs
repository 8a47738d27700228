use std::sync::Arc;

use crate::engine::TransferEngine;
use crate::store::LedgerStore;

/// Shared gateway application state
#[derive(Clone)]
pub struct AppState {
    /// Transfer engine (validation, locking, balance movement)
    pub engine: Arc<TransferEngine>,
    /// Ledger store (account lifecycle: seeding, mock endpoint)
    pub store: Arc<LedgerStore>,
}

impl AppState {
    pub fn new(engine: Arc<TransferEngine>, store: Arc<LedgerStore>) -> Self {
        Self { engine, store }
    }
}
