//! atomic-ledger - Atomic two-account transfer engine
//!
//! Moves money between two accounts atomically and reports balances.
//! Under concurrent access the engine guarantees no lost or double-counted
//! funds, no deadlocks between overlapping transfers, exact decimal
//! accounting, and a consistent per-account view to any reader.
//!
//! # Modules
//!
//! - [`core_types`] - Core type definitions (AccountId, TransferId)
//! - [`models`] - Account model
//! - [`error`] - Transfer failure taxonomy
//! - [`store`] - Ledger store (keyed accounts + per-account locks)
//! - [`engine`] - Transfer engine (validation, ordered locking, movement)
//! - [`journal`] - Append-only transaction log
//! - [`gateway`] - HTTP layer (axum)
//! - [`config`] - YAML application config
//! - [`logging`] - tracing setup
//! - [`csv_io`] - Account fixture loading

// Core types - must be first!
pub mod core_types;

pub mod config;
pub mod csv_io;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod journal;
pub mod logging;
pub mod models;
pub mod store;

// Convenient re-exports at crate root
pub use core_types::{AccountId, TransferId};
pub use engine::{TransferEngine, TransferRequest, lock_order};
pub use error::TransferError;
pub use journal::{TransactionLog, TransferRecord};
pub use models::Account;
pub use store::{AccountGuard, LedgerStore};
