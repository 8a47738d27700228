//! Ledger Store - keyed account storage with per-account exclusive locks
//!
//! Committed state lives in a `DashMap` keyed by account id, so every read
//! and write of a single account is atomic at the entry level: an unlocked
//! reader can race an in-flight transfer but never observes a half-written
//! balance. Exclusive access for the transfer path goes through a named-lock
//! registry holding one async mutex per account id - the in-memory
//! counterpart of a `SELECT ... FOR UPDATE` row lock.
//!
//! The lock registry and the account map are separate structures on purpose:
//! a `locked_lookup` blocks only against other locked accesses to the SAME
//! account, while plain `lookup` never blocks at all.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core_types::AccountId;
use crate::error::TransferError;
use crate::models::Account;

/// RAII guard for an account's exclusive lock.
///
/// Held for the entire locked section of a transfer; dropping it releases
/// the lock on every exit path, success or error.
pub type AccountGuard = OwnedMutexGuard<()>;

/// Keyed storage of accounts.
///
/// Accounts are created externally (startup seeding, mock endpoint, tests)
/// and never deleted in scope; only the transfer engine mutates balances,
/// and only while holding the account's lock.
pub struct LedgerStore {
    accounts: DashMap<AccountId, Account>,
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
    id_seq: AtomicU64,
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
            locks: DashMap::new(),
            id_seq: AtomicU64::new(1),
        }
    }

    /// Create an account with the next free id.
    pub fn create_account(
        &self,
        owner: impl Into<String>,
        balance: Decimal,
    ) -> Result<Account, TransferError> {
        let account = Account {
            id: self.id_seq.fetch_add(1, Ordering::SeqCst),
            owner: owner.into(),
            balance,
        };
        self.insert_account(account.clone())?;
        Ok(account)
    }

    /// Insert an account with an explicit id (fixture seeding).
    ///
    /// Keeps the id sequence ahead of the highest seeded id so later
    /// `create_account` calls never collide.
    pub fn insert_account(&self, account: Account) -> Result<(), TransferError> {
        if account.balance.is_sign_negative() {
            return Err(TransferError::InvalidRequest(
                "Account balance must not be negative",
            ));
        }
        self.id_seq.fetch_max(account.id + 1, Ordering::SeqCst);
        self.locks.entry(account.id).or_default();
        self.accounts.insert(account.id, account);
        Ok(())
    }

    /// Plain committed read. Never blocks; usable inside and outside a lock
    /// scope. The per-entry map guarantees the returned balance is never a
    /// torn value, though it may be superseded by an in-flight transfer.
    pub fn lookup(&self, id: AccountId) -> Result<Account, TransferError> {
        self.accounts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(TransferError::AccountNotFound(id))
    }

    /// Acquire the account's exclusive lock and return the current committed
    /// account alongside the guard.
    ///
    /// Blocks against any other `locked_lookup` on the same id until the
    /// guard is dropped. The wait is bounded: an expired wait is reported as
    /// `Unexpected`, never silently retried.
    pub async fn locked_lookup(
        &self,
        id: AccountId,
        wait: Duration,
    ) -> Result<(AccountGuard, Account), TransferError> {
        if !self.accounts.contains_key(&id) {
            return Err(TransferError::AccountNotFound(id));
        }
        // Clone the Arc out of the registry so no map shard guard is held
        // across the await below.
        let lock = Arc::clone(&self.locks.entry(id).or_default());
        let guard = tokio::time::timeout(wait, lock.lock_owned())
            .await
            .map_err(|_| {
                TransferError::Unexpected(format!(
                    "timed out waiting for lock on account {}",
                    id
                ))
            })?;
        // Re-read AFTER acquisition: this is the freshest committed value
        // and the one the balance decision must be based on.
        let account = self.lookup(id)?;
        Ok((guard, account))
    }

    /// Persist an account. Atomic with respect to concurrent readers.
    ///
    /// Caller must hold the account's lock; the transfer engine is the only
    /// mutation path in scope.
    pub fn save(&self, account: Account) {
        self.accounts.insert(account.id, account);
    }

    /// Sum of all committed balances (conservation checks).
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(|entry| entry.value().balance).sum()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
