//! Transfer Engine - atomic two-account balance movement
//!
//! The single correctness-critical algorithm in the system is the
//! total-order locking protocol: any two transfers whose account pairs
//! overlap acquire the shared accounts' locks in the same relative order
//! (ascending account id), regardless of which side is source and which is
//! destination. No cycle can form in the wait-for graph, so deadlock is
//! impossible by construction. Transfers over disjoint account pairs share
//! no locks and run fully in parallel.
//!
//! All money arithmetic is exact `Decimal`; no floating point anywhere on
//! the balance path.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::core_types::AccountId;
use crate::error::TransferError;
use crate::journal::{TransactionLog, TransferRecord};
use crate::store::LedgerStore;

/// Default bound on how long a transfer may wait for an account lock.
pub const DEFAULT_LOCK_WAIT: Duration = Duration::from_millis(5000);

/// Transfer request body.
///
/// Fields are optional at the deserialization layer; presence is part of
/// request validation, which lives in the engine so every caller gets the
/// same checks before any lock is taken.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Source account id
    pub from_id: Option<AccountId>,
    /// Destination account id
    pub to_id: Option<AccountId>,
    /// Amount to move; must be strictly positive
    pub amount: Option<Decimal>,
}

/// Map an unordered pair of account ids to the globally consistent lock
/// acquisition order. Pure function of the ids, independent of which is
/// source and which is destination.
#[inline]
pub fn lock_order(a: AccountId, b: AccountId) -> (AccountId, AccountId) {
    if a < b { (a, b) } else { (b, a) }
}

/// Orchestrates a single money movement between two accounts.
pub struct TransferEngine {
    store: Arc<LedgerStore>,
    journal: Arc<TransactionLog>,
    lock_wait: Duration,
}

impl TransferEngine {
    pub fn new(store: Arc<LedgerStore>, journal: Arc<TransactionLog>) -> Self {
        Self::with_lock_wait(store, journal, DEFAULT_LOCK_WAIT)
    }

    /// Engine with an explicit lock-wait bound (config-driven).
    pub fn with_lock_wait(
        store: Arc<LedgerStore>,
        journal: Arc<TransactionLog>,
        lock_wait: Duration,
    ) -> Self {
        Self {
            store,
            journal,
            lock_wait,
        }
    }

    /// Execute one transfer: validate, lock both accounts in id order,
    /// check sufficiency, move the balance, append the journal record.
    ///
    /// Either both balance writes and the log append happen, or none do;
    /// every failure path exits before the first write. Locks are released
    /// by guard drop on every exit path.
    pub async fn transfer(&self, req: TransferRequest) -> Result<TransferRecord, TransferError> {
        // Validation happens before any lock is taken.
        let (from_id, to_id) = match (req.from_id, req.to_id) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(TransferError::InvalidRequest(
                    "Account IDs must not be null",
                ));
            }
        };

        let amount = match req.amount {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => {
                return Err(TransferError::InvalidRequest(
                    "Transfer amount must be greater than zero",
                ));
            }
        };

        if from_id == to_id {
            return Err(TransferError::InvalidRequest(
                "Source and destination accounts cannot be the same",
            ));
        }

        // Acquire locks in consistent id order to prevent deadlocks when
        // concurrent transfers operate on the same pair of accounts.
        let (low, high) = lock_order(from_id, to_id);
        let (_low_guard, low_account) = self.store.locked_lookup(low, self.lock_wait).await?;
        let (_high_guard, high_account) = self.store.locked_lookup(high, self.lock_wait).await?;

        // The locked reads are authoritative: both locks are held, so no
        // concurrent transfer can mutate either account. Map them back to
        // source/destination roles; no re-read outside the lock scope.
        let (mut from_account, mut to_account) = if from_id == low {
            (low_account, high_account)
        } else {
            (high_account, low_account)
        };

        if from_account.balance < amount {
            return Err(TransferError::InsufficientFunds {
                account: from_id,
                balance: from_account.balance,
                amount,
            });
        }

        // Compute both new balances before writing either.
        let debited = from_account.balance.checked_sub(amount).ok_or_else(|| {
            TransferError::Unexpected(format!("debit overflow on account {}", from_id))
        })?;
        let credited = to_account.balance.checked_add(amount).ok_or_else(|| {
            TransferError::Unexpected(format!("credit overflow on account {}", to_id))
        })?;
        from_account.balance = debited;
        to_account.balance = credited;

        // Both writes and the journal append happen while both guards are
        // held, so no other transfer observes a partial application.
        self.store.save(from_account);
        self.store.save(to_account);
        let record = self.journal.append(from_id, to_id, amount);

        tracing::debug!(
            transfer_id = record.id,
            from = from_id,
            to = to_id,
            amount = %amount,
            "transfer committed"
        );

        Ok(record)
    }

    /// Current committed balance of an account.
    ///
    /// Plain read outside the locking protocol: it may race an in-flight
    /// transfer but never observes a partially applied single update.
    pub fn balance(&self, id: AccountId) -> Result<Decimal, TransferError> {
        Ok(self.store.lookup(id)?.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    struct Harness {
        engine: TransferEngine,
        journal: Arc<TransactionLog>,
        alice: AccountId,
        bob: AccountId,
    }

    /// Alice starts with 1000.00 and Bob with 500.00.
    fn setup() -> Harness {
        let store = Arc::new(LedgerStore::new());
        let journal = Arc::new(TransactionLog::new());
        let alice = store.create_account("Alice", dec("1000.00")).unwrap();
        let bob = store.create_account("Bob", dec("500.00")).unwrap();
        Harness {
            engine: TransferEngine::new(store, journal.clone()),
            journal,
            alice: alice.id,
            bob: bob.id,
        }
    }

    fn request(from: AccountId, to: AccountId, amount: &str) -> TransferRequest {
        TransferRequest {
            from_id: Some(from),
            to_id: Some(to),
            amount: Some(dec(amount)),
        }
    }

    #[test]
    fn lock_order_is_direction_independent() {
        assert_eq!(lock_order(1, 2), (1, 2));
        assert_eq!(lock_order(2, 1), (1, 2));
        assert_eq!(lock_order(7, 7), (7, 7));
    }

    #[tokio::test]
    async fn transfer_success() {
        let h = setup();
        let record = h
            .engine
            .transfer(request(h.alice, h.bob, "250.00"))
            .await
            .unwrap();

        assert_eq!(record.from_account, h.alice);
        assert_eq!(record.to_account, h.bob);
        assert_eq!(record.amount, dec("250.00"));

        assert_eq!(h.engine.balance(h.alice).unwrap(), dec("750.00"));
        assert_eq!(h.engine.balance(h.bob).unwrap(), dec("750.00"));
        assert_eq!(h.journal.get(record.id).unwrap(), record);
    }

    #[tokio::test]
    async fn transfer_preserves_total_balance() {
        let h = setup();
        let total_before =
            h.engine.balance(h.alice).unwrap() + h.engine.balance(h.bob).unwrap();

        h.engine
            .transfer(request(h.alice, h.bob, "100.00"))
            .await
            .unwrap();
        h.engine
            .transfer(request(h.bob, h.alice, "50.00"))
            .await
            .unwrap();

        let total_after =
            h.engine.balance(h.alice).unwrap() + h.engine.balance(h.bob).unwrap();
        assert_eq!(total_before, total_after);
        assert_eq!(h.engine.balance(h.alice).unwrap(), dec("950.00"));
        assert_eq!(h.engine.balance(h.bob).unwrap(), dec("550.00"));
    }

    #[tokio::test]
    async fn transfer_exact_balance_leaves_zero() {
        let h = setup();
        h.engine
            .transfer(request(h.alice, h.bob, "1000.00"))
            .await
            .unwrap();

        assert_eq!(h.engine.balance(h.alice).unwrap(), Decimal::ZERO);
        assert_eq!(h.engine.balance(h.bob).unwrap(), dec("1500.00"));
    }

    #[tokio::test]
    async fn insufficient_funds_leaves_balances_untouched() {
        let h = setup();
        let err = h
            .engine
            .transfer(request(h.alice, h.bob, "1500.00"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            TransferError::InsufficientFunds {
                account: h.alice,
                balance: dec("1000.00"),
                amount: dec("1500.00"),
            }
        );
        assert_eq!(h.engine.balance(h.alice).unwrap(), dec("1000.00"));
        assert_eq!(h.engine.balance(h.bob).unwrap(), dec("500.00"));
        assert!(h.journal.is_empty());
    }

    #[tokio::test]
    async fn missing_amount_rejected() {
        let h = setup();
        let err = h
            .engine
            .transfer(TransferRequest {
                from_id: Some(h.alice),
                to_id: Some(h.bob),
                amount: None,
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransferError::InvalidRequest("Transfer amount must be greater than zero")
        );
        assert!(h.journal.is_empty());
    }

    #[tokio::test]
    async fn zero_amount_rejected() {
        let h = setup();
        let err = h
            .engine
            .transfer(request(h.alice, h.bob, "0.00"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn negative_amount_rejected() {
        let h = setup();
        let err = h
            .engine
            .transfer(request(h.alice, h.bob, "-100.00"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransferError::InvalidRequest(_)));
        assert_eq!(h.engine.balance(h.alice).unwrap(), dec("1000.00"));
    }

    #[tokio::test]
    async fn same_account_rejected() {
        let h = setup();
        let err = h
            .engine
            .transfer(request(h.alice, h.alice, "100.00"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            TransferError::InvalidRequest("Source and destination accounts cannot be the same")
        );
    }

    #[tokio::test]
    async fn missing_from_id_rejected() {
        let h = setup();
        let err = h
            .engine
            .transfer(TransferRequest {
                from_id: None,
                to_id: Some(h.bob),
                amount: Some(dec("100.00")),
            })
            .await
            .unwrap_err();
        assert_eq!(err, TransferError::InvalidRequest("Account IDs must not be null"));
    }

    #[tokio::test]
    async fn missing_to_id_rejected() {
        let h = setup();
        let err = h
            .engine
            .transfer(TransferRequest {
                from_id: Some(h.alice),
                to_id: None,
                amount: Some(dec("100.00")),
            })
            .await
            .unwrap_err();
        assert_eq!(err, TransferError::InvalidRequest("Account IDs must not be null"));
    }

    #[tokio::test]
    async fn nonexistent_from_account() {
        let h = setup();
        let err = h
            .engine
            .transfer(request(9999, h.bob, "100.00"))
            .await
            .unwrap_err();
        assert_eq!(err, TransferError::AccountNotFound(9999));
        assert_eq!(h.engine.balance(h.bob).unwrap(), dec("500.00"));
        assert!(h.journal.is_empty());
    }

    #[tokio::test]
    async fn nonexistent_to_account() {
        let h = setup();
        let err = h
            .engine
            .transfer(request(h.alice, 9999, "100.00"))
            .await
            .unwrap_err();
        assert_eq!(err, TransferError::AccountNotFound(9999));
        assert_eq!(h.engine.balance(h.alice).unwrap(), dec("1000.00"));
        assert!(h.journal.is_empty());
    }

    #[tokio::test]
    async fn decimal_precision_survives_small_transfers() {
        // 0.1 + 0.2 style operations must not lose precision.
        let h = setup();
        h.engine
            .transfer(request(h.alice, h.bob, "0.10"))
            .await
            .unwrap();
        h.engine
            .transfer(request(h.alice, h.bob, "0.20"))
            .await
            .unwrap();

        assert_eq!(h.engine.balance(h.alice).unwrap(), dec("999.70"));
        assert_eq!(h.engine.balance(h.bob).unwrap(), dec("500.30"));
    }

    #[tokio::test]
    async fn balance_of_unknown_account() {
        let h = setup();
        assert_eq!(
            h.engine.balance(9999),
            Err(TransferError::AccountNotFound(9999))
        );
    }

    #[tokio::test]
    async fn journal_ids_increase_across_transfers() {
        let h = setup();
        let first = h
            .engine
            .transfer(request(h.alice, h.bob, "1.00"))
            .await
            .unwrap();
        let second = h
            .engine
            .transfer(request(h.bob, h.alice, "1.00"))
            .await
            .unwrap();
        assert!(second.id > first.id);
        assert!(second.timestamp >= first.timestamp);
        assert_eq!(h.journal.len(), 2);
    }
}
