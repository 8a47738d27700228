//! Transaction Log - append-only record of completed transfers
//!
//! Every successful transfer appends exactly one immutable record. Records
//! are never mutated or deleted; identifiers come from an atomic sequence
//! and are therefore unique, previously unused, and monotonically
//! increasing.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::core_types::{AccountId, TransferId};

/// Immutable record of one completed transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRecord {
    pub id: TransferId,
    pub from_account: AccountId,
    pub to_account: AccountId,
    pub amount: Decimal,
    /// Assigned at append time.
    pub timestamp: DateTime<Utc>,
}

/// Append-only store of completed transfers, keyed by assigned id.
pub struct TransactionLog {
    records: DashMap<TransferId, TransferRecord>,
    id_seq: AtomicU64,
}

impl Default for TransactionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLog {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            id_seq: AtomicU64::new(1),
        }
    }

    /// Append a new record, assigning its id and timestamp.
    pub fn append(
        &self,
        from_account: AccountId,
        to_account: AccountId,
        amount: Decimal,
    ) -> TransferRecord {
        let record = TransferRecord {
            id: self.id_seq.fetch_add(1, Ordering::SeqCst),
            from_account,
            to_account,
            amount,
            timestamp: Utc::now(),
        };
        self.records.insert(record.id, record.clone());
        record
    }

    /// Single-record lookup by assigned id.
    pub fn get(&self, id: TransferId) -> Option<TransferRecord> {
        self.records.get(&id).map(|entry| entry.value().clone())
    }

    /// Total number of records appended
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn append_assigns_monotonic_unique_ids() {
        let log = TransactionLog::new();
        let first = log.append(1, 2, dec("100.00"));
        let second = log.append(2, 1, dec("50.00"));
        assert!(second.id > first.id);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn get_returns_appended_record() {
        let log = TransactionLog::new();
        let record = log.append(7, 8, dec("0.10"));
        let fetched = log.get(record.id).unwrap();
        assert_eq!(fetched, record);
        assert_eq!(fetched.from_account, 7);
        assert_eq!(fetched.to_account, 8);
        assert_eq!(fetched.amount, dec("0.10"));
        assert!(log.get(record.id + 1).is_none());
    }
}
