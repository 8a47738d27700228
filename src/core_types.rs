//! Core types used throughout the system
//!
//! Fundamental type aliases shared by all modules. They carry semantic
//! meaning and leave room for future type evolution.

/// Account ID - globally unique identifier for a balance-holding account.
///
/// # Constraints:
/// - **Immutable**: Once assigned, NEVER changes
/// - **Totally ordered**: the natural `u64` order drives the lock
///   acquisition protocol in the transfer engine
pub type AccountId = u64;

/// Transfer ID - unique within the system, assigned by the transaction log.
pub type TransferId = u64;
