//! CSV I/O - Load account fixtures from CSV files
//!
//! Startup seeding only; accounts are created externally to the transfer
//! engine and never deleted in scope.

use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{Context, Result};
use rust_decimal::Decimal;

use crate::core_types::AccountId;
use crate::models::Account;
use crate::store::LedgerStore;

pub const ACCOUNTS_INIT_CSV: &str = "fixtures/accounts.csv";

/// Load accounts from a CSV file into the store.
///
/// Format: `account_id,owner,balance` with a header row.
pub fn load_accounts(store: &LedgerStore, path: &str) -> Result<usize> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    let reader = BufReader::new(file);
    let mut count = 0;

    for (line_num, line) in reader.lines().skip(1).enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() >= 3 {
            let id: AccountId = parts[0]
                .trim()
                .parse()
                .with_context(|| format!("Invalid account_id at line {}", line_num + 2))?;
            let balance: Decimal = parts[2]
                .trim()
                .parse()
                .with_context(|| format!("Invalid balance at line {}", line_num + 2))?;
            store
                .insert_account(Account {
                    id,
                    owner: parts[1].trim().to_string(),
                    balance,
                })
                .with_context(|| format!("Rejected account at line {}", line_num + 2))?;
            count += 1;
        }
    }

    tracing::info!("Loaded {} accounts from {}", count, path);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::str::FromStr;

    #[test]
    fn loads_accounts_from_fixture() {
        let dir = std::env::temp_dir().join("atomic_ledger_csv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("accounts.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "account_id,owner,balance").unwrap();
        writeln!(file, "1,Alice,1000.00").unwrap();
        writeln!(file, "2,Bob,500.00").unwrap();
        writeln!(file).unwrap();

        let store = LedgerStore::new();
        let loaded = load_accounts(&store, path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, 2);
        assert_eq!(
            store.lookup(1).unwrap().balance,
            Decimal::from_str("1000.00").unwrap()
        );
        assert_eq!(store.lookup(2).unwrap().owner, "Bob");
    }

    #[test]
    fn missing_file_is_an_error() {
        let store = LedgerStore::new();
        assert!(load_accounts(&store, "no/such/fixture.csv").is_err());
    }
}
