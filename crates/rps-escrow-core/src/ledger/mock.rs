//! In-memory ledger for testing and demos.

use super::traits::{AccountId, Ledger, LedgerError};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory ledger backed by a balance map.
///
/// Cloning shares the underlying accounts, so a clone handed to a match
/// observes the same balances as the original.
#[derive(Clone, Default)]
pub struct MockLedger {
    /// Map of account -> balance
    balances: Arc<Mutex<HashMap<AccountId, u64>>>,
    /// Accounts whose receiving path is broken (for payout-failure tests)
    frozen: Arc<Mutex<HashSet<AccountId>>>,
}

impl MockLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh account with the given starting balance
    pub fn open_account(&self, initial_balance: u64) -> AccountId {
        let account = AccountId::new();
        self.balances.lock().unwrap().insert(account, initial_balance);
        account
    }

    /// Make credits to the account fail, simulating a recipient whose
    /// receiving path is broken
    pub fn freeze(&self, account: &AccountId) {
        self.frozen.lock().unwrap().insert(*account);
    }

    /// Restore the account's receiving path
    pub fn unfreeze(&self, account: &AccountId) {
        self.frozen.lock().unwrap().remove(account);
    }

    /// Sum of all balances (for conservation checks in tests)
    pub fn total_supply(&self) -> u64 {
        self.balances.lock().unwrap().values().sum()
    }
}

impl Ledger for MockLedger {
    fn balance(&self, account: &AccountId) -> Result<u64, LedgerError> {
        self.balances
            .lock()
            .unwrap()
            .get(account)
            .copied()
            .ok_or(LedgerError::UnknownAccount(*account))
    }

    fn debit(&self, account: &AccountId, amount: u64) -> Result<(), LedgerError> {
        let mut balances = self.balances.lock().unwrap();
        let balance = balances
            .get_mut(account)
            .ok_or(LedgerError::UnknownAccount(*account))?;

        if *balance < amount {
            return Err(LedgerError::InsufficientFunds {
                needed: amount,
                available: *balance,
            });
        }

        *balance -= amount;
        Ok(())
    }

    fn credit(&self, account: &AccountId, amount: u64) -> Result<(), LedgerError> {
        if self.frozen.lock().unwrap().contains(account) {
            return Err(LedgerError::AccountFrozen(*account));
        }

        let mut balances = self.balances.lock().unwrap();
        let balance = balances
            .get_mut(account)
            .ok_or(LedgerError::UnknownAccount(*account))?;

        *balance += amount;
        Ok(())
    }
}
