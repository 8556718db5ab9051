//! Application state management.

use rps_escrow_core::{AccountId, MatchRegistry, MockLedger};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Registered account metadata
#[derive(Clone, Debug)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: MatchRegistry,
    pub ledger: MockLedger,
    accounts: Arc<Mutex<HashMap<AccountId, Account>>>,
    /// Starting balance granted to every new account
    faucet_amount: u64,
}

impl AppState {
    /// Create new state with the given faucet amount
    pub fn new(faucet_amount: u64) -> Self {
        Self {
            registry: MatchRegistry::new(),
            ledger: MockLedger::new(),
            accounts: Arc::new(Mutex::new(HashMap::new())),
            faucet_amount,
        }
    }

    /// Open a ledger account funded by the faucet and record its name
    pub fn register_account(&self, name: String) -> Account {
        let id = self.ledger.open_account(self.faucet_amount);
        let account = Account { id, name };
        self.accounts.lock().unwrap().insert(id, account.clone());
        account
    }

    pub fn get_account(&self, id: &AccountId) -> Option<Account> {
        self.accounts.lock().unwrap().get(id).cloned()
    }

    pub fn get_account_by_name(&self, name: &str) -> Option<Account> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.name == name)
            .cloned()
    }

    pub fn list_accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> =
            self.accounts.lock().unwrap().values().cloned().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        accounts
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1000)
    }
}
