//! Ledger trait definition.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Participant account identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new random account ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from ledger operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("unknown account: {0}")]
    UnknownAccount(AccountId),

    #[error("insufficient funds: needed {needed}, available {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("account {0} cannot receive funds")]
    AccountFrozen(AccountId),
}

/// Trait for value custody operations.
///
/// Implementations must apply each call atomically: a `debit` or `credit`
/// either fully happens or fails with no balance change. The escrow state
/// machine relies on that to keep escrowed value conserved.
pub trait Ledger: Send + Sync {
    /// Current balance of an account
    fn balance(&self, account: &AccountId) -> Result<u64, LedgerError>;

    /// Withdraw `amount` from an account (stake moving into escrow)
    fn debit(&self, account: &AccountId, amount: u64) -> Result<(), LedgerError>;

    /// Deposit `amount` into an account (escrow paying out)
    fn credit(&self, account: &AccountId, amount: u64) -> Result<(), LedgerError>;
}
