//! Funds custody abstraction.
//!
//! The escrow state machine never touches balances directly; it moves value
//! through the [`Ledger`] trait so the host environment decides where value
//! actually lives. [`MockLedger`] is the in-memory implementation used by
//! tests and the demo service.

mod mock;
mod traits;

pub use mock::MockLedger;
pub use traits::{AccountId, Ledger, LedgerError};
