//! Match operation errors.

use super::escrow::MatchState;
use crate::ledger::LedgerError;
use thiserror::Error;

/// Errors from match operations.
///
/// Every variant is a rejection at the operation boundary: the match is left
/// exactly as it was and the caller may retry with corrected input. The one
/// exception in spirit is [`MatchError::Transfer`] during payout, which also
/// leaves the match untouched but signals that a recipient's receiving path
/// is broken rather than that the input was wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Caller does not hold the role the operation requires
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    /// Operation is not the one valid for the current state
    #[error("operation invalid in state {0:?}")]
    InvalidState(MatchState),

    /// Opening stake must be positive
    #[error("wager must be greater than zero")]
    ZeroWager,

    /// Joining stake must equal the wager exactly
    #[error("attached value {attached} does not match wager {wager}")]
    WrongValue { wager: u64, attached: u64 },

    /// Choice byte outside {1, 2, 3}
    #[error("invalid choice encoding: {0}")]
    InvalidChoice(u8),

    /// Revealed (choice, secret) does not hash to the stored commitment
    #[error("reveal does not match the stored commitment")]
    CommitmentMismatch,

    /// A ledger movement failed; no match state was changed
    #[error("ledger transfer failed: {0}")]
    Transfer(#[from] LedgerError),
}
