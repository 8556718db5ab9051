//! Escrow match state machine.
//!
//! One `EscrowMatch` owns a single match's lifecycle: funds custody, state
//! transitions, outcome computation, and payout. Every operation validates
//! fully before mutating anything, so a rejected call leaves the match
//! byte-identical to its prior state.
//!
//! Known gap carried over from the original protocol: there is no timeout or
//! forfeiture path. An initiator who opens, gets a join, and then never
//! reveals leaves both stakes escrowed indefinitely.

use super::choice::{Choice, Outcome};
use super::error::MatchError;
use crate::crypto::Commitment;
use crate::ledger::{AccountId, Ledger};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Lifecycle state of a match.
///
/// Progression is strictly AwaitingCommit → AwaitingJoin → AwaitingReveal →
/// Resolved; there are no backward or skipped transitions, and a Resolved
/// match is permanently inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    AwaitingCommit,
    AwaitingJoin,
    AwaitingReveal,
    Resolved,
}

/// A single escrowed rock/paper/scissors match.
#[derive(Clone, Debug)]
pub struct EscrowMatch {
    initiator: AccountId,
    responder: Option<AccountId>,
    wager: u64,
    commitment: Option<Commitment>,
    initiator_choice: Option<Choice>,
    responder_choice: Option<Choice>,
    state: MatchState,
    outcome: Outcome,
    escrowed: u64,
}

impl EscrowMatch {
    /// Create a fresh match owned by `initiator`, awaiting its commitment
    pub fn new(initiator: AccountId) -> Self {
        Self {
            initiator,
            responder: None,
            wager: 0,
            commitment: None,
            initiator_choice: None,
            responder_choice: None,
            state: MatchState::AwaitingCommit,
            outcome: Outcome::Undetermined,
            escrowed: 0,
        }
    }

    /// Open the match: store the initiator's commitment and stake the wager.
    ///
    /// The wager is debited from the caller's ledger account; a failed debit
    /// rejects the operation with no match change.
    pub fn open(
        &mut self,
        caller: AccountId,
        commitment: Commitment,
        value: u64,
        ledger: &dyn Ledger,
    ) -> Result<(), MatchError> {
        if self.state != MatchState::AwaitingCommit {
            return Err(MatchError::InvalidState(self.state));
        }
        if caller != self.initiator {
            return Err(MatchError::Unauthorized);
        }
        if value == 0 {
            return Err(MatchError::ZeroWager);
        }

        ledger.debit(&caller, value)?;

        self.commitment = Some(commitment);
        self.wager = value;
        self.escrowed = value;
        self.state = MatchState::AwaitingJoin;

        info!(initiator = %self.initiator, wager = value, "match opened");
        Ok(())
    }

    /// Join the match with an open choice and a matching stake.
    ///
    /// The caller must not be the initiator (no self-play) and must attach
    /// exactly the wager.
    pub fn join(
        &mut self,
        caller: AccountId,
        choice: Choice,
        value: u64,
        ledger: &dyn Ledger,
    ) -> Result<(), MatchError> {
        if self.state != MatchState::AwaitingJoin {
            return Err(MatchError::InvalidState(self.state));
        }
        if caller == self.initiator {
            return Err(MatchError::Unauthorized);
        }
        if value != self.wager {
            return Err(MatchError::WrongValue {
                wager: self.wager,
                attached: value,
            });
        }

        ledger.debit(&caller, value)?;

        self.responder = Some(caller);
        self.responder_choice = Some(choice);
        self.escrowed += value;
        self.state = MatchState::AwaitingReveal;

        info!(responder = %caller, %choice, "responder joined");
        Ok(())
    }

    /// Reveal the initiator's choice, resolve the match, and pay out.
    ///
    /// Resolution and payout are one atomic unit. The match is marked
    /// Resolved with zero escrow *before* any credit is issued, so a
    /// recipient calling back in observes a terminal state; if a credit then
    /// fails, every effect (including prior credits) is rolled back and the
    /// match returns to AwaitingReveal, retryable.
    pub fn reveal(
        &mut self,
        caller: AccountId,
        choice: Choice,
        secret: &[u8],
        ledger: &dyn Ledger,
    ) -> Result<Outcome, MatchError> {
        if self.state != MatchState::AwaitingReveal {
            return Err(MatchError::InvalidState(self.state));
        }
        if caller != self.initiator {
            return Err(MatchError::Unauthorized);
        }
        // Both are invariantly set once we are in AwaitingReveal.
        let (Some(commitment), Some(responder), Some(responder_choice)) =
            (self.commitment, self.responder, self.responder_choice)
        else {
            return Err(MatchError::InvalidState(self.state));
        };
        if !commitment.verify(choice, secret) {
            warn!(initiator = %self.initiator, "reveal rejected: commitment mismatch");
            return Err(MatchError::CommitmentMismatch);
        }

        let outcome = Outcome::decide(choice, responder_choice);

        // Effects before transfer: any reentrant call during a credit must
        // already see a resolved match holding no value.
        let pot = self.escrowed;
        self.initiator_choice = Some(choice);
        self.outcome = outcome;
        self.escrowed = 0;
        self.state = MatchState::Resolved;

        if let Err(err) = self.pay_out(outcome, responder, pot, ledger) {
            self.initiator_choice = None;
            self.outcome = Outcome::Undetermined;
            self.escrowed = pot;
            self.state = MatchState::AwaitingReveal;
            warn!(error = %err, "payout failed, reveal rolled back");
            return Err(MatchError::Transfer(err));
        }

        info!(%choice, responder_choice = %responder_choice, ?outcome, "match resolved");
        Ok(outcome)
    }

    fn pay_out(
        &self,
        outcome: Outcome,
        responder: AccountId,
        pot: u64,
        ledger: &dyn Ledger,
    ) -> Result<(), crate::ledger::LedgerError> {
        match outcome {
            Outcome::InitiatorWins => ledger.credit(&self.initiator, pot),
            Outcome::ResponderWins => ledger.credit(&responder, pot),
            Outcome::Tie => {
                ledger.credit(&self.initiator, self.wager)?;
                if let Err(err) = ledger.credit(&responder, self.wager) {
                    // Reverse the first leg so the rollback is complete. The
                    // compensating debit pulls back value we just credited,
                    // so it cannot fail for lack of funds.
                    if let Err(undo) = ledger.debit(&self.initiator, self.wager) {
                        warn!(error = %undo, "failed to reverse tie refund");
                    }
                    return Err(err);
                }
                Ok(())
            }
            Outcome::Undetermined => Ok(()),
        }
    }

    /// Read-only snapshot of the match for display and wire transport
    pub fn view(&self) -> MatchView {
        MatchView {
            state: self.state,
            wager: self.wager,
            initiator: self.initiator,
            responder: self.responder,
            initiator_choice: self.initiator_choice,
            responder_choice: self.responder_choice,
            outcome: self.outcome,
            escrowed: self.escrowed,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    pub fn wager(&self) -> u64 {
        self.wager
    }

    pub fn initiator(&self) -> AccountId {
        self.initiator
    }

    pub fn responder(&self) -> Option<AccountId> {
        self.responder
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Value currently held by this match
    pub fn escrowed(&self) -> u64 {
        self.escrowed
    }
}

/// Serializable read-only view of a match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchView {
    pub state: MatchState,
    pub wager: u64,
    pub initiator: AccountId,
    pub responder: Option<AccountId>,
    pub initiator_choice: Option<Choice>,
    pub responder_choice: Option<Choice>,
    pub outcome: Outcome,
    pub escrowed: u64,
}
