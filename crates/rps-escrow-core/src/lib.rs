//! RPS Escrow Core Library
//!
//! This crate provides the building blocks of a two-party wagering game
//! resolved by commit-reveal:
//! - Commitment scheme binding a player to a hidden choice
//! - Escrow match state machine (open, join, reveal, atomic payout)
//! - Ledger abstraction for funds custody
//! - Match registry for creating and discovering matches

pub mod crypto;
pub mod game;
pub mod ledger;
pub mod registry;

pub use crypto::{Commitment, Salt};
pub use game::{Choice, EscrowMatch, MatchError, MatchState, MatchView, Outcome};
pub use ledger::{AccountId, Ledger, LedgerError, MockLedger};
pub use registry::{MatchId, MatchRegistry};
