//! Match rules and the escrow state machine.

mod choice;
mod error;
mod escrow;

pub use choice::{Choice, Outcome};
pub use error::MatchError;
pub use escrow::{EscrowMatch, MatchState, MatchView};
