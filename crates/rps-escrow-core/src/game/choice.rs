//! Move encoding and the outcome rule.

use super::error::MatchError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rock/paper/scissors move.
///
/// Wire encoding is a single byte: 1=Rock, 2=Paper, 3=Scissors. Zero and
/// anything above 3 are invalid and rejected at decode, before the byte can
/// reach a commitment or a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Choice {
    Rock = 1,
    Paper = 2,
    Scissors = 3,
}

impl Choice {
    /// Decode from the wire byte
    pub fn from_byte(byte: u8) -> Result<Self, MatchError> {
        match byte {
            1 => Ok(Choice::Rock),
            2 => Ok(Choice::Paper),
            3 => Ok(Choice::Scissors),
            other => Err(MatchError::InvalidChoice(other)),
        }
    }

    /// Encode to the wire byte
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Check if this choice beats the other
    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Scissors, Choice::Paper)
                | (Choice::Paper, Choice::Rock)
        )
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Rock => write!(f, "Rock"),
            Choice::Paper => write!(f, "Paper"),
            Choice::Scissors => write!(f, "Scissors"),
        }
    }
}

/// Resolved result of a match
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Undetermined,
    InitiatorWins,
    ResponderWins,
    Tie,
}

impl Outcome {
    /// Decide the outcome from both revealed choices.
    ///
    /// Equivalent to `(initiator - responder) mod 3`: 0 is a tie, 1 means
    /// the initiator's choice dominates, 2 means the responder's does.
    pub fn decide(initiator: Choice, responder: Choice) -> Outcome {
        if initiator == responder {
            Outcome::Tie
        } else if initiator.beats(responder) {
            Outcome::InitiatorWins
        } else {
            Outcome::ResponderWins
        }
    }
}
