//! Commitment and Salt for the commit-reveal scheme.

use crate::game::Choice;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Fixed width of the secret portion of the commitment preimage.
pub const SECRET_WIDTH: usize = 32;

/// Secret for the commitment scheme.
///
/// A convenience for callers who want a full-entropy secret; `Commitment`
/// itself accepts arbitrary secret bytes and normalizes them (see
/// [`Commitment::new`]).
#[derive(Clone, Serialize, Deserialize)]
pub struct Salt([u8; SECRET_WIDTH]);

impl Salt {
    /// Create a new random salt
    pub fn random() -> Self {
        let mut bytes = [0u8; SECRET_WIDTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SECRET_WIDTH]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; SECRET_WIDTH] {
        &self.0
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", hex::encode(&self.0[..8]))
    }
}

/// Normalize arbitrary secret bytes to exactly 32 bytes.
///
/// Secrets longer than 32 bytes keep their first 32 bytes; shorter secrets
/// are left-padded with zeros. Committer and verifier must apply the same
/// rule or verification fails even for the correct (choice, secret) pair,
/// so this is the single place the rule lives.
fn pad_secret(secret: &[u8]) -> [u8; SECRET_WIDTH] {
    let mut padded = [0u8; SECRET_WIDTH];
    let len = secret.len().min(SECRET_WIDTH);
    padded[SECRET_WIDTH - len..].copy_from_slice(&secret[..len]);
    padded
}

/// Commitment = SHA256(choice_byte || left_zero_pad(secret, 32))
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// Create a commitment to a choice and secret.
    ///
    /// The preimage is the single-byte wire encoding of the choice followed
    /// by the 32-byte normalized secret. Taking a typed [`Choice`] means an
    /// out-of-range choice byte can never reach the hash.
    pub fn new(choice: Choice, secret: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update([choice.as_byte()]);
        hasher.update(pad_secret(secret));
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given choice and secret produce this commitment.
    ///
    /// Always recomputes the full digest and compares all 32 bytes,
    /// whatever the input length.
    pub fn verify(&self, choice: Choice, secret: &[u8]) -> bool {
        *self == Self::new(choice, secret)
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
