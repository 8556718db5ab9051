//! Cryptographic primitives for the RPS Escrow protocol.
//!
//! This module provides:
//! - Commitment and Salt for the commit-reveal scheme

mod commitment;

pub use commitment::{Commitment, Salt, SECRET_WIDTH};
