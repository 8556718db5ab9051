//! Request and response types for the HTTP API.

use rps_escrow_core::{MatchId, MatchView};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::Account;

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub balance: u64,
}

impl AccountResponse {
    pub fn new(account: Account, balance: u64) -> Self {
        Self {
            id: *account.id.as_uuid(),
            name: account.name,
            balance,
        }
    }
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub view: MatchView,
}

impl MatchResponse {
    pub fn new(id: MatchId, view: MatchView) -> Self {
        Self {
            id: *id.as_uuid(),
            view,
        }
    }
}

#[derive(Deserialize)]
pub struct OpenMatchRequest {
    /// 32-byte commitment hash, hex encoded
    pub commitment: String,
    pub value: u64,
}

#[derive(Deserialize)]
pub struct JoinMatchRequest {
    /// Wire-encoded choice: 1=Rock, 2=Paper, 3=Scissors
    pub choice: u8,
    pub value: u64,
}

#[derive(Deserialize)]
pub struct RevealMatchRequest {
    /// Wire-encoded choice: 1=Rock, 2=Paper, 3=Scissors
    pub choice: u8,
    /// The salt used at commit time; its UTF-8 bytes are normalized by the
    /// same padding rule the committer used
    pub secret: String,
}
