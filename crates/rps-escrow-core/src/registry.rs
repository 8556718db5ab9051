//! Match creation and discovery.

use crate::game::EscrowMatch;
use crate::ledger::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

/// Unique match identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    /// Create a new random match ID
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

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for MatchId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MatchId({})", self.0)
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Creates matches and exposes them for discovery.
///
/// Every match is handed out behind its own mutex, so all state-changing
/// calls against one match serialize (single writer at a time) while
/// different matches proceed independently. Snapshots taken under the same
/// lock always observe a fully-committed state.
#[derive(Clone, Default)]
pub struct MatchRegistry {
    matches: Arc<Mutex<HashMap<MatchId, Arc<Mutex<EscrowMatch>>>>>,
    /// Creation order, for stable listing
    order: Arc<Mutex<Vec<MatchId>>>,
}

impl MatchRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate a fresh match owned by `initiator`, awaiting its commitment
    pub fn create_match(&self, initiator: AccountId) -> MatchId {
        let id = MatchId::new();
        let game = Arc::new(Mutex::new(EscrowMatch::new(initiator)));

        self.matches.lock().unwrap().insert(id, game);
        self.order.lock().unwrap().push(id);

        info!(match_id = %id, %initiator, "match created");
        id
    }

    /// All match handles, oldest first
    pub fn list_matches(&self) -> Vec<MatchId> {
        self.order.lock().unwrap().clone()
    }

    /// Look up a match by handle
    pub fn get(&self, id: &MatchId) -> Option<Arc<Mutex<EscrowMatch>>> {
        self.matches.lock().unwrap().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MatchState;

    #[test]
    fn test_create_match_starts_awaiting_commit() {
        let registry = MatchRegistry::new();
        let initiator = AccountId::new();

        let id = registry.create_match(initiator);
        let game = registry.get(&id).unwrap();
        let game = game.lock().unwrap();

        assert_eq!(game.state(), MatchState::AwaitingCommit);
        assert_eq!(game.initiator(), initiator);
    }

    #[test]
    fn test_list_matches_in_creation_order() {
        let registry = MatchRegistry::new();
        let a = registry.create_match(AccountId::new());
        let b = registry.create_match(AccountId::new());
        let c = registry.create_match(AccountId::new());

        assert_eq!(registry.list_matches(), vec![a, b, c]);
    }

    #[test]
    fn test_get_unknown_match() {
        let registry = MatchRegistry::new();
        assert!(registry.get(&MatchId::new()).is_none());
    }
}
