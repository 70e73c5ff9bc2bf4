use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use menace_agent::{Agent, BeadStore, StoreLoadError, StoreSnapshot};

/// Persisted form of a trained agent.
///
/// Loading validates the embedded store snapshot and rejects the whole
/// file if any matchbox is corrupt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub games_trained: u64,
    pub store: StoreSnapshot,
}

impl AgentModel {
    pub fn from_agent(name: &str, games_trained: u64, agent: &Agent) -> Self {
        Self {
            name: name.to_owned(),
            trained_at: Utc::now(),
            games_trained,
            store: agent.store().snapshot(),
        }
    }

    pub fn into_agent(self) -> Result<Agent, StoreLoadError> {
        Ok(Agent::with_store(BeadStore::from_snapshot(self.store)?))
    }
}
