use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Tick};

/// Memories the governance core hands to agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GovernanceMemory {
    /// Stood in an election and won or lost
    ElectionOutcome { won: bool },
    /// Ran against `rival` in the same election
    ElectionCompetitor { rival: AgentId },
    /// Was won over by `target`'s campaign
    PoliticalSympathy {
        target: AgentId,
        magnitude: f32,
        expires_at: Tick,
    },
}

impl GovernanceMemory {
    pub fn is_expired(&self, now: Tick) -> bool {
        match self {
            GovernanceMemory::PoliticalSympathy { expires_at, .. } => now >= *expires_at,
            _ => false,
        }
    }
}
