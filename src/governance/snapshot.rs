//! Persisted governance state

use serde::{Deserialize, Serialize};

use crate::campaign::ElectionCampaign;
use crate::core::error::Result;
use crate::core::ticks;
use crate::core::types::{AgentId, Attribute, LeaderTitle, Tick};

/// Everything needed to restore a `GovernanceState`
///
/// Strategy scratch state (the last tally) is not persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GovernanceSnapshot {
    pub enabled: bool,
    pub leader: Option<AgentId>,
    pub leader_title: Option<LeaderTitle>,
    pub governance: f32,
    pub focus: Option<Attribute>,
    pub campaigns: Option<Vec<ElectionCampaign>>,
    #[serde(with = "ticks")]
    pub term_expiration: Option<Tick>,
    #[serde(with = "ticks")]
    pub election_tick: Option<Tick>,
}

impl GovernanceSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
