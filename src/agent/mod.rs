//! Agents as the governance core sees them
//!
//! The core never owns agents. It holds `AgentId`s and looks them up through
//! a `Population` on every update, so a leader who died or left since the
//! last update is noticed the next time it is checked.

pub mod memory;
pub mod roster;

pub use memory::GovernanceMemory;
pub use roster::{Citizen, Roster};

use crate::core::types::{AgentId, Attribute, BiographyTag, MentalInstability, Tick};

/// Capabilities the governance core needs from an agent
pub trait Agent {
    fn id(&self) -> AgentId;

    /// Short display name for narration
    fn label(&self) -> String {
        self.id().to_string()
    }

    fn is_citizen(&self) -> bool;

    fn is_alive(&self) -> bool;

    /// Strategy-independent eligibility (not a prisoner, not a child, ...)
    fn is_eligible_candidate(&self) -> bool;

    fn mental_instability(&self) -> MentalInstability;

    /// Signed opinion of another agent
    fn opinion_of(&self, other: AgentId) -> f32;

    /// Magnitudes of live political sympathy memories about `target`
    fn sympathy_toward(&self, target: AgentId) -> Vec<f32>;

    fn biography(&self) -> &[BiographyTag];

    /// Attributes with their skill levels
    fn attributes(&self) -> Vec<(Attribute, u32)>;

    /// Time spent in the polity; seniority picks the largest
    fn age(&self) -> Tick;

    /// Multiplier on governance decay while this agent leads
    fn governance_decay_factor(&self) -> f32 {
        1.0
    }

    fn receive_memory(&mut self, memory: GovernanceMemory);

    fn record_election_win(&mut self) {}

    /// Alive, a citizen, and eligible
    fn can_lead(&self) -> bool {
        self.is_alive() && self.is_citizen() && self.is_eligible_candidate()
    }
}

/// The polity-wide context passed into every governance entry point
pub trait Population {
    type Agent: Agent;

    fn current_tick(&self) -> Tick;

    fn agent(&self, id: AgentId) -> Option<&Self::Agent>;

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut Self::Agent>;

    /// Every citizen in canonical (ascending id) order, dead ones included
    fn citizens(&self) -> Vec<AgentId>;

    /// Living citizens
    fn citizen_count(&self) -> usize {
        self.citizens()
            .into_iter()
            .filter(|id| self.agent(*id).is_some_and(|a| a.is_alive()))
            .count()
    }

    /// Citizens who could lead right now, in canonical order
    fn eligible_pool(&self) -> Vec<AgentId> {
        self.citizens()
            .into_iter()
            .filter(|id| self.can_lead(*id))
            .collect()
    }

    fn can_lead(&self, id: AgentId) -> bool {
        self.agent(id).is_some_and(|a| a.can_lead())
    }
}
