//! Notifications for the UI layer

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, Tick};

/// Something a player should hear about
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    /// Population fell below the minimum; the government dissolved
    Disabled { tick: Tick },

    LeaderTitleChosen { title: String },

    ElectionCalled { tick: Tick, election_tick: Tick },

    CampaignStarted { candidates: Vec<AgentId>, message: String },

    /// A candidate became ineligible, so the whole field was redrawn
    CampaignRestarted { ineligible: AgentId },

    ElectionResolved {
        leader: AgentId,
        votes: u32,
        changed: bool,
        title: String,
        message: String,
    },

    SuccessionResolved {
        leader: AgentId,
        changed: bool,
        title: String,
        message: String,
    },
}

impl GovernanceEvent {
    /// The new leader, for resolution events
    pub fn leader(&self) -> Option<AgentId> {
        match self {
            GovernanceEvent::ElectionResolved { leader, .. }
            | GovernanceEvent::SuccessionResolved { leader, .. } => Some(*leader),
            _ => None,
        }
    }
}

/// "A", "A and B", "A, B and C"
pub fn list_string(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_string() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(list_string(&names(&[])), "");
        assert_eq!(list_string(&names(&["Ada"])), "Ada");
        assert_eq!(list_string(&names(&["Ada", "Bob"])), "Ada and Bob");
        assert_eq!(list_string(&names(&["Ada", "Bob", "Cy"])), "Ada, Bob and Cy");
    }
}
