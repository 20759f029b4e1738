//! Succession strategies
//!
//! A closed set of ways to pick the next leader. Only `Election` keeps
//! scratch state, and that state is dropped whenever the strategy changes.

pub mod election;
pub mod lot;
pub mod seniority;

pub use election::{choose_leaders, get_votes, vote, vote_weight, Election, Tally};

use rand::Rng;

use crate::agent::Population;
use crate::core::config::SuccessionType;
use crate::core::types::AgentId;

#[derive(Debug, Clone)]
pub enum Succession {
    Election(Election),
    Lot,
    Seniority,
}

impl Succession {
    /// Build the strategy for `kind`; `Unset` has no strategy of its own
    pub fn for_type(kind: SuccessionType) -> Self {
        match kind {
            SuccessionType::Election | SuccessionType::Unset => Succession::Election(Election::new()),
            SuccessionType::Lot => Succession::Lot,
            SuccessionType::Seniority => Succession::Seniority,
        }
    }

    pub fn kind(&self) -> SuccessionType {
        match self {
            Succession::Election(_) => SuccessionType::Election,
            Succession::Lot => SuccessionType::Lot,
            Succession::Seniority => SuccessionType::Seniority,
        }
    }

    pub fn is_election(&self) -> bool {
        matches!(self, Succession::Election(_))
    }

    /// Whether `id` may stand as a candidate under this strategy
    pub fn can_be_candidate<P: Population>(&self, population: &P, id: AgentId) -> bool {
        population.can_lead(id)
    }

    /// Pick the next leader
    ///
    /// `campaign_candidates` only matters to elections; the other strategies
    /// always draw from the whole eligible pool.
    pub fn choose_leader<P: Population, R: Rng>(
        &mut self,
        population: &mut P,
        campaign_candidates: Option<&[AgentId]>,
        rng: &mut R,
    ) -> Option<AgentId> {
        match self {
            Succession::Election(election) => election.choose_leader(population, campaign_candidates),
            Succession::Lot => lot::choose_leader(&*population, rng),
            Succession::Seniority => seniority::choose_leader(&*population),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Succession::Election(_) => "Election",
            Succession::Lot => "Lot",
            Succession::Seniority => "Seniority",
        }
    }

    pub fn new_leader_title(&self) -> &'static str {
        "New Leader"
    }

    pub fn same_leader_title(&self) -> &'static str {
        match self {
            Succession::Election(_) => "Leader Reelected",
            _ => "Leader Confirmed",
        }
    }

    pub fn new_leader_message(&self, leader: &str) -> String {
        match self {
            Succession::Election(election) => election.new_leader_message(leader),
            Succession::Lot => format!("The lot has fallen on {}, who is now our leader.", leader),
            Succession::Seniority => {
                format!("{}, the most senior of our citizens, is now our leader.", leader)
            }
        }
    }

    pub fn same_leader_message(&self, leader: &str) -> String {
        match self {
            Succession::Election(election) => election.same_leader_message(leader),
            Succession::Lot => format!("The lot has fallen on {} once again.", leader),
            Succession::Seniority => format!("{} remains the most senior and keeps the office.", leader),
        }
    }

    pub fn votes_for_winner(&self) -> Option<u32> {
        match self {
            Succession::Election(election) => Some(election.votes_for_winner()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Citizen, Roster};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_unset_maps_to_election() {
        assert_eq!(Succession::for_type(SuccessionType::Unset).kind(), SuccessionType::Election);
        assert_eq!(Succession::for_type(SuccessionType::Lot).kind(), SuccessionType::Lot);
    }

    #[test]
    fn test_seniority_dispatch() {
        let mut roster = Roster::with_citizens([
            Citizen::new(AgentId(1), "Young", 10),
            Citizen::new(AgentId(2), "Old", 20),
        ]);
        let mut succession = Succession::for_type(SuccessionType::Seniority);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        // Campaign candidates are ignored outside elections
        let field = [AgentId(1)];
        assert_eq!(succession.choose_leader(&mut roster, Some(&field[..]), &mut rng), Some(AgentId(2)));
        assert_eq!(succession.votes_for_winner(), None);
    }

    #[test]
    fn test_candidate_eligibility() {
        let mut roster = Roster::with_citizens([Citizen::new(AgentId(1), "Ada", 0)]);
        let succession = Succession::for_type(SuccessionType::Election);
        assert!(succession.can_be_candidate(&roster, AgentId(1)));

        roster.kill(AgentId(1));
        assert!(!succession.can_be_candidate(&roster, AgentId(1)));
        assert!(!succession.can_be_candidate(&roster, AgentId(99)));
    }
}
