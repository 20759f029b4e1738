//! Election campaigns
//!
//! A campaign exists for each candidate between the call of an election and
//! the count. Candidates canvass citizens, and whoever they win over
//! remembers it at the ballot box.

use std::collections::BTreeSet;

use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, GovernanceMemory, Population};
use crate::core::config::GovernanceConfig;
use crate::core::types::{AgentId, Attribute};
use crate::succession::election;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionCampaign {
    pub candidate: AgentId,
    /// What the candidate promises to focus on once in office
    pub focus: Attribute,
    pub supporters: BTreeSet<AgentId>,
    pub momentum: f32,
}

impl ElectionCampaign {
    pub fn new(candidate: AgentId, focus: Attribute) -> Self {
        Self {
            candidate,
            focus,
            supporters: BTreeSet::new(),
            momentum: 0.0,
        }
    }

    /// One campaign update
    ///
    /// The candidate may approach one uncommitted citizen, who signs up only
    /// if this candidate is already their pick among `field`. Returns the new
    /// supporter, if any.
    pub fn advance<P: Population, R: Rng>(
        &mut self,
        population: &mut P,
        field: &[AgentId],
        committed: &BTreeSet<AgentId>,
        config: &GovernanceConfig,
        rng: &mut R,
    ) -> Option<AgentId> {
        let recruit = if rng.gen_bool(config.recruit_chance as f64) {
            self.try_recruit(population, field, committed, config, rng)
        } else {
            None
        };

        self.momentum += 1.0 + config.momentum_per_supporter * self.supporters.len() as f32;
        recruit
    }

    fn try_recruit<P: Population, R: Rng>(
        &mut self,
        population: &mut P,
        field: &[AgentId],
        committed: &BTreeSet<AgentId>,
        config: &GovernanceConfig,
        rng: &mut R,
    ) -> Option<AgentId> {
        let prospects: Vec<AgentId> = population
            .citizens()
            .into_iter()
            .filter(|id| {
                !field.contains(id)
                    && !committed.contains(id)
                    && !self.supporters.contains(id)
                    && population.agent(*id).is_some_and(|a| a.is_alive())
            })
            .collect();

        let prospect = *prospects.choose(rng)?;
        if election::vote(&*population, prospect, field) != Some(self.candidate) {
            return None;
        }

        let expires_at = population.current_tick() + config.sympathy_duration_ticks();
        let agent = population.agent_mut(prospect)?;
        agent.receive_memory(GovernanceMemory::PoliticalSympathy {
            target: self.candidate,
            magnitude: config.sympathy_magnitude,
            expires_at,
        });
        self.supporters.insert(prospect);
        tracing::debug!("{} joined the campaign of {}", prospect, self.candidate);
        Some(prospect)
    }
}

impl std::fmt::Display for ElectionCampaign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (focus: {}, {} supporters, momentum {:.1})",
            self.candidate,
            self.focus.label(),
            self.supporters.len(),
            self.momentum
        )
    }
}

/// Pick an attribute, favouring the agent's strongest ones
///
/// `exclude` is avoided whenever anything else is available.
pub fn random_focus<R: Rng>(attributes: &[(Attribute, u32)], exclude: Option<Attribute>, rng: &mut R) -> Attribute {
    let mut options: Vec<(Attribute, u32)> = if attributes.is_empty() {
        Attribute::ALL.iter().map(|a| (*a, 0)).collect()
    } else {
        attributes.to_vec()
    };
    if options.iter().any(|(a, _)| Some(*a) != exclude) {
        options.retain(|(a, _)| Some(*a) != exclude);
    }

    // Every option keeps a chance, higher levels get proportionally more
    match WeightedIndex::new(options.iter().map(|(_, level)| level + 1)) {
        Ok(dist) => options[dist.sample(rng)].0,
        Err(_) => options[0].0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::{Citizen, Roster};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn eager_config() -> GovernanceConfig {
        GovernanceConfig {
            recruit_chance: 1.0,
            ..GovernanceConfig::default()
        }
    }

    #[test]
    fn test_random_focus_avoids_excluded() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let attrs = [(Attribute::Social, 10), (Attribute::Mining, 2)];
        for _ in 0..50 {
            assert_eq!(random_focus(&attrs, Some(Attribute::Social), &mut rng), Attribute::Mining);
        }
    }

    #[test]
    fn test_random_focus_keeps_only_option() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let attrs = [(Attribute::Social, 10)];
        assert_eq!(random_focus(&attrs, Some(Attribute::Social), &mut rng), Attribute::Social);
    }

    #[test]
    fn test_random_focus_prefers_strong_attributes() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let attrs = [(Attribute::Social, 20), (Attribute::Mining, 0)];
        let social = (0..1000)
            .filter(|_| random_focus(&attrs, None, &mut rng) == Attribute::Social)
            .count();
        assert!(social > 900, "Social picked {} times", social);
    }

    #[test]
    fn test_random_focus_without_attributes() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let focus = random_focus(&[], Some(Attribute::Social), &mut rng);
        assert_ne!(focus, Attribute::Social);
    }

    #[test]
    fn test_recruit_only_willing_supporters() {
        let mut roster = Roster::with_citizens([
            Citizen::new(AgentId(1), "Fan", 0).with_opinion(AgentId(3), 30.0),
            Citizen::new(AgentId(2), "Critic", 0).with_opinion(AgentId(3), -30.0),
            Citizen::new(AgentId(3), "Cand A", 0),
            Citizen::new(AgentId(4), "Cand B", 0),
        ]);
        let field = [AgentId(3), AgentId(4)];
        let config = eager_config();
        let mut campaign = ElectionCampaign::new(AgentId(3), Attribute::Social);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..30 {
            campaign.advance(&mut roster, &field, &BTreeSet::new(), &config, &mut rng);
        }

        assert!(campaign.supporters.contains(&AgentId(1)));
        assert!(!campaign.supporters.contains(&AgentId(2)));
        assert_eq!(roster.get(AgentId(1)).map(|c| c.sympathy_toward(AgentId(3)).is_empty()), Some(false));
    }

    #[test]
    fn test_committed_citizens_not_approached() {
        let mut roster = Roster::with_citizens([
            Citizen::new(AgentId(1), "Fan", 0).with_opinion(AgentId(3), 30.0),
            Citizen::new(AgentId(3), "Cand A", 0),
            Citizen::new(AgentId(4), "Cand B", 0),
        ]);
        let field = [AgentId(3), AgentId(4)];
        let committed: BTreeSet<AgentId> = [AgentId(1)].into_iter().collect();
        let mut campaign = ElectionCampaign::new(AgentId(3), Attribute::Social);
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let recruit = campaign.advance(&mut roster, &field, &committed, &eager_config(), &mut rng);
        assert_eq!(recruit, None);
        assert!(campaign.supporters.is_empty());
    }

    #[test]
    fn test_momentum_accrues() {
        let mut roster = Roster::new();
        let config = GovernanceConfig {
            recruit_chance: 0.0,
            ..GovernanceConfig::default()
        };
        let mut campaign = ElectionCampaign::new(AgentId(3), Attribute::Social);
        campaign.supporters.insert(AgentId(1));
        campaign.supporters.insert(AgentId(2));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        campaign.advance(&mut roster, &[AgentId(3)], &BTreeSet::new(), &config, &mut rng);
        assert!((campaign.momentum - 2.0).abs() < 1e-6);
    }
}
