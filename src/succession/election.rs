//! Election by weighted vote
//!
//! Every living voter scores each candidate with [`vote_weight`] and backs the
//! highest one. The candidate with the most ballots wins. Ties at both levels
//! go to whoever comes first in the candidate list, so a tally over the same
//! snapshot always comes out the same.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::agent::{Agent, Population};
use crate::core::types::{AgentId, MentalInstability};

/// Points per unit of political sympathy
pub const SYMPATHY_WEIGHT_FACTOR: f32 = 25.0;

/// Points per biography tag the voter shares with the candidate
pub const SHARED_TAG_WEIGHT: f32 = 10.0;

pub const SEVERE_INSTABILITY_PENALTY: f32 = 10.0;
pub const MODERATE_INSTABILITY_PENALTY: f32 = 5.0;

/// How much `voter` would like to see `candidate` lead
pub fn vote_weight<A: Agent>(voter: &A, candidate: &A) -> f32 {
    let mut weight = voter.opinion_of(candidate.id());

    // An unhinged candidate is not a good look
    weight -= match candidate.mental_instability() {
        MentalInstability::Severe => SEVERE_INSTABILITY_PENALTY,
        MentalInstability::Moderate => MODERATE_INSTABILITY_PENALTY,
        MentalInstability::None => 0.0,
    };

    let shared_tags = voter
        .biography()
        .iter()
        .filter(|tag| candidate.biography().contains(tag))
        .count();
    if shared_tags > 0 {
        tracing::debug!(
            "{} and {} have {} biography tags in common",
            voter.label(),
            candidate.label(),
            shared_tags
        );
    }
    weight += shared_tags as f32 * SHARED_TAG_WEIGHT;

    let sympathy: f32 =
        voter.sympathy_toward(candidate.id()).iter().sum::<f32>() * SYMPATHY_WEIGHT_FACTOR;
    if sympathy != 0.0 {
        tracing::debug!(
            "{} has {:.1} of sympathy for {}",
            voter.label(),
            sympathy,
            candidate.label()
        );
    }
    weight += sympathy;

    tracing::debug!("{} vote weight for {}: {}", voter.label(), candidate.label(), weight);
    weight
}

/// The candidate `voter` backs, or `None` when nobody but themself is running
pub fn vote<P: Population>(population: &P, voter: AgentId, candidates: &[AgentId]) -> Option<AgentId> {
    let voter_agent = population.agent(voter)?;

    let mut choice: Option<(AgentId, f32)> = None;
    for &candidate in candidates.iter().filter(|c| **c != voter) {
        let Some(candidate_agent) = population.agent(candidate) else {
            continue;
        };
        let weight = vote_weight(voter_agent, candidate_agent);
        if choice.map_or(true, |(_, best)| weight > best) {
            choice = Some((candidate, weight));
        }
    }

    if let Some((chosen, _)) = choice {
        tracing::debug!("{} votes for {}", voter, chosen);
    }
    choice.map(|(chosen, _)| chosen)
}

/// Ballot counts in candidate order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub counts: Vec<(AgentId, u32)>,
}

impl Tally {
    pub fn votes_for(&self, candidate: AgentId) -> u32 {
        self.counts
            .iter()
            .find(|(id, _)| *id == candidate)
            .map_or(0, |(_, n)| *n)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    /// Plurality winner; the earliest candidate takes exact ties, including
    /// the case where nobody voted at all
    pub fn winner(&self) -> Option<(AgentId, u32)> {
        let mut best: Option<(AgentId, u32)> = None;
        for &(candidate, count) in &self.counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((candidate, count));
            }
        }
        best
    }
}

/// Count ballots from every living citizen
///
/// With `candidates_abstain`, the candidates of a campaign field do not vote.
/// Dead citizens are dropped before any weight is computed.
pub fn get_votes<P: Population>(population: &P, candidates: &[AgentId], candidates_abstain: bool) -> Tally {
    let mut tally = Tally {
        counts: candidates.iter().map(|c| (*c, 0)).collect(),
    };

    let voters = population.citizens().into_iter().filter(|id| {
        population.agent(*id).is_some_and(|a| a.is_alive())
            && !(candidates_abstain && candidates.contains(id))
    });

    for voter in voters {
        if let Some(choice) = vote(population, voter, candidates) {
            if let Some(entry) = tally.counts.iter_mut().find(|(id, _)| *id == choice) {
                entry.1 += 1;
            }
        }
    }

    tally
}

/// Sum of every living voter's weight toward each member of `pool`
pub fn weighted_support<P: Population>(population: &P, pool: &[AgentId]) -> Vec<(AgentId, f32)> {
    let voters: Vec<&P::Agent> = population
        .citizens()
        .into_iter()
        .filter_map(|id| population.agent(id))
        .filter(|a| a.is_alive())
        .collect();

    pool.iter()
        .filter_map(|&candidate| {
            let candidate_agent = population.agent(candidate)?;
            let support: f32 = voters
                .iter()
                .filter(|v| v.id() != candidate)
                .map(|v| vote_weight(*v, candidate_agent))
                .sum();
            Some((candidate, support))
        })
        .collect()
}

/// The `num` eligible citizens with the most total weighted support
///
/// Front-runners are returned strongest first; equal support keeps canonical
/// order.
pub fn choose_leaders<P: Population>(population: &P, num: usize) -> Vec<AgentId> {
    let pool = population.eligible_pool();
    let mut support = weighted_support(population, &pool);
    support.sort_by_key(|(_, s)| std::cmp::Reverse(OrderedFloat(*s)));
    support.into_iter().take(num).map(|(id, _)| id).collect()
}

/// Election scratch state
#[derive(Debug, Clone, Default)]
pub struct Election {
    votes_for_winner: u32,
}

impl Election {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn votes_for_winner(&self) -> u32 {
        self.votes_for_winner
    }

    /// Hold the vote
    ///
    /// A campaign field is voted on by everyone else; without one every
    /// eligible citizen stands and nobody votes for themself.
    pub fn choose_leader<P: Population>(
        &mut self,
        population: &mut P,
        campaign_candidates: Option<&[AgentId]>,
    ) -> Option<AgentId> {
        let (candidates, candidates_abstain) = match campaign_candidates {
            Some(field) => (
                field.iter().copied().filter(|c| population.can_lead(*c)).collect::<Vec<_>>(),
                true,
            ),
            None => (population.eligible_pool(), false),
        };

        let tally = get_votes(&*population, &candidates, candidates_abstain);
        for (candidate, count) in &tally.counts {
            tracing::info!("- {}: {} votes", candidate, count);
        }

        let winner = tally.winner();
        self.votes_for_winner = winner.map_or(0, |(_, count)| count);

        let (winner, _) = winner?;
        if let Some(agent) = population.agent_mut(winner) {
            agent.record_election_win();
        }
        Some(winner)
    }

    fn votes_phrase(&self) -> String {
        match self.votes_for_winner {
            0 => String::new(),
            1 => " with just one vote".to_string(),
            n => format!(" with {} votes", n),
        }
    }

    pub fn new_leader_message(&self, leader: &str) -> String {
        format!(
            "{} has been elected as our new leader{}. Vox populi, vox dei!",
            leader,
            self.votes_phrase()
        )
    }

    pub fn same_leader_message(&self, leader: &str) -> String {
        format!(
            "{} has been reelected as the leader of our nation{}.",
            leader,
            self.votes_phrase()
        )
    }
}
