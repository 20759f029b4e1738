//! Succession by seniority

use crate::agent::{Agent, Population};
use crate::core::types::AgentId;

/// The eligible citizen with the greatest age; the lowest id wins ties
pub fn choose_leader<P: Population>(population: &P) -> Option<AgentId> {
    let mut oldest: Option<(AgentId, u64)> = None;
    for id in population.eligible_pool() {
        let Some(age) = population.agent(id).map(|a| a.age()) else {
            continue;
        };
        if oldest.map_or(true, |(_, best)| age > best) {
            oldest = Some((id, age));
        }
    }
    oldest.map(|(id, _)| id)
}
