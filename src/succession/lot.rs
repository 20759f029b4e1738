//! Succession by drawing lots

use rand::seq::SliceRandom;
use rand::Rng;

use crate::agent::Population;
use crate::core::types::AgentId;

/// Any eligible citizen, uniformly at random
pub fn choose_leader<P: Population, R: Rng>(population: &P, rng: &mut R) -> Option<AgentId> {
    let pool = population.eligible_pool();
    let chosen = pool.choose(rng).copied();
    tracing::debug!("Lot drawn among {} citizens: {:?}", pool.len(), chosen);
    chosen
}
