//! In-memory agents and population
//!
//! `Roster` is the simplest polity that satisfies `Population`. The CLI
//! drives it, and the tests build their scenarios on it.

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::{Agent, GovernanceMemory, Population};
use crate::core::types::{AgentId, Attribute, BiographyTag, MentalInstability, Tick};

/// A plain data agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Citizen {
    pub id: AgentId,
    pub name: String,
    pub citizen: bool,
    pub alive: bool,
    pub eligible: bool,
    pub age: Tick,
    pub mental_instability: MentalInstability,
    pub opinions: BTreeMap<AgentId, f32>,
    pub biography: Vec<BiographyTag>,
    pub attributes: BTreeMap<Attribute, u32>,
    pub decay_factor: f32,
    pub memories: Vec<GovernanceMemory>,
    pub times_elected: u32,
}

impl Citizen {
    pub fn new(id: AgentId, name: impl Into<String>, age: Tick) -> Self {
        Self {
            id,
            name: name.into(),
            citizen: true,
            alive: true,
            eligible: true,
            age,
            mental_instability: MentalInstability::None,
            opinions: BTreeMap::new(),
            biography: Vec::new(),
            attributes: BTreeMap::new(),
            decay_factor: 1.0,
            memories: Vec::new(),
            times_elected: 0,
        }
    }

    pub fn with_opinion(mut self, other: AgentId, opinion: f32) -> Self {
        self.opinions.insert(other, opinion);
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.biography.push(BiographyTag::new(tag));
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute, level: u32) -> Self {
        self.attributes.insert(attribute, level);
        self
    }

    pub fn with_instability(mut self, instability: MentalInstability) -> Self {
        self.mental_instability = instability;
        self
    }

    pub fn set_opinion(&mut self, other: AgentId, opinion: f32) {
        self.opinions.insert(other, opinion);
    }
}

impl Agent for Citizen {
    fn id(&self) -> AgentId {
        self.id
    }

    fn label(&self) -> String {
        self.name.clone()
    }

    fn is_citizen(&self) -> bool {
        self.citizen
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn is_eligible_candidate(&self) -> bool {
        self.eligible
    }

    fn mental_instability(&self) -> MentalInstability {
        self.mental_instability
    }

    fn opinion_of(&self, other: AgentId) -> f32 {
        self.opinions.get(&other).copied().unwrap_or(0.0)
    }

    fn sympathy_toward(&self, target: AgentId) -> Vec<f32> {
        self.memories
            .iter()
            .filter_map(|m| match m {
                GovernanceMemory::PoliticalSympathy { target: t, magnitude, .. } if *t == target => {
                    Some(*magnitude)
                }
                _ => None,
            })
            .collect()
    }

    fn biography(&self) -> &[BiographyTag] {
        &self.biography
    }

    fn attributes(&self) -> Vec<(Attribute, u32)> {
        self.attributes.iter().map(|(a, l)| (*a, *l)).collect()
    }

    fn age(&self) -> Tick {
        self.age
    }

    fn governance_decay_factor(&self) -> f32 {
        self.decay_factor
    }

    fn receive_memory(&mut self, memory: GovernanceMemory) {
        self.memories.push(memory);
    }

    fn record_election_win(&mut self) {
        self.times_elected += 1;
    }
}

/// A population of `Citizen`s with its own clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    agents: AHashMap<AgentId, Citizen>,
    tick: Tick,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_citizens(citizens: impl IntoIterator<Item = Citizen>) -> Self {
        let mut roster = Self::new();
        for citizen in citizens {
            roster.insert(citizen);
        }
        roster
    }

    pub fn insert(&mut self, citizen: Citizen) {
        self.agents.insert(citizen.id, citizen);
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Citizen> {
        self.agents.remove(&id)
    }

    pub fn get(&self, id: AgentId) -> Option<&Citizen> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Citizen> {
        self.agents.get_mut(&id)
    }

    pub fn kill(&mut self, id: AgentId) {
        if let Some(citizen) = self.agents.get_mut(&id) {
            citizen.alive = false;
        }
    }

    /// Jump the clock to `tick` without ageing anyone
    pub fn set_tick(&mut self, tick: Tick) {
        self.tick = tick;
        self.expire_memories();
    }

    /// Move the clock forward, ageing everyone and dropping stale sympathy
    pub fn advance(&mut self, ticks: Tick) {
        self.tick += ticks;
        for citizen in self.agents.values_mut().filter(|c| c.alive) {
            citizen.age += ticks;
        }
        self.expire_memories();
    }

    pub fn expire_memories(&mut self) {
        let now = self.tick;
        for citizen in self.agents.values_mut() {
            citizen.memories.retain(|m| !m.is_expired(now));
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Population for Roster {
    type Agent = Citizen;

    fn current_tick(&self) -> Tick {
        self.tick
    }

    fn agent(&self, id: AgentId) -> Option<&Citizen> {
        self.agents.get(&id)
    }

    fn agent_mut(&mut self, id: AgentId) -> Option<&mut Citizen> {
        self.agents.get_mut(&id)
    }

    fn citizens(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self
            .agents
            .values()
            .filter(|c| c.citizen)
            .map(|c| c.id)
            .collect();
        ids.sort();
        ids
    }
}
