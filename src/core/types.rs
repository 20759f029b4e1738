//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::config::SuccessionType;

/// Unique identifier for agents
///
/// The derived ordering is the canonical order used for every deterministic
/// tie-break in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl AgentId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Simulation tick counter
pub type Tick = u64;

/// Skills a leader can be asked to focus on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Social,
    Intellectual,
    Medicine,
    Construction,
    Plants,
    Mining,
    Cooking,
    Crafting,
    Artistic,
    Animals,
    Shooting,
    Melee,
}

impl Attribute {
    pub const ALL: [Attribute; 12] = [
        Attribute::Social,
        Attribute::Intellectual,
        Attribute::Medicine,
        Attribute::Construction,
        Attribute::Plants,
        Attribute::Mining,
        Attribute::Cooking,
        Attribute::Crafting,
        Attribute::Artistic,
        Attribute::Animals,
        Attribute::Shooting,
        Attribute::Melee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Social => "Social",
            Attribute::Intellectual => "Intellectual",
            Attribute::Medicine => "Medicine",
            Attribute::Construction => "Construction",
            Attribute::Plants => "Plants",
            Attribute::Mining => "Mining",
            Attribute::Cooking => "Cooking",
            Attribute::Crafting => "Crafting",
            Attribute::Artistic => "Artistic",
            Attribute::Animals => "Animals",
            Attribute::Shooting => "Shooting",
            Attribute::Melee => "Melee",
        }
    }
}

/// A piece of an agent's life story ("farm kid", "medieval lord", ...)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BiographyTag(pub String);

impl BiographyTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// How far an agent's mind has slipped
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentalInstability {
    #[default]
    None,
    Moderate,
    Severe,
}

/// Cosmetic title of the leader
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderTitle {
    pub name: String,
    /// Succession types this title fits; empty means any
    #[serde(default)]
    pub successions: Vec<SuccessionType>,
}

impl LeaderTitle {
    pub fn new(name: impl Into<String>, successions: Vec<SuccessionType>) -> Self {
        Self {
            name: name.into(),
            successions,
        }
    }

    pub fn is_applicable(&self, succession: SuccessionType) -> bool {
        self.successions.is_empty() || self.successions.contains(&succession)
    }
}

/// How citizens regard the leader, derived from governance quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RespectLevel {
    Contempt,   // < 0.10
    Disdain,    // < 0.25
    Neutral,    // < 0.75
    Respect,    // < 0.95
    Reverence,
}

impl RespectLevel {
    pub fn from_governance(governance: f32) -> Self {
        match governance {
            g if g < 0.10 => RespectLevel::Contempt,
            g if g < 0.25 => RespectLevel::Disdain,
            g if g < 0.75 => RespectLevel::Neutral,
            g if g < 0.95 => RespectLevel::Respect,
            _ => RespectLevel::Reverence,
        }
    }

    /// Stage index (0-4) consumed by opinion subsystems
    pub fn stage(&self) -> usize {
        *self as usize
    }
}
