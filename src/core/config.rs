//! Governance configuration with documented constants
//!
//! Every tunable of the governance state machine lives here. Values load from
//! TOML; any field left out falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{GovernanceError, Result};
use crate::core::types::{LeaderTitle, Tick};

/// How the next leader is picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuccessionType {
    Election,
    Lot,
    Seniority,
    /// Anything the config did not recognize; replaced by `Election` at runtime
    #[serde(other)]
    Unset,
}

impl Default for SuccessionType {
    fn default() -> Self {
        SuccessionType::Election
    }
}

/// How long a leader's term lasts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermDuration {
    Indefinite,
    Quadrum,
    Halfyear,
    #[default]
    Year,
}

impl TermDuration {
    pub fn days(&self) -> Option<u64> {
        match self {
            TermDuration::Indefinite => None,
            TermDuration::Quadrum => Some(15),
            TermDuration::Halfyear => Some(30),
            TermDuration::Year => Some(60),
        }
    }
}

/// Configuration for the governance systems
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    // === CADENCE ===
    /// The periodic update only does work on ticks divisible by this
    pub update_interval: Tick,

    pub ticks_per_day: Tick,

    /// Used to convert govern sessions into governance gains
    pub ticks_per_hour: Tick,

    // === POLITY ===
    /// Below this many citizens the polity has no government at all
    pub min_population: usize,

    pub succession: SuccessionType,

    pub term_duration: TermDuration,

    // === ELECTIONS ===
    /// Time between calling an election and counting the votes
    pub campaign_duration_days: f32,

    /// When off, elections skip the campaign phase and every eligible
    /// citizen stands
    pub campaigning_enabled: bool,

    /// How many front-runners get a campaign
    pub candidate_count: usize,

    /// Chance per campaign update that a candidate approaches a new supporter
    pub recruit_chance: f32,

    /// Magnitude of the sympathy memory a recruited supporter gains
    ///
    /// Voting multiplies sympathy by 25, so 0.2 is worth five opinion points.
    pub sympathy_magnitude: f32,

    pub sympathy_duration_days: f32,

    /// Extra momentum per supporter on every campaign update
    pub momentum_per_supporter: f32,

    // === GOVERNANCE ===
    /// Global multiplier on daily governance decay
    pub governance_decay_speed: f32,

    // === TITLES ===
    /// Chance that the title is rerolled on each succession
    pub title_reroll_chance: f32,

    pub leader_titles: Vec<LeaderTitle>,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        use SuccessionType::*;

        Self {
            update_interval: 500,
            ticks_per_day: 60_000,
            ticks_per_hour: 2_500,

            min_population: 3,
            succession: SuccessionType::Election,
            term_duration: TermDuration::Year,

            campaign_duration_days: 2.0,
            campaigning_enabled: true,
            candidate_count: 2,
            recruit_chance: 0.5,
            sympathy_magnitude: 0.2,
            sympathy_duration_days: 5.0,
            momentum_per_supporter: 0.5,

            governance_decay_speed: 1.0,

            title_reroll_chance: 0.1,
            leader_titles: vec![
                LeaderTitle::new("Leader", vec![]),
                LeaderTitle::new("President", vec![Election]),
                LeaderTitle::new("Consul", vec![Election]),
                LeaderTitle::new("Doge", vec![Election]),
                LeaderTitle::new("Elder", vec![Seniority]),
                LeaderTitle::new("Patriarch", vec![Seniority]),
                LeaderTitle::new("Chosen One", vec![Lot]),
                LeaderTitle::new("Speaker", vec![Lot]),
            ],
        }
    }
}

impl GovernanceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GovernanceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn campaign_duration_ticks(&self) -> Tick {
        (self.campaign_duration_days * self.ticks_per_day as f32) as Tick
    }

    /// Term length in ticks; `None` for indefinite terms
    pub fn term_duration_ticks(&self) -> Option<Tick> {
        self.term_duration.days().map(|days| days * self.ticks_per_day)
    }

    pub fn sympathy_duration_ticks(&self) -> Tick {
        (self.sympathy_duration_days * self.ticks_per_day as f32) as Tick
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.update_interval == 0 || self.ticks_per_day == 0 || self.ticks_per_hour == 0 {
            return Err(GovernanceError::InvalidConfig(
                "update_interval, ticks_per_day and ticks_per_hour must be positive".into(),
            ));
        }

        if self.min_population == 0 {
            return Err(GovernanceError::InvalidConfig("min_population must be at least 1".into()));
        }

        if self.candidate_count == 0 {
            return Err(GovernanceError::InvalidConfig("candidate_count must be at least 1".into()));
        }

        for (name, value) in [
            ("campaign_duration_days", self.campaign_duration_days),
            ("sympathy_duration_days", self.sympathy_duration_days),
            ("governance_decay_speed", self.governance_decay_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GovernanceError::InvalidConfig(format!(
                    "{} ({}) must be a non-negative number",
                    name, value
                )));
            }
        }

        if !self.sympathy_magnitude.is_finite() || !self.momentum_per_supporter.is_finite() {
            return Err(GovernanceError::InvalidConfig(
                "sympathy_magnitude and momentum_per_supporter must be finite".into(),
            ));
        }

        for (name, chance) in [
            ("recruit_chance", self.recruit_chance),
            ("title_reroll_chance", self.title_reroll_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(GovernanceError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, chance
                )));
            }
        }

        if self.leader_titles.is_empty() {
            return Err(GovernanceError::InvalidConfig("at least one leader title is required".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GovernanceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_term_ticks() {
        let mut config = GovernanceConfig::default();
        assert_eq!(config.term_duration_ticks(), Some(60 * 60_000));

        config.term_duration = TermDuration::Indefinite;
        assert_eq!(config.term_duration_ticks(), None);
    }

    #[test]
    fn test_campaign_ticks() {
        let config = GovernanceConfig::default();
        assert_eq!(config.campaign_duration_ticks(), 120_000);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GovernanceConfig::from_toml_str(
            r#"
            succession = "Lot"
            min_population = 5
            term_duration = "Quadrum"
            "#,
        )
        .expect("Should parse partial config");

        assert_eq!(config.succession, SuccessionType::Lot);
        assert_eq!(config.min_population, 5);
        assert_eq!(config.term_duration, TermDuration::Quadrum);
        assert_eq!(config.update_interval, 500);
        assert_eq!(config.candidate_count, 2);
    }

    #[test]
    fn test_unknown_succession_is_unset() {
        let config = GovernanceConfig::from_toml_str(r#"succession = "Monarchy""#)
            .expect("Unknown succession should still parse");
        assert_eq!(config.succession, SuccessionType::Unset);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GovernanceConfig::from_toml_str("recruit_chance = 1.5");
        assert!(matches!(err, Err(GovernanceError::InvalidConfig(_))));

        let err = GovernanceConfig::from_toml_str("update_interval = 0");
        assert!(matches!(err, Err(GovernanceError::InvalidConfig(_))));

        let err = GovernanceConfig::from_toml_str("min_population = 0");
        assert!(matches!(err, Err(GovernanceError::InvalidConfig(_))));

        let err = GovernanceConfig::from_toml_str("leader_titles = []");
        assert!(matches!(err, Err(GovernanceError::InvalidConfig(_))));

        let config = GovernanceConfig {
            governance_decay_speed: f32::NAN,
            ..GovernanceConfig::default()
        };
        assert!(matches!(config.validate(), Err(GovernanceError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = GovernanceConfig::from_toml_str("min_population = \"many\"");
        assert!(matches!(err, Err(GovernanceError::TomlError(_))));
    }
}
