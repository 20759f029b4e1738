//! The governance state machine
//!
//! One `GovernanceState` per polity. The scheduler calls [`GovernanceState::update`]
//! every tick; work only happens on multiples of the update interval. The
//! govern activity feeds [`GovernanceState::improve_governance`] on its own
//! schedule, and configuration changes arrive through
//! [`GovernanceState::configure`].

use std::collections::BTreeSet;

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use super::events::{list_string, GovernanceEvent};
use super::snapshot::GovernanceSnapshot;
use crate::agent::{Agent, GovernanceMemory, Population};
use crate::campaign::{random_focus, ElectionCampaign};
use crate::core::config::{GovernanceConfig, SuccessionType};
use crate::core::error::{GovernanceError, Result};
use crate::core::types::{AgentId, Attribute, LeaderTitle, RespectLevel, Tick};
use crate::succession::{election, Succession};

/// Governance quality a fresh or dissolved polity starts from
pub const NEUTRAL_GOVERNANCE: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct GovernanceState {
    config: GovernanceConfig,
    enabled: bool,
    leader: Option<AgentId>,
    leader_title: Option<LeaderTitle>,
    governance: f32,
    focus: Option<Attribute>,
    succession: Succession,
    /// `Some` only while an election with at least one candidate is pending
    campaigns: Option<Vec<ElectionCampaign>>,
    /// `None` is an indefinite term
    term_expiration: Option<Tick>,
    /// `None` when no election is pending
    election_tick: Option<Tick>,
}

impl GovernanceState {
    pub fn new(config: GovernanceConfig) -> Result<Self> {
        config.validate()?;
        let mut state = Self {
            succession: Succession::for_type(config.succession),
            config,
            enabled: false,
            leader: None,
            leader_title: None,
            governance: NEUTRAL_GOVERNANCE,
            focus: None,
            campaigns: None,
            term_expiration: None,
            election_tick: None,
        };
        state.sync_succession();
        Ok(state)
    }

    /// Rebuild a state from persisted data
    pub fn restore(snapshot: GovernanceSnapshot, config: GovernanceConfig) -> Result<Self> {
        let mut state = Self::new(config)?;
        state.enabled = snapshot.enabled;
        state.leader = snapshot.leader;
        state.leader_title = snapshot.leader_title;
        state.governance = snapshot.governance.clamp(0.0, 1.0);
        state.focus = snapshot.focus;
        state.campaigns = snapshot.campaigns.filter(|c| !c.is_empty() && state.succession.is_election());
        state.term_expiration = snapshot.term_expiration;
        // Only elections are ever pending
        state.election_tick = snapshot.election_tick.filter(|_| state.succession.is_election());
        Ok(state)
    }

    pub fn snapshot(&self) -> GovernanceSnapshot {
        GovernanceSnapshot {
            enabled: self.enabled,
            leader: self.leader,
            leader_title: self.leader_title.clone(),
            governance: self.governance,
            focus: self.focus,
            campaigns: self.campaigns.clone(),
            term_expiration: self.term_expiration,
            election_tick: self.election_tick,
        }
    }

    // ===== Accessors =====

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn leader(&self) -> Option<AgentId> {
        self.leader
    }

    pub fn is_leader(&self, id: AgentId) -> bool {
        self.leader == Some(id)
    }

    pub fn leader_title(&self) -> Option<&LeaderTitle> {
        self.leader_title.as_ref()
    }

    pub fn governance(&self) -> f32 {
        self.governance
    }

    pub fn governance_percentage(&self) -> f32 {
        100.0 * self.governance
    }

    pub fn focus(&self) -> Option<Attribute> {
        self.focus
    }

    pub fn succession(&self) -> &Succession {
        &self.succession
    }

    pub fn campaigns(&self) -> Option<&[ElectionCampaign]> {
        self.campaigns.as_deref()
    }

    pub fn candidates(&self) -> Option<Vec<AgentId>> {
        self.campaigns
            .as_ref()
            .map(|campaigns| campaigns.iter().map(|c| c.candidate).collect())
    }

    pub fn campaign_of(&self, candidate: AgentId) -> Option<&ElectionCampaign> {
        self.campaigns.as_ref()?.iter().find(|c| c.candidate == candidate)
    }

    pub fn supported_campaign(&self, supporter: AgentId) -> Option<&ElectionCampaign> {
        self.campaigns
            .as_ref()?
            .iter()
            .find(|c| c.supporters.contains(&supporter))
    }

    pub fn term_expiration(&self) -> Option<Tick> {
        self.term_expiration
    }

    pub fn election_tick(&self) -> Option<Tick> {
        self.election_tick
    }

    pub fn election_called(&self) -> bool {
        self.election_tick.is_some()
    }

    /// How citizens regard the leader; `None` without a government
    pub fn respect_level(&self) -> Option<RespectLevel> {
        if self.enabled && self.leader.is_some() {
            Some(RespectLevel::from_governance(self.governance))
        } else {
            None
        }
    }

    // ===== Configuration =====

    /// Swap in a new configuration; a changed succession type takes effect now
    ///
    /// An invalid configuration is rejected and the current one kept.
    pub fn configure(&mut self, config: GovernanceConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.sync_succession();
        Ok(())
    }

    pub fn set_succession_type(&mut self, kind: SuccessionType) {
        self.config.succession = kind;
        self.sync_succession();
    }

    fn sync_succession(&mut self) {
        if self.config.succession == SuccessionType::Unset {
            tracing::warn!("Succession type not set! Reverting to election.");
            self.config.succession = SuccessionType::Election;
        }

        if self.succession.kind() == self.config.succession {
            return;
        }

        tracing::info!(
            "Succession changed from {} to {:?}",
            self.succession.title(),
            self.config.succession
        );
        self.succession = Succession::for_type(self.config.succession);
        if !self.succession.is_election() {
            // A pending term end still triggers succession on schedule
            self.campaigns = None;
            self.election_tick = None;
        }
    }

    // ===== Governance quality =====

    /// Daily decay before the leader's modifier
    ///
    /// Small polities decay slower; high governance decays faster.
    pub fn base_decay_per_day(&self, population: usize) -> f32 {
        let g = self.governance;
        let n = population.max(1) as f32;
        (0.03 + g * 0.1 - (0.06 + g * 0.25) / n) * self.config.governance_decay_speed
    }

    pub fn decay_per_day<P: Population>(&self, population: &P) -> f32 {
        let modifier = self
            .leader
            .and_then(|id| population.agent(id))
            .map_or(1.0, |leader| leader.governance_decay_factor());
        (self.base_decay_per_day(population.citizen_count()) * modifier).max(0.0)
    }

    /// Raise governance, capped at 1
    pub fn improve_governance(&mut self, amount: f32) {
        if !amount.is_finite() {
            tracing::warn!("Ignoring non-finite governance change {}", amount);
            return;
        }
        self.governance = (self.governance + amount).clamp(0.0, 1.0);
    }

    /// A govern session by `agent`: `ticks` spent at a seat with
    /// `seat_factor`, at the agent's `efficiency` per hour
    ///
    /// Returns the new governance.
    pub fn govern(&mut self, agent: AgentId, efficiency: f32, seat_factor: f32, ticks: Tick) -> Result<f32> {
        if !self.is_leader(agent) {
            return Err(GovernanceError::NotLeader(agent));
        }
        if self.governance >= 1.0 {
            return Err(GovernanceError::GovernanceSaturated);
        }

        let amount = efficiency * seat_factor * ticks as f32 / self.config.ticks_per_hour as f32;
        self.improve_governance(amount);
        Ok(self.governance)
    }

    // ===== Periodic update =====

    /// Scheduler entry point, called every tick
    pub fn update<P: Population, R: Rng>(&mut self, population: &mut P, rng: &mut R) -> Vec<GovernanceEvent> {
        let mut events = Vec::new();
        let now = population.current_tick();
        if now % self.config.update_interval != 0 {
            return events;
        }

        self.sync_succession();

        if population.citizen_count() < self.config.min_population {
            self.disable(now, &mut events);
            return events;
        }
        self.enabled = true;

        if self.leader_title.is_none() {
            self.choose_leader_title(rng, &mut events);
        }

        let leader_valid = self
            .leader
            .is_some_and(|id| self.succession.can_be_candidate(&*population, id));

        if self.succession.is_election() {
            let campaign_ticks = self.config.campaign_duration_ticks();
            let term_ending = self
                .term_expiration
                .is_some_and(|expires| now >= expires.saturating_sub(campaign_ticks));

            if (term_ending || !leader_valid) && !self.election_called() {
                self.call_election(population, rng, &mut events);
            } else if self.election_called() && self.campaigns.is_some() {
                let ineligible = self.campaigns.as_ref().and_then(|campaigns| {
                    campaigns
                        .iter()
                        .map(|c| c.candidate)
                        .find(|c| !self.succession.can_be_candidate(&*population, *c))
                });

                if let Some(ineligible) = ineligible {
                    tracing::warn!("Campaign restarted because {} is ineligible", ineligible);
                    events.push(GovernanceEvent::CampaignRestarted { ineligible });
                    self.campaigns = None;
                    self.call_election(population, rng, &mut events);
                } else {
                    self.advance_campaigns(population, rng);
                }
            }

            if self.election_tick.is_some_and(|due| now >= due) {
                self.choose_leader(population, rng, &mut events);
            }
        } else if self.term_expiration.is_some_and(|expires| now >= expires) || !leader_valid {
            self.choose_leader(population, rng, &mut events);
        }

        let decay = self.decay_per_day(&*population);
        self.governance = (self.governance
            - decay / self.config.ticks_per_day as f32 * self.config.update_interval as f32)
            .max(0.0);

        events
    }

    fn disable(&mut self, now: Tick, events: &mut Vec<GovernanceEvent>) {
        if self.enabled {
            tracing::info!("Population below {}; government dissolved", self.config.min_population);
            events.push(GovernanceEvent::Disabled { tick: now });
        }
        self.enabled = false;
        self.leader = None;
        self.governance = NEUTRAL_GOVERNANCE;
        self.campaigns = None;
        self.election_tick = None;
        self.term_expiration = None;
    }

    fn choose_leader_title<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<GovernanceEvent>) {
        let kind = self.succession.kind();
        let title = self
            .config
            .leader_titles
            .iter()
            .filter(|t| t.is_applicable(kind))
            .choose(rng)
            .cloned();

        match &title {
            Some(t) => {
                tracing::info!("Selected leader title: {}", t.name);
                events.push(GovernanceEvent::LeaderTitleChosen { title: t.name.clone() });
            }
            None => tracing::warn!("No leader title applies to {:?}", kind),
        }
        self.leader_title = title;
    }

    fn title_name(&self) -> &str {
        self.leader_title.as_ref().map_or("leader", |t| t.name.as_str())
    }

    fn call_election<P: Population, R: Rng>(
        &mut self,
        population: &mut P,
        rng: &mut R,
        events: &mut Vec<GovernanceEvent>,
    ) {
        let now = population.current_tick();
        let election_tick = now + self.config.campaign_duration_ticks();
        self.election_tick = Some(election_tick);

        // The running term now ends with the vote
        if self.term_expiration.is_some() {
            self.term_expiration = Some(election_tick);
        }

        if self.config.campaigning_enabled {
            let candidates = election::choose_leaders(&*population, self.config.candidate_count);
            self.launch_campaigns(&*population, &candidates, rng);

            if let Some(campaigns) = &self.campaigns {
                tracing::info!("Candidates in the campaign:");
                for campaign in campaigns {
                    tracing::info!("- {}", campaign);
                }

                let names: Vec<String> = candidates
                    .iter()
                    .map(|id| population.agent(*id).map_or_else(|| id.to_string(), |a| a.label()))
                    .collect();
                events.push(GovernanceEvent::CampaignStarted {
                    message: format!(
                        "The election campaign is on! {} {} competing to be the {}.",
                        list_string(&names),
                        if names.len() == 1 { "is" } else { "are" },
                        self.title_name()
                    ),
                    candidates,
                });
            }
        }

        tracing::info!("Election has been called for tick {}", election_tick);
        events.push(GovernanceEvent::ElectionCalled { tick: now, election_tick });
    }

    fn launch_campaigns<P: Population, R: Rng>(&mut self, population: &P, candidates: &[AgentId], rng: &mut R) {
        if candidates.is_empty() {
            self.campaigns = None;
            return;
        }

        let campaigns = candidates
            .iter()
            .map(|&candidate| {
                let attributes = population.agent(candidate).map(|a| a.attributes()).unwrap_or_default();
                let avoid = if self.is_leader(candidate) { self.focus } else { None };
                ElectionCampaign::new(candidate, random_focus(&attributes, avoid, rng))
            })
            .collect();
        self.campaigns = Some(campaigns);
    }

    fn advance_campaigns<P: Population, R: Rng>(&mut self, population: &mut P, rng: &mut R) {
        let Some(mut campaigns) = self.campaigns.take() else {
            return;
        };
        let field: Vec<AgentId> = campaigns.iter().map(|c| c.candidate).collect();

        for i in advancement_order(campaigns.len(), rng) {
            let committed: BTreeSet<AgentId> = campaigns
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .flat_map(|(_, c)| c.supporters.iter().copied())
                .collect();
            campaigns[i].advance(population, &field, &committed, &self.config, rng);
        }

        self.campaigns = Some(campaigns);
    }

    fn choose_leader<P: Population, R: Rng>(
        &mut self,
        population: &mut P,
        rng: &mut R,
        events: &mut Vec<GovernanceEvent>,
    ) {
        let old_leader = self.leader;
        let field = self.candidates();
        self.leader = self.succession.choose_leader(population, field.as_deref(), rng);

        let title_applies = self
            .leader_title
            .as_ref()
            .is_some_and(|t| t.is_applicable(self.succession.kind()));
        if !title_applies || rng.gen_bool(self.config.title_reroll_chance as f64) {
            self.choose_leader_title(rng, events);
        }

        if let Some(leader) = self.leader {
            let now = population.current_tick();
            tracing::info!("{} was chosen to be the leader", leader);

            self.term_expiration = self.config.term_duration_ticks().map(|term| now + term);
            self.election_tick = None;

            let campaign_focus = self.campaign_of(leader).map(|c| c.focus);
            self.focus = match (campaign_focus, self.focus) {
                (Some(promised), _) => Some(promised),
                (None, Some(previous)) if old_leader == Some(leader) => Some(previous),
                _ => {
                    let attributes = population.agent(leader).map(|a| a.attributes()).unwrap_or_default();
                    Some(random_focus(&attributes, None, rng))
                }
            };

            // Candidates remember how they fared and whom they ran against
            if let Some(field) = &field {
                for &candidate in field {
                    let Some(agent) = population.agent_mut(candidate) else {
                        continue;
                    };
                    agent.receive_memory(GovernanceMemory::ElectionOutcome { won: candidate == leader });
                    for &rival in field.iter().filter(|r| **r != candidate) {
                        agent.receive_memory(GovernanceMemory::ElectionCompetitor { rival });
                    }
                }
            }

            let changed = old_leader != Some(leader);
            if changed {
                self.governance = NEUTRAL_GOVERNANCE + (self.governance - NEUTRAL_GOVERNANCE) * 0.5;
            }

            let name = population.agent(leader).map_or_else(|| leader.to_string(), |a| a.label());
            let (title, body) = if changed {
                (self.succession.new_leader_title(), self.succession.new_leader_message(&name))
            } else {
                (self.succession.same_leader_title(), self.succession.same_leader_message(&name))
            };
            let focus_label = self.focus.map_or("none", |f| f.label());
            let message = format!("{}\n\nThe focus attribute is {}.", body, focus_label);

            tracing::info!(
                "New {} is {} (term expires {:?}, focus {})",
                self.title_name(),
                name,
                self.term_expiration,
                focus_label
            );

            events.push(match self.succession.votes_for_winner() {
                Some(votes) => GovernanceEvent::ElectionResolved {
                    leader,
                    votes,
                    changed,
                    title: title.to_string(),
                    message,
                },
                None => GovernanceEvent::SuccessionResolved {
                    leader,
                    changed,
                    title: title.to_string(),
                    message,
                },
            });
        } else {
            tracing::warn!("No leader could be chosen");
            self.focus = None;
        }

        self.campaigns = None;
    }
}

/// Campaigns take turns in a fresh random order each update
fn advancement_order<R: Rng>(count: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..count).collect();
    order.shuffle(rng);
    order
}
