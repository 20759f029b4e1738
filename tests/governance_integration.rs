//! Integration tests for the governance state machine over long runs

use polity_governance::agent::{Citizen, Population, Roster};
use polity_governance::core::types::{AgentId, Attribute, BiographyTag, MentalInstability, Tick};
use polity_governance::core::{GovernanceConfig, SuccessionType, TermDuration};
use polity_governance::governance::{GovernanceEvent, GovernanceState};
use polity_governance::succession::{get_votes, Election};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn create_polity(size: u32, seed: u64) -> Roster {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let tags = ["farm kid", "soldier", "noble", "scholar", "outlaw"];

    let mut roster = Roster::new();
    for i in 1..=size {
        let mut citizen = Citizen::new(AgentId(i), format!("Citizen {}", i), rng.gen_range(0..1_000_000))
            .with_tag(tags[rng.gen_range(0..tags.len())])
            .with_attribute(Attribute::Social, rng.gen_range(0..20))
            .with_attribute(Attribute::Intellectual, rng.gen_range(0..20))
            .with_attribute(Attribute::Crafting, rng.gen_range(0..20));
        for j in (1..=size).filter(|j| *j != i) {
            citizen.set_opinion(AgentId(j), rng.gen_range(-40.0..40.0));
        }
        roster.insert(citizen);
    }
    roster
}

/// Run `days` of simulated time, one update per interval
fn simulate(state: &mut GovernanceState, roster: &mut Roster, rng: &mut ChaCha8Rng, days: u64) -> Vec<GovernanceEvent> {
    let interval = state.config().update_interval;
    let end = roster.current_tick() + days * state.config().ticks_per_day;
    let mut events = Vec::new();
    while roster.current_tick() < end {
        events.extend(state.update(roster, rng));
        roster.advance(interval);
    }
    events
}

#[test]
fn test_scenario_a_through_election_strategy() {
    // Voters 1-3, candidates 4 and 5
    let mut roster = Roster::with_citizens([
        Citizen::new(AgentId(1), "Voter1", 0)
            .with_opinion(AgentId(4), 20.0)
            .with_opinion(AgentId(5), 5.0),
        Citizen::new(AgentId(2), "Voter2", 0)
            .with_opinion(AgentId(4), -5.0)
            .with_opinion(AgentId(5), 10.0),
        Citizen::new(AgentId(3), "Voter3", 0),
        Citizen::new(AgentId(4), "Cand1", 0),
        Citizen::new(AgentId(5), "Cand2", 0),
    ]);

    let field = [AgentId(4), AgentId(5)];
    let tally = get_votes(&roster, &field, true);
    assert_eq!(tally.votes_for(AgentId(4)), 2);
    assert_eq!(tally.votes_for(AgentId(5)), 1);

    let mut election = Election::new();
    assert_eq!(election.choose_leader(&mut roster, Some(&field[..])), Some(AgentId(4)));
    assert_eq!(election.votes_for_winner(), 2);
}

#[test]
fn test_shared_biography_swings_vote() {
    let roster = Roster::with_citizens([
        Citizen::new(AgentId(1), "Voter", 0)
            .with_tag("soldier")
            .with_opinion(AgentId(2), 8.0),
        Citizen::new(AgentId(2), "Stranger", 0),
        Citizen::new(AgentId(3), "Comrade", 0).with_tag("soldier"),
    ]);

    let tally = get_votes(&roster, &[AgentId(2), AgentId(3)], true);
    assert_eq!(tally.winner(), Some((AgentId(3), 1)));
    assert!(roster
        .agent(AgentId(3))
        .is_some_and(|c| c.biography.contains(&BiographyTag::new("soldier"))));
}

#[test]
fn test_unstable_candidate_scores_below_neutral() {
    let roster = Roster::with_citizens([
        Citizen::new(AgentId(1), "Voter", 0).with_opinion(AgentId(2), 5.0),
        Citizen::new(AgentId(2), "Raving", 0).with_instability(MentalInstability::Severe),
        Citizen::new(AgentId(3), "Calm", 0),
    ]);

    let tally = get_votes(&roster, &[AgentId(2), AgentId(3)], true);
    assert_eq!(tally.winner(), Some((AgentId(3), 1)));
}

#[test]
fn test_long_run_is_reproducible() {
    let run = |seed: u64| {
        let config = GovernanceConfig {
            term_duration: TermDuration::Quadrum,
            ..GovernanceConfig::default()
        };
        let mut state = GovernanceState::new(config).unwrap();
        let mut roster = create_polity(12, 99);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let events = simulate(&mut state, &mut roster, &mut rng, 60);
        (events, state.snapshot())
    };

    let (events_a, snapshot_a) = run(1234);
    let (events_b, snapshot_b) = run(1234);
    assert_eq!(events_a, events_b);
    assert_eq!(snapshot_a, snapshot_b);

    // A year of quadrum terms sees several elections
    let elections = events_a
        .iter()
        .filter(|e| matches!(e, GovernanceEvent::ElectionResolved { .. }))
        .count();
    assert!(elections >= 3, "only {} elections", elections);
}

#[test]
fn test_leader_death_triggers_election() {
    let mut state = GovernanceState::new(GovernanceConfig::default()).unwrap();
    let mut roster = create_polity(8, 7);
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    simulate(&mut state, &mut roster, &mut rng, 3);
    let leader = state.leader().expect("elected within the campaign window");
    assert!(!state.election_called());

    roster.kill(leader);
    let events = simulate(&mut state, &mut roster, &mut rng, 1);
    assert!(events.iter().any(|e| matches!(e, GovernanceEvent::ElectionCalled { .. })));
    assert!(state.candidates().is_some_and(|c| !c.contains(&leader)));

    simulate(&mut state, &mut roster, &mut rng, 2);
    assert!(state.leader().is_some_and(|l| l != leader));
}

#[test]
fn test_strategy_swap_mid_run() {
    let mut state = GovernanceState::new(GovernanceConfig::default()).unwrap();
    let mut roster = create_polity(6, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    simulate(&mut state, &mut roster, &mut rng, 1);
    assert!(state.campaigns().is_some());

    state.set_succession_type(SuccessionType::Seniority);
    let events = simulate(&mut state, &mut roster, &mut rng, 1);

    let oldest = roster
        .citizens()
        .into_iter()
        .max_by_key(|id| (roster.get(*id).map_or(0, |c| c.age), std::cmp::Reverse(*id)));
    assert_eq!(state.leader(), oldest);
    assert!(state.campaigns().is_none());
    assert!(events
        .iter()
        .any(|e| matches!(e, GovernanceEvent::SuccessionResolved { .. })));
}

#[derive(Debug, Clone)]
enum Op {
    Improve(f32),
    Update,
    Kill(u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-0.5f32..0.5).prop_map(Op::Improve),
        Just(Op::Update),
        (1u32..=6).prop_map(Op::Kill),
    ]
}

proptest! {
    #[test]
    fn governance_stays_in_unit_range(ops in prop::collection::vec(op_strategy(), 0..60), seed in any::<u64>()) {
        let config = GovernanceConfig {
            governance_decay_speed: 50.0,
            ..GovernanceConfig::default()
        };
        let mut state = GovernanceState::new(config).unwrap();
        let mut roster = create_polity(6, seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        for op in ops {
            match op {
                Op::Improve(amount) => state.improve_governance(amount),
                Op::Update => {
                    state.update(&mut roster, &mut rng);
                    roster.advance(state.config().update_interval);
                }
                Op::Kill(id) => roster.kill(AgentId(id)),
            }
            prop_assert!((0.0..=1.0).contains(&state.governance()));
            if state.campaigns().is_some() {
                prop_assert!(state.succession().is_election());
                prop_assert!(state.election_called());
            }
        }
    }

    #[test]
    fn improve_is_monotone_and_capped(start in 0.0f32..1.0, amounts in prop::collection::vec(0.0f32..0.7, 1..20)) {
        let mut state = GovernanceState::new(GovernanceConfig::default()).unwrap();
        state.improve_governance(start - state.governance());

        for amount in amounts {
            let before = state.governance();
            state.improve_governance(amount);
            prop_assert!(state.governance() >= before);
            prop_assert!(state.governance() <= 1.0);
        }
    }

    #[test]
    fn disabled_polity_does_not_drift(updates in 1usize..30) {
        let mut state = GovernanceState::new(GovernanceConfig::default()).unwrap();
        let mut roster = create_polity(2, 5);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..updates {
            state.update(&mut roster, &mut rng);
            roster.advance(state.config().update_interval);
            prop_assert!(!state.is_enabled());
            prop_assert_eq!(state.leader(), None);
            prop_assert_eq!(state.governance(), 0.5);
            prop_assert_eq!(state.election_tick(), None::<Tick>);
        }
    }
}
