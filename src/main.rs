//! Governance Simulator
//!
//! Runs a randomly generated polity for a number of days and prints every
//! governance event, then the final state as JSON.

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use polity_governance::agent::{Citizen, Population, Roster};
use polity_governance::core::error::Result;
use polity_governance::core::types::{AgentId, Attribute, MentalInstability};
use polity_governance::core::{GovernanceConfig, SuccessionType};
use polity_governance::governance::GovernanceState;

const BIOGRAPHY_TAGS: [&str; 8] = [
    "farm kid", "soldier", "noble", "scholar", "outlaw", "medic", "miner", "artist",
];

/// Governance Simulator - elections, lots and seniority in a small polity
#[derive(Parser, Debug)]
#[command(name = "governance_sim")]
#[command(about = "Simulate leadership and governance quality of a polity")]
struct Args {
    /// Number of citizens
    #[arg(long, default_value_t = 10)]
    citizens: u32,

    /// Days to simulate
    #[arg(long, default_value_t = 120)]
    days: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<String>,

    /// Override the succession type: election, lot or seniority
    #[arg(long)]
    succession: Option<String>,

    /// Chance per day that a citizen dies
    #[arg(long, default_value_t = 0.002)]
    mortality: f64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polity_governance=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GovernanceConfig::load(path)?,
        None => GovernanceConfig::default(),
    };
    if let Some(kind) = &args.succession {
        config.succession = parse_succession(kind);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!("Starting governance simulation (seed {})", seed);

    let mut roster = generate_polity(args.citizens, &mut rng);
    let mut state = GovernanceState::new(config)?;

    let interval = state.config().update_interval;
    let ticks_per_day = state.config().ticks_per_day;
    let death_chance = (args.mortality * interval as f64 / ticks_per_day as f64).clamp(0.0, 1.0);
    let end = args.days * ticks_per_day;

    while roster.current_tick() < end {
        for event in state.update(&mut roster, &mut rng) {
            println!("[day {:>3}] {:?}", roster.current_tick() / ticks_per_day, event);
        }

        for id in roster.citizens() {
            if rng.gen_bool(death_chance) {
                roster.kill(id);
            }
        }

        // The leader sits down to govern for an hour each update
        if let Some(leader) = state.leader() {
            if state.governance() < 1.0 {
                state.govern(leader, 0.01, 1.0, interval)?;
            }
        }

        roster.advance(interval);
    }

    println!();
    println!("=== After {} days ===", args.days);
    println!("Citizens alive: {}", roster.citizen_count());
    println!("Governance: {:.1}%", state.governance_percentage());
    println!("Succession: {}", state.succession().title());
    match state.leader().and_then(|id| roster.get(id)) {
        Some(leader) => println!(
            "{}: {} (elected {} times)",
            state.leader_title().map_or("Leader", |t| t.name.as_str()),
            leader.name,
            leader.times_elected
        ),
        None => println!("No leader"),
    }
    println!();
    println!("{}", state.snapshot().to_json()?);

    Ok(())
}

fn parse_succession(kind: &str) -> SuccessionType {
    match kind.to_ascii_lowercase().as_str() {
        "election" => SuccessionType::Election,
        "lot" => SuccessionType::Lot,
        "seniority" => SuccessionType::Seniority,
        other => {
            tracing::warn!("Unknown succession type '{}'", other);
            SuccessionType::Unset
        }
    }
}

fn generate_polity(size: u32, rng: &mut ChaCha8Rng) -> Roster {
    let mut roster = Roster::new();
    for i in 1..=size {
        let mut citizen = Citizen::new(AgentId(i), format!("Citizen {}", i), rng.gen_range(0..3_600_000))
            .with_tag(BIOGRAPHY_TAGS[rng.gen_range(0..BIOGRAPHY_TAGS.len())])
            .with_tag(BIOGRAPHY_TAGS[rng.gen_range(0..BIOGRAPHY_TAGS.len())]);

        for attribute in Attribute::ALL {
            if rng.gen_bool(0.5) {
                citizen.attributes.insert(attribute, rng.gen_range(0..20));
            }
        }
        for other in (1..=size).filter(|o| *o != i) {
            citizen.set_opinion(AgentId(other), rng.gen_range(-50.0..50.0));
        }
        if rng.gen_bool(0.05) {
            citizen.mental_instability = MentalInstability::Moderate;
        }
        citizen.decay_factor = rng.gen_range(0.8..1.2);

        roster.insert(citizen);
    }
    roster
}
