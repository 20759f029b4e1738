//! Polity Governance - leadership and governance quality for agent polities

pub mod agent;
pub mod campaign;
pub mod core;
pub mod governance;
pub mod succession;

pub use agent::{Agent, Citizen, Population, Roster};
pub use campaign::ElectionCampaign;
pub use governance::{GovernanceEvent, GovernanceSnapshot, GovernanceState};
pub use succession::Succession;
