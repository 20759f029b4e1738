//! Governance of a polity
//!
//! Tracks governance quality, who leads, and when the next succession is
//! due. Produces events for whoever renders them.

pub mod events;
pub mod snapshot;
pub mod state;

pub use events::GovernanceEvent;
pub use snapshot::GovernanceSnapshot;
pub use state::{GovernanceState, NEUTRAL_GOVERNANCE};
