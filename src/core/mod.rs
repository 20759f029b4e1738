pub mod config;
pub mod error;
pub mod ticks;
pub mod types;

pub use config::{GovernanceConfig, SuccessionType, TermDuration};
pub use error::{GovernanceError, Result};
pub use types::{AgentId, Attribute, BiographyTag, LeaderTitle, MentalInstability, RespectLevel, Tick};
