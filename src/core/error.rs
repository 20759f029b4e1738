use thiserror::Error;

use crate::core::types::AgentId;

#[derive(Error, Debug)]
pub enum GovernanceError {
    #[error("{0} is not the leader")]
    NotLeader(AgentId),

    #[error("Governance is already at its maximum")]
    GovernanceSaturated,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GovernanceError>;
