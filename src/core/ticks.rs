//! Serde adapter for optional ticks
//!
//! `None` means "never" (an indefinite term, no election pending) and is
//! persisted as the reserved `u64::MAX` value.

use serde::{Deserialize, Deserializer, Serializer};

use crate::core::types::Tick;

pub const INFINITE_TICK: Tick = Tick::MAX;

pub fn serialize<S>(value: &Option<Tick>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u64(value.unwrap_or(INFINITE_TICK))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Tick>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Tick::deserialize(deserializer)?;
    Ok(if raw == INFINITE_TICK { None } else { Some(raw) })
}
