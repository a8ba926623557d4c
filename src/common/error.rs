//! Error types.
//!
//! None of these reach the player. Pool errors are skipped for the tick and
//! logged; config errors stop the binary before the app starts.

use std::path::PathBuf;

use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Only possible for pools built with a hard capacity.
    #[error("pool exhausted at its hard capacity of {capacity}")]
    Exhausted { capacity: usize },
    /// Freed twice, or freed something the pool never issued.
    #[error("entity {0} is not checked out of this pool")]
    InvalidActorState(Entity),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tunables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] serde_json::Error),
}
