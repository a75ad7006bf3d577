//! Error types for trample

use thiserror::Error;

use crate::core::identifier::Identifier;

/// Main error type for the crate.
///
/// Only configuration loading, identifier parsing and replay scripts can
/// fail. Step processing never produces an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid identifier '{input}': {reason}")]
    InvalidIdentifier { input: String, reason: &'static str },

    #[error("rule for {0}: step_count must be at least 1")]
    ZeroStepCount(Identifier),

    #[error("block {0} is configured by more than one rule")]
    DuplicateRule(Identifier),

    #[error("rule targeting {0} lists no block_ids")]
    EmptyRule(Identifier),

    #[error("rule for {0} restricts neither entity_ids nor spawn_groups, so no entity can trample it")]
    RuleMatchesNothing(Identifier),

    #[error("block {0} cannot be resolved by the registry")]
    UnresolvedBlock(Identifier),

    #[error("replay step {index} at tick {tick} precedes tick {previous}")]
    ReplayOutOfOrder { index: usize, tick: u64, previous: u64 },
}
