//! Trampling rule configuration.
//!
//! `ConfigFile` is the serde schema of the JSON file; `RuntimeConfig` is the
//! validated per-block rule map the engine reads.

pub mod file;
pub mod rule;

pub use file::{ConfigFile, RuleDefaults, RuleEntry};
pub use rule::{BlockRule, RuntimeConfig};
