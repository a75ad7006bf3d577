//! Trample - step-driven terrain wear
//!
//! Blocks that are walked on often enough within a time window turn into
//! another block, e.g. grass wearing into a dirt path.

pub mod core;
pub mod config;
pub mod trample;
pub mod sim;

pub use config::{BlockRule, ConfigFile, RuntimeConfig};
pub use trample::{StepOutcome, TrampleService};
