//! Standalone host for the trampling engine: a sparse block grid, a block
//! palette and scripted replays.

pub mod world;
pub mod replay;

pub use world::{GridWorld, Mob, Palette};
pub use replay::{ReplayReport, ReplayScript, StepRecord, run_replay};
