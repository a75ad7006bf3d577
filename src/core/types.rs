//! Core type aliases and re-exports

pub use glam::{DVec3, IVec3};

/// Integer block coordinate in the world grid.
pub type BlockPos = IVec3;

/// World time in simulation ticks. Monotonically non-decreasing per world.
pub type Tick = u64;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
