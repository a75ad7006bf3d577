//! Host engine traits.
//!
//! These traits are the seam between the trampling engine and whatever game
//! engine drives it. The engine only ever reads an entity's identity and
//! feet position, reads and writes single block states, and asks the world
//! for its current tick.

use crate::core::identifier::Identifier;
use crate::core::types::{BlockPos, DVec3, IVec3, Tick};

/// An entity that can step on blocks.
pub trait Walker {
    /// Stable identity of the entity's kind, e.g. `minecraft:player`.
    fn entity_id(&self) -> &Identifier;

    /// Spawn group label of the entity's kind, if it has one.
    fn spawn_group(&self) -> Option<&str>;

    /// Exact feet position.
    fn position(&self) -> DVec3;

    /// Block cell containing the feet.
    fn block_pos(&self) -> BlockPos {
        self.position().floor().as_ivec3()
    }

    /// Block directly beneath the feet cell.
    fn standing_on(&self) -> BlockPos {
        self.block_pos() - IVec3::Y
    }
}

/// Read/write access to block states keyed by position.
pub trait BlockWorld {
    /// Host block handle.
    type Block;

    fn block_state(&self, pos: BlockPos) -> Self::Block;

    /// Overwrite the block at `pos`.
    fn set_block_state(&mut self, pos: BlockPos, block: Self::Block);

    /// Current world time.
    fn time(&self) -> Tick;
}

/// Block identity resolution in both directions.
pub trait BlockRegistry {
    type Block;

    /// Stable identity of a block handle.
    fn block_id(&self, block: &Self::Block) -> Identifier;

    /// Default block state for an identity, or `None` if unknown.
    fn default_state(&self, id: &Identifier) -> Option<Self::Block>;
}
