//! In-memory block grid and entities for driving the engine without a game.

use std::collections::{HashMap, HashSet};

use crate::config::RuntimeConfig;
use crate::core::identifier::Identifier;
use crate::core::types::{BlockPos, DVec3, Tick};
use crate::trample::host::{BlockRegistry, BlockWorld, Walker};

/// Sparse block grid. Unset positions read as the fill block.
pub struct GridWorld {
    /// Explicitly placed blocks
    blocks: HashMap<BlockPos, Identifier>,
    /// Block reported for every unset position
    fill: Identifier,
    tick: Tick,
}

impl GridWorld {
    pub fn new(fill: Identifier) -> Self {
        Self {
            blocks: HashMap::new(),
            fill,
            tick: 0,
        }
    }

    pub fn block(&self, pos: BlockPos) -> Identifier {
        self.blocks.get(&pos).unwrap_or(&self.fill).clone()
    }

    pub fn set_block(&mut self, pos: BlockPos, block: Identifier) {
        self.blocks.insert(pos, block);
    }

    pub fn set_time(&mut self, tick: Tick) {
        self.tick = tick;
    }

    pub fn advance(&mut self, ticks: Tick) {
        self.tick = self.tick.saturating_add(ticks);
    }

    /// Explicitly placed blocks, sorted by position.
    pub fn placed_blocks(&self) -> Vec<(BlockPos, Identifier)> {
        let mut placed: Vec<_> = self.blocks.iter().map(|(p, b)| (*p, b.clone())).collect();
        placed.sort_by_key(|(p, _)| (p.x, p.y, p.z));
        placed
    }
}

impl BlockWorld for GridWorld {
    type Block = Identifier;

    fn block_state(&self, pos: BlockPos) -> Identifier {
        self.block(pos)
    }

    fn set_block_state(&mut self, pos: BlockPos, block: Identifier) {
        self.set_block(pos, block);
    }

    fn time(&self) -> Tick {
        self.tick
    }
}

/// Registry of known block ids. Blocks are their own handles.
#[derive(Clone, Debug, Default)]
pub struct Palette {
    known: HashSet<Identifier>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Palette holding every source and target block of `config`.
    pub fn from_config(config: &RuntimeConfig) -> Self {
        let mut palette = Self::new();
        for (block_id, rule) in config.rules() {
            palette.register(block_id.clone());
            palette.register(rule.next_block_id.clone());
        }
        palette
    }

    pub fn register(&mut self, id: Identifier) {
        self.known.insert(id);
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.known.contains(id)
    }
}

impl BlockRegistry for Palette {
    type Block = Identifier;

    fn block_id(&self, block: &Identifier) -> Identifier {
        block.clone()
    }

    fn default_state(&self, id: &Identifier) -> Option<Identifier> {
        self.known.get(id).cloned()
    }
}

/// A simple walking entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Mob {
    pub entity_id: Identifier,
    pub spawn_group: Option<String>,
    /// Feet position
    pub position: DVec3,
}

impl Mob {
    pub fn new(entity_id: Identifier, spawn_group: Option<String>, position: DVec3) -> Self {
        Self { entity_id, spawn_group, position }
    }
}

impl Walker for Mob {
    fn entity_id(&self) -> &Identifier {
        &self.entity_id
    }

    fn spawn_group(&self) -> Option<&str> {
        self.spawn_group.as_deref()
    }

    fn position(&self) -> DVec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::IVec3;

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    #[test]
    fn test_unset_blocks_read_as_fill() {
        let mut world = GridWorld::new(id("air"));
        assert_eq!(world.block_state(IVec3::new(1, 2, 3)), id("air"));

        world.set_block_state(IVec3::new(1, 2, 3), id("grass_block"));
        assert_eq!(world.block(IVec3::new(1, 2, 3)), id("grass_block"));
        assert_eq!(world.placed_blocks().len(), 1);
    }

    #[test]
    fn test_time() {
        let mut world = GridWorld::new(id("air"));
        world.set_time(40);
        world.advance(2);
        assert_eq!(world.time(), 42);
    }

    #[test]
    fn test_palette_reverse_lookup() {
        let mut palette = Palette::new();
        palette.register(id("dirt_path"));
        assert_eq!(palette.default_state(&id("dirt_path")), Some(id("dirt_path")));
        assert_eq!(palette.default_state(&id("gravel")), None);
    }

    #[test]
    fn test_mob_standing_on() {
        let mob = Mob::new(id("player"), None, DVec3::new(-0.5, 64.0, 3.2));
        assert_eq!(mob.block_pos(), IVec3::new(-1, 64, 3));
        assert_eq!(mob.standing_on(), IVec3::new(-1, 63, 3));
    }
}
