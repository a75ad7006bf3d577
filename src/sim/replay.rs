//! Scripted step replays.
//!
//! A replay script places some blocks and then lists entity steps in tick
//! order. Running it feeds every step through a [`TrampleService`] and
//! records what happened.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::RuntimeConfig;
use crate::core::error::Error;
use crate::core::identifier::Identifier;
use crate::core::types::{BlockPos, DVec3, IVec3, Result, Tick};
use crate::trample::{BlockHistory, StepOutcome, TrampleService, Walker};
use super::world::{GridWorld, Mob, Palette};

/// A block placed before the replay starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedBlock {
    pub pos: [i32; 3],
    pub block: Identifier,
}

/// One entity step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedStep {
    pub tick: Tick,
    pub entity: Identifier,
    #[serde(default)]
    pub spawn_group: Option<String>,
    /// Feet position
    pub feet: [f64; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default = "default_fill")]
    pub fill: Identifier,
    #[serde(default)]
    pub blocks: Vec<PlacedBlock>,
    #[serde(default)]
    pub steps: Vec<ScriptedStep>,
}

fn default_fill() -> Identifier {
    Identifier::vanilla("air")
}

impl ReplayScript {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

/// Outcome of a single scripted step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepRecord {
    pub tick: Tick,
    pub entity: Identifier,
    pub pos: BlockPos,
    pub outcome: StepOutcome,
}

/// Everything a replay produced.
#[derive(Debug)]
pub struct ReplayReport {
    pub steps: Vec<StepRecord>,
    /// Final placed blocks, sorted by position
    pub blocks: Vec<(BlockPos, Identifier)>,
    /// Positions still holding history, sorted by position
    pub tracked: Vec<(BlockPos, BlockHistory)>,
}

impl ReplayReport {
    pub fn transitions(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Transitioned { .. }))
            .count()
    }
}

/// Run `script` against `config` in a fresh world.
pub fn run_replay(config: RuntimeConfig, script: &ReplayScript) -> Result<ReplayReport> {
    let mut palette = Palette::from_config(&config);
    let mut world = GridWorld::new(script.fill.clone());
    for placed in &script.blocks {
        palette.register(placed.block.clone());
        world.set_block(IVec3::from_array(placed.pos), placed.block.clone());
    }

    let mut service = TrampleService::with_config(config);
    let mut records = Vec::with_capacity(script.steps.len());
    let mut previous = 0;

    for (index, step) in script.steps.iter().enumerate() {
        if step.tick < previous {
            return Err(Error::ReplayOutOfOrder { index, tick: step.tick, previous });
        }
        previous = step.tick;
        world.set_time(step.tick);

        let mob = Mob::new(step.entity.clone(), step.spawn_group.clone(), DVec3::from_array(step.feet));
        let outcome = service.entity_stepped(&mob, &mut world, &palette);
        records.push(StepRecord {
            tick: step.tick,
            entity: step.entity.clone(),
            pos: mob.standing_on(),
            outcome,
        });
    }

    let mut tracked: Vec<_> = service.tracked().map(|(pos, h)| (pos, *h)).collect();
    tracked.sort_by_key(|(p, _)| (p.x, p.y, p.z));

    Ok(ReplayReport {
        steps: records,
        blocks: world.placed_blocks(),
        tracked,
    })
}
