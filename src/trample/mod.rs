//! Trampling engine.
//!
//! Counts qualifying steps per block position and turns the block into its
//! configured target once enough steps land within the rule's timeout.
//! Per position the engine is either untracked or holds a [`BlockHistory`];
//! a transition always returns the position to untracked.

pub mod eligibility;
pub mod history;
pub mod host;

pub use eligibility::{EntityFilter, is_matching_entity};
pub use history::BlockHistory;
pub use host::{BlockRegistry, BlockWorld, Walker};

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::config::RuntimeConfig;
use crate::core::identifier::Identifier;
use crate::core::types::BlockPos;

/// Why a step was not counted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Feet not flush with a block boundary.
    Airborne,
    /// Entity fails the global eligibility filter.
    EntityExcluded,
    /// No rule for the block underfoot.
    Unconfigured,
    /// Entity fails the rule's own eligibility filter.
    RuleExcluded,
    /// Threshold reached but the target block could not be resolved.
    UnresolvedTarget,
}

/// Result of observing one step. Informational only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Ignored(IgnoreReason),
    /// Step counted, block unchanged.
    Counted { steps: u32, required: u32, reset: bool },
    /// Threshold reached and the block was replaced.
    Transitioned { from: Identifier, to: Identifier },
}

/// Owns the tracking map and the rule snapshot for one loaded world.
pub struct TrampleService {
    config: RuntimeConfig,
    /// Union of all rule filters, checked before any block lookup
    global: EntityFilter,
    /// Position -> accumulated steps
    tracked: HashMap<BlockPos, BlockHistory>,
}

impl TrampleService {
    /// Service with no rules. Every step is ignored until
    /// [`initialize`](Self::initialize) is called.
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::new(),
            global: EntityFilter::none(),
            tracked: HashMap::new(),
        }
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let mut service = Self::new();
        service.initialize(config);
        service
    }

    /// Install a rule snapshot. Existing history is dropped since it was
    /// accumulated under the previous rules.
    pub fn initialize(&mut self, config: RuntimeConfig) {
        self.global = config.global_filter();
        self.config = config;
        self.tracked.clear();
        log::info!(
            "Trampling initialized: {} rules, entity ids {}, spawn groups {}",
            self.config.len(),
            describe_axis(self.global.entity_ids().map(|s| s.len())),
            describe_axis(self.global.spawn_groups().map(|s| s.len())),
        );
    }

    /// Forget all history. Call when the world unloads.
    pub fn unload(&mut self) {
        log::debug!("Discarding {} tracked positions", self.tracked.len());
        self.tracked.clear();
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn global_filter(&self) -> &EntityFilter {
        &self.global
    }

    pub fn history(&self, pos: BlockPos) -> Option<&BlockHistory> {
        self.tracked.get(&pos)
    }

    /// Every position with sub-threshold history, in no particular order.
    pub fn tracked(&self) -> impl Iterator<Item = (BlockPos, &BlockHistory)> {
        self.tracked.iter().map(|(pos, history)| (*pos, history))
    }

    /// Number of positions with sub-threshold history.
    pub fn tracked_len(&self) -> usize {
        self.tracked.len()
    }

    /// Observe `walker` standing on the block directly below its feet.
    pub fn entity_stepped<P, W, R>(&mut self, walker: &P, world: &mut W, registry: &R) -> StepOutcome
    where
        P: Walker + ?Sized,
        W: BlockWorld,
        R: BlockRegistry<Block = W::Block>,
    {
        self.on_step(walker, walker.standing_on(), world, registry)
    }

    /// Observe `walker` standing on the block at `pos`.
    pub fn on_step<P, W, R>(
        &mut self,
        walker: &P,
        pos: BlockPos,
        world: &mut W,
        registry: &R,
    ) -> StepOutcome
    where
        P: Walker + ?Sized,
        W: BlockWorld,
        R: BlockRegistry<Block = W::Block>,
    {
        // Mid-jump positions produce spurious block changes.
        let y = walker.position().y;
        if !y.is_finite() || y.fract() != 0.0 {
            return StepOutcome::Ignored(IgnoreReason::Airborne);
        }
        // Almost every tick ends here, so this runs before any block lookup.
        if !self.global.matches(walker) {
            return StepOutcome::Ignored(IgnoreReason::EntityExcluded);
        }

        let block_id = registry.block_id(&world.block_state(pos));
        log::trace!("checking {} at {}", block_id, pos);
        let Some(rule) = self.config.rule(&block_id) else {
            return StepOutcome::Ignored(IgnoreReason::Unconfigured);
        };
        if !rule.filter.matches(walker) {
            return StepOutcome::Ignored(IgnoreReason::RuleExcluded);
        }

        let now = world.time();
        let (steps, reset, entry) = match self.tracked.entry(pos) {
            Entry::Occupied(mut occupied) => {
                let (steps, reset) = occupied.get_mut().record_step(now, rule.timeout_ticks);
                if reset {
                    log::debug!("step timeout on {} at {}", block_id, pos);
                } else {
                    log::debug!("{} at {}: {} of {} steps", block_id, pos, steps, rule.step_count);
                }
                (steps, reset, Entry::Occupied(occupied))
            }
            vacant => (1, false, vacant),
        };

        if steps < rule.step_count {
            if let Entry::Vacant(vacant) = entry {
                vacant.insert(BlockHistory::new(now));
            }
            return StepOutcome::Counted { steps, required: rule.step_count, reset };
        }

        if let Entry::Occupied(occupied) = entry {
            occupied.remove();
        }
        let Some(next) = registry.default_state(&rule.next_block_id) else {
            log::error!(
                "cannot resolve {} to replace {} at {}",
                rule.next_block_id, block_id, pos
            );
            return StepOutcome::Ignored(IgnoreReason::UnresolvedTarget);
        };
        log::debug!("changed {} to {} at {}", block_id, rule.next_block_id, pos);
        world.set_block_state(pos, next);
        StepOutcome::Transitioned { from: block_id, to: rule.next_block_id.clone() }
    }
}

impl Default for TrampleService {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_axis(len: Option<usize>) -> String {
    match len {
        Some(n) => n.to_string(),
        None => "unrestricted".to_string(),
    }
}
