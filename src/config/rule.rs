//! Runtime rule snapshot consumed by the trampling engine.

use std::collections::HashMap;

use crate::core::error::Error;
use crate::core::identifier::Identifier;
use crate::core::types::{Result, Tick};
use crate::trample::eligibility::EntityFilter;
use crate::trample::host::BlockRegistry;

/// What happens to one source block when it is trampled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockRule {
    /// Steps required to transition. At least 1.
    pub step_count: u32,
    /// Max ticks between steps before the count restarts. 0 = no timeout.
    pub timeout_ticks: Tick,
    /// Block the source turns into.
    pub next_block_id: Identifier,
    /// Entities whose steps count for this rule.
    pub filter: EntityFilter,
}

/// Immutable set of per-block rules.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    rules: HashMap<Identifier, BlockRule>,
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` for `block_id`, validating it.
    pub fn insert(&mut self, block_id: Identifier, rule: BlockRule) -> Result<()> {
        if rule.step_count == 0 {
            return Err(Error::ZeroStepCount(block_id));
        }
        if rule.filter.is_empty() {
            return Err(Error::RuleMatchesNothing(block_id));
        }
        if self.rules.contains_key(&block_id) {
            return Err(Error::DuplicateRule(block_id));
        }
        self.rules.insert(block_id, rule);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_rule(mut self, block_id: Identifier, rule: BlockRule) -> Result<Self> {
        self.insert(block_id, rule)?;
        Ok(self)
    }

    pub fn rule(&self, block_id: &Identifier) -> Option<&BlockRule> {
        self.rules.get(block_id)
    }

    pub fn has_rule(&self, block_id: &Identifier) -> bool {
        self.rules.contains_key(block_id)
    }

    pub fn rules(&self) -> impl Iterator<Item = (&Identifier, &BlockRule)> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Union of every rule's eligibility sets.
    pub fn global_filter(&self) -> EntityFilter {
        EntityFilter::union(self.rules.values().map(|rule| &rule.filter))
    }

    /// Check that every source and target block resolves in `registry`.
    pub fn verify_targets<R: BlockRegistry>(&self, registry: &R) -> Result<()> {
        for (block_id, rule) in &self.rules {
            for id in [block_id, &rule.next_block_id] {
                if registry.default_state(id).is_none() {
                    return Err(Error::UnresolvedBlock(id.clone()));
                }
            }
        }
        Ok(())
    }
}
