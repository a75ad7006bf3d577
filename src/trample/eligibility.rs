//! Entity eligibility filtering.
//!
//! A filter has two independent axes: a set of entity ids and a set of spawn
//! groups. An absent axis places no requirement of its own, but an entity
//! must still match one of the present axes. A filter with both axes absent
//! matches nothing.

use std::collections::HashSet;

use crate::core::identifier::Identifier;
use super::host::Walker;

/// Returns true if the walker's id is in `entity_ids` or its spawn group is
/// in `spawn_groups`. `None` means that axis is absent.
pub fn is_matching_entity<W: Walker + ?Sized>(
    walker: &W,
    entity_ids: Option<&HashSet<Identifier>>,
    spawn_groups: Option<&HashSet<String>>,
) -> bool {
    if let Some(ids) = entity_ids {
        if ids.contains(walker.entity_id()) {
            return true;
        }
    }
    if let Some(groups) = spawn_groups {
        if let Some(group) = walker.spawn_group() {
            if groups.contains(group) {
                return true;
            }
        }
    }
    false
}

/// Pair of optional eligibility sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityFilter {
    entity_ids: Option<HashSet<Identifier>>,
    spawn_groups: Option<HashSet<String>>,
}

impl EntityFilter {
    /// Build a filter. An empty collection leaves that axis absent.
    pub fn new<I, G>(entity_ids: I, spawn_groups: G) -> Self
    where
        I: IntoIterator<Item = Identifier>,
        G: IntoIterator<Item = String>,
    {
        Self {
            entity_ids: non_empty(entity_ids.into_iter().collect()),
            spawn_groups: non_empty(spawn_groups.into_iter().collect()),
        }
    }

    /// Filter that matches nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Union of several filters, axis by axis. An axis that no filter
    /// restricts stays absent rather than becoming an empty set.
    pub fn union<'a>(filters: impl IntoIterator<Item = &'a EntityFilter>) -> Self {
        let mut entity_ids = HashSet::new();
        let mut spawn_groups = HashSet::new();
        for filter in filters {
            if let Some(ids) = &filter.entity_ids {
                entity_ids.extend(ids.iter().cloned());
            }
            if let Some(groups) = &filter.spawn_groups {
                spawn_groups.extend(groups.iter().cloned());
            }
        }
        Self {
            entity_ids: non_empty(entity_ids),
            spawn_groups: non_empty(spawn_groups),
        }
    }

    pub fn entity_ids(&self) -> Option<&HashSet<Identifier>> {
        self.entity_ids.as_ref()
    }

    pub fn spawn_groups(&self) -> Option<&HashSet<String>> {
        self.spawn_groups.as_ref()
    }

    /// True when both axes are absent.
    pub fn is_empty(&self) -> bool {
        self.entity_ids.is_none() && self.spawn_groups.is_none()
    }

    pub fn matches<W: Walker + ?Sized>(&self, walker: &W) -> bool {
        is_matching_entity(walker, self.entity_ids(), self.spawn_groups())
    }
}

fn non_empty<T>(set: HashSet<T>) -> Option<HashSet<T>> {
    if set.is_empty() { None } else { Some(set) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DVec3;

    struct Critter {
        id: Identifier,
        group: Option<&'static str>,
    }

    impl Walker for Critter {
        fn entity_id(&self) -> &Identifier {
            &self.id
        }
        fn spawn_group(&self) -> Option<&str> {
            self.group
        }
        fn position(&self) -> DVec3 {
            DVec3::ZERO
        }
    }

    fn id(s: &str) -> Identifier {
        s.parse().unwrap()
    }

    fn critter(kind: &str, group: Option<&'static str>) -> Critter {
        Critter { id: id(kind), group }
    }

    #[test]
    fn test_entity_id_axis() {
        let filter = EntityFilter::new([id("player")], Vec::<String>::new());
        assert!(filter.matches(&critter("player", None)));
        assert!(!filter.matches(&critter("cow", Some("creature"))));
    }

    #[test]
    fn test_spawn_group_axis() {
        let filter = EntityFilter::new(Vec::<Identifier>::new(), ["creature".to_string()]);
        assert!(filter.matches(&critter("cow", Some("creature"))));
        assert!(!filter.matches(&critter("zombie", Some("monster"))));
        assert!(!filter.matches(&critter("arrow", None)));
    }

    #[test]
    fn test_either_axis_suffices() {
        let filter = EntityFilter::new([id("player")], ["creature".to_string()]);
        assert!(filter.matches(&critter("player", Some("misc"))));
        assert!(filter.matches(&critter("sheep", Some("creature"))));
        assert!(!filter.matches(&critter("bat", Some("ambient"))));
    }

    #[test]
    fn test_both_absent_matches_nothing() {
        let filter = EntityFilter::none();
        assert!(filter.is_empty());
        assert!(!filter.matches(&critter("player", Some("creature"))));
        assert!(!is_matching_entity(&critter("player", None), None, None));
    }

    #[test]
    fn test_empty_sets_become_absent() {
        let filter = EntityFilter::new(Vec::<Identifier>::new(), Vec::<String>::new());
        assert_eq!(filter.entity_ids(), None);
        assert_eq!(filter.spawn_groups(), None);
    }

    #[test]
    fn test_union_keeps_unrestricted_axis_absent() {
        let a = EntityFilter::new(Vec::<Identifier>::new(), ["creature".to_string()]);
        let b = EntityFilter::new(Vec::<Identifier>::new(), ["monster".to_string()]);
        let global = EntityFilter::union([&a, &b]);

        assert_eq!(global.entity_ids(), None);
        assert_eq!(global.spawn_groups().map(|g| g.len()), Some(2));
        // The spawn-group axis is still evaluated for every entity.
        assert!(global.matches(&critter("zombie", Some("monster"))));
        assert!(!global.matches(&critter("player", Some("misc"))));
    }

    #[test]
    fn test_union_merges_both_axes() {
        let a = EntityFilter::new([id("player")], Vec::<String>::new());
        let b = EntityFilter::new([id("horse")], ["creature".to_string()]);
        let global = EntityFilter::union([&a, &b]);

        assert_eq!(global.entity_ids().map(|i| i.len()), Some(2));
        assert!(global.matches(&critter("player", None)));
        assert!(global.matches(&critter("horse", None)));
        assert!(global.matches(&critter("pig", Some("creature"))));
    }
}
