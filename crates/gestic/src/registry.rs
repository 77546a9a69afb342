//! Observation registry: registration, pause/resume, removal, and
//! priority/direction-filtered selection.

use crate::id::{IdGenerator, ObservationId};
use crate::observer::{GestureObserver, NoopObserver};
use crate::types::{Axis, AxisFilter};
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::rc::Rc;

/// Registration options. Every field has a documented default, applied at
/// construction rather than at each call site.
#[derive(Clone)]
pub struct ObservationConfig {
    /// Higher wins; equal priorities all receive events. Default 0.
    pub priority: i32,
    /// Which locked axis this observation accepts. Default `Either`.
    pub direction: AxisFilter,
    /// Paused observations stay registered but are invisible to selection.
    /// Default false.
    pub paused: bool,
    /// Lifecycle callbacks. Default ignores everything.
    pub observer: Rc<dyn GestureObserver>,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            priority: 0,
            direction: AxisFilter::Either,
            paused: false,
            observer: Rc::new(NoopObserver),
        }
    }
}

impl ObservationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_direction(mut self, direction: AxisFilter) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn with_observer(mut self, observer: Rc<dyn GestureObserver>) -> Self {
        self.observer = observer;
        self
    }
}

struct Observation {
    priority: i32,
    direction: AxisFilter,
    paused: bool,
    observer: Rc<dyn GestureObserver>,
}

/// One selection entry: the observation id plus a clone of its observer
/// capability, captured at axis-lock time. Holding the `Rc` keeps the
/// observer callable even if the observation is removed mid-gesture.
#[derive(Clone)]
pub(crate) struct SelectedObservation {
    pub(crate) id: ObservationId,
    pub(crate) observer: Rc<dyn GestureObserver>,
}

pub(crate) type Selection = SmallVec<[SelectedObservation; 4]>;

/// Insertion-ordered mapping from identifier to observation record.
pub(crate) struct ObservationRegistry {
    observations: IndexMap<ObservationId, Observation>,
    ids: IdGenerator,
}

impl ObservationRegistry {
    pub(crate) fn new() -> Self {
        Self {
            observations: IndexMap::new(),
            ids: IdGenerator::new(),
        }
    }

    /// Inserts a new observation and returns its generated id. Never fails.
    pub(crate) fn register(&mut self, config: ObservationConfig) -> ObservationId {
        let id = self.ids.next();
        self.observations.insert(
            id.clone(),
            Observation {
                priority: config.priority,
                direction: config.direction,
                paused: config.paused,
                observer: config.observer,
            },
        );
        id
    }

    pub(crate) fn pause(&mut self, id: &ObservationId) -> bool {
        self.set_paused(id, true)
    }

    pub(crate) fn resume(&mut self, id: &ObservationId) -> bool {
        self.set_paused(id, false)
    }

    fn set_paused(&mut self, id: &ObservationId, paused: bool) -> bool {
        match self.observations.get_mut(id) {
            Some(observation) => {
                observation.paused = paused;
                true
            }
            None => false,
        }
    }

    /// Deletes an observation, preserving the insertion order of the rest.
    ///
    /// An in-flight gesture keeps its frozen selection snapshot; removal only
    /// affects selections captured by later gestures.
    pub(crate) fn remove(&mut self, id: &ObservationId) -> bool {
        self.observations.shift_remove(id).is_some()
    }

    /// Selects the highest-priority tier of non-paused observations whose
    /// direction admits `axis`.
    ///
    /// Ties are not broken: every observation at the winning priority is
    /// returned, in registry insertion order. Empty if nothing matches. Full
    /// scan; registries hold dozens of entries, not thousands.
    pub(crate) fn select(&self, axis: Axis) -> Selection {
        let mut top_priority = i32::MIN;
        let mut selection = Selection::new();

        for (id, observation) in &self.observations {
            if observation.paused || !observation.direction.admits(axis) {
                continue;
            }
            if selection.is_empty() || observation.priority > top_priority {
                top_priority = observation.priority;
                selection.clear();
                selection.push(SelectedObservation {
                    id: id.clone(),
                    observer: observation.observer.clone(),
                });
            } else if observation.priority == top_priority {
                selection.push(SelectedObservation {
                    id: id.clone(),
                    observer: observation.observer.clone(),
                });
            }
        }

        selection
    }

    pub(crate) fn len(&self) -> usize {
        self.observations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(selection: &Selection) -> Vec<ObservationId> {
        selection.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn register_returns_distinct_ids() {
        let mut registry = ObservationRegistry::new();
        let a = registry.register(ObservationConfig::new());
        let b = registry.register(ObservationConfig::new());
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn select_returns_only_the_top_priority_tier() {
        let mut registry = ObservationRegistry::new();
        let five_a = registry.register(ObservationConfig::new().with_priority(5));
        let five_b = registry.register(ObservationConfig::new().with_priority(5));
        let _three = registry.register(ObservationConfig::new().with_priority(3));

        let selection = registry.select(Axis::Horizontal);
        assert_eq!(ids(&selection), vec![five_a, five_b]);
    }

    #[test]
    fn ties_are_returned_in_insertion_order() {
        let mut registry = ObservationRegistry::new();
        let first = registry.register(ObservationConfig::new().with_priority(2));
        let second = registry.register(ObservationConfig::new().with_priority(2));

        let selection = registry.select(Axis::Vertical);
        assert_eq!(ids(&selection), vec![first, second]);
    }

    #[test]
    fn later_higher_priority_displaces_earlier_tier() {
        let mut registry = ObservationRegistry::new();
        let _low = registry.register(ObservationConfig::new().with_priority(1));
        let high = registry.register(ObservationConfig::new().with_priority(9));

        let selection = registry.select(Axis::Horizontal);
        assert_eq!(ids(&selection), vec![high]);
    }

    #[test]
    fn negative_priorities_are_still_selectable() {
        let mut registry = ObservationRegistry::new();
        let only = registry.register(ObservationConfig::new().with_priority(i32::MIN));
        assert_eq!(ids(&registry.select(Axis::Horizontal)), vec![only]);
    }

    #[test]
    fn direction_filter_excludes_mismatched_axis() {
        let mut registry = ObservationRegistry::new();
        let vertical =
            registry.register(ObservationConfig::new().with_direction(AxisFilter::Vertical));
        let either = registry.register(ObservationConfig::new());

        assert_eq!(ids(&registry.select(Axis::Horizontal)), vec![either.clone()]);
        assert_eq!(ids(&registry.select(Axis::Vertical)), vec![vertical, either]);
    }

    #[test]
    fn no_match_yields_empty_selection() {
        let mut registry = ObservationRegistry::new();
        registry.register(ObservationConfig::new().with_direction(AxisFilter::Vertical));
        assert!(registry.select(Axis::Horizontal).is_empty());
    }

    #[test]
    fn paused_observations_are_invisible_regardless_of_priority() {
        let mut registry = ObservationRegistry::new();
        let loud = registry.register(ObservationConfig::new().with_priority(100));
        let quiet = registry.register(ObservationConfig::new().with_priority(0));

        assert!(registry.pause(&loud));
        assert_eq!(ids(&registry.select(Axis::Horizontal)), vec![quiet.clone()]);

        assert!(registry.resume(&loud));
        assert_eq!(ids(&registry.select(Axis::Horizontal)), vec![loud]);
    }

    #[test]
    fn registering_paused_starts_invisible() {
        let mut registry = ObservationRegistry::new();
        registry.register(ObservationConfig::new().with_paused(true));
        assert!(registry.select(Axis::Horizontal).is_empty());
    }

    #[test]
    fn unknown_ids_report_false() {
        let mut registry = ObservationRegistry::new();
        let id = registry.register(ObservationConfig::new());
        assert!(registry.remove(&id));
        assert!(!registry.remove(&id));
        assert!(!registry.pause(&id));
        assert!(!registry.resume(&id));
    }

    #[test]
    fn remove_preserves_order_of_the_rest() {
        let mut registry = ObservationRegistry::new();
        let a = registry.register(ObservationConfig::new().with_priority(1));
        let b = registry.register(ObservationConfig::new().with_priority(1));
        let c = registry.register(ObservationConfig::new().with_priority(1));

        assert!(registry.remove(&b));
        assert_eq!(ids(&registry.select(Axis::Horizontal)), vec![a, c]);
    }
}
