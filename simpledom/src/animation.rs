use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::node::NodeId;
use crate::style::{ComputedStyle, PropertyValue};
use crate::transitions::{Easing, TransitionProperty};

const PROPERTIES: [TransitionProperty; 2] = [TransitionProperty::Opacity, TransitionProperty::OffsetY];

/// A single active transition.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: PropertyValue,
    to: PropertyValue,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

/// A transition that ran to completion during [`AnimationState::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedTransition {
    pub node: NodeId,
    pub property: TransitionProperty,
    pub elapsed: Duration,
}

/// Manages transition state across frames.
#[derive(Debug, Default)]
pub struct AnimationState {
    /// Last committed computed style per node.
    snapshots: HashMap<NodeId, ComputedStyle>,
    /// Currently active transitions, ordered so completion is deterministic.
    active: BTreeMap<(NodeId, TransitionProperty), ActiveTransition>,
    /// Reduced motion flag - when true, style changes apply instantly.
    reduced_motion: bool,
}

impl AnimationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable reduced motion (accessibility).
    /// When enabled, no transitions start and running ones are dropped.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Returns true if any transition is currently active.
    pub fn has_active_transitions(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_transitioning(&self, node: NodeId, property: TransitionProperty) -> bool {
        self.active.contains_key(&(node, property))
    }

    /// Commit a node's current computed style.
    ///
    /// Compares against the previous snapshot and starts transitions for every
    /// changed property the new style configures. The first commit for a node
    /// never transitions. Returns the properties that started.
    pub fn update(
        &mut self,
        node: NodeId,
        current: ComputedStyle,
        now: Instant,
    ) -> Vec<TransitionProperty> {
        let Some(prev) = self.snapshots.insert(node, current) else {
            return Vec::new();
        };
        if prev == current {
            return Vec::new();
        }

        PROPERTIES
            .into_iter()
            .filter(|&property| self.check_and_start(node, property, &prev, &current, now))
            .collect()
    }

    fn check_and_start(
        &mut self,
        node: NodeId,
        property: TransitionProperty,
        prev: &ComputedStyle,
        current: &ComputedStyle,
        now: Instant,
    ) -> bool {
        let key = (node, property);

        // Nothing animates into or out of display: none
        if !prev.is_rendered() || !current.is_rendered() {
            self.active.remove(&key);
            return false;
        }

        let prev_val = prev.value(property);
        let curr_val = current.value(property);
        if prev_val == curr_val {
            return false;
        }

        let Some(config) = current.transitions.get(property) else {
            self.active.remove(&key);
            return false;
        };

        if self.reduced_motion || config.duration.is_zero() {
            self.active.remove(&key);
            return false;
        }

        // Retarget an in-flight transition from its current value
        let from = match self.active.get(&key) {
            Some(existing) => interpolate(existing, now),
            None => prev_val,
        };

        self.active.insert(
            key,
            ActiveTransition {
                from,
                to: curr_val,
                start: now,
                duration: config.duration,
                easing: config.easing,
            },
        );
        log::debug!(
            "{node}: {property} transition started ({:?}, {:?})",
            config.duration,
            config.easing
        );
        true
    }

    /// Remove and return every transition that has run its full duration.
    pub fn complete(&mut self, now: Instant) -> Vec<FinishedTransition> {
        let done: Vec<_> = self
            .active
            .iter()
            .filter(|(_, t)| now.saturating_duration_since(t.start) >= t.duration)
            .map(|(&key, _)| key)
            .collect();

        done.into_iter()
            .filter_map(|key| {
                let transition = self.active.remove(&key)?;
                Some(FinishedTransition {
                    node: key.0,
                    property: key.1,
                    elapsed: transition.duration,
                })
            })
            .collect()
    }

    /// Get interpolated value for a property.
    /// Returns None if no active transition for this property.
    pub fn interpolated(
        &self,
        node: NodeId,
        property: TransitionProperty,
        now: Instant,
    ) -> Option<PropertyValue> {
        self.active.get(&(node, property)).map(|t| interpolate(t, now))
    }

    /// Remove transitions and snapshots for nodes no longer in the tree.
    pub fn cleanup(&mut self, current: &HashSet<NodeId>) {
        self.snapshots.retain(|id, _| current.contains(id));
        self.active.retain(|(id, _), _| current.contains(id));
    }
}

fn interpolate(transition: &ActiveTransition, now: Instant) -> PropertyValue {
    let elapsed = now.saturating_duration_since(transition.start);
    let progress = if transition.duration.is_zero() {
        1.0
    } else {
        (elapsed.as_secs_f32() / transition.duration.as_secs_f32()).min(1.0)
    };
    let eased = transition.easing.apply(progress);

    match (transition.from, transition.to) {
        (PropertyValue::F32(from), PropertyValue::F32(to)) => {
            PropertyValue::F32(from + (to - from) * eased)
        }
        (PropertyValue::I16(from), PropertyValue::I16(to)) => {
            PropertyValue::I16(lerp_i16(from, to, eased))
        }
        (_, to) => to, // Mismatched types, just use target
    }
}

/// Linear interpolation for i16 values.
fn lerp_i16(from: i16, to: i16, t: f32) -> i16 {
    let from = from as f32;
    let to = to as f32;
    (from + (to - from) * t).round() as i16
}
