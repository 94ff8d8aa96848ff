//! Reactive measures
//!
//! A measure is a shared scalar ("a custom unit of measure in pixels") that
//! any number of nodes position themselves through. Changing a measure:
//!
//! 1. stores the new value,
//! 2. calls every change subscriber with `(old, new)` in subscription order,
//! 3. recomputes measures derived from it, depth-first,
//! 4. reports the dependent nodes whose owning containers must re-layout.
//!
//! The graph only records dependents as [`NodeId`] handles; it never owns
//! nodes, so measures and nodes can be dropped independently. Re-running
//! layout is the scene's job, driven by the [`MeasureUpdate`] returned from
//! [`MeasureGraph::set`].

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::{ensure_finite, MeasureError, Result};

new_key_type! {
    /// Handle to a measure in a [`MeasureGraph`]
    pub struct MeasureId;

    /// Handle to a node in a layout scene
    pub struct NodeId;
}

/// Called with `(old, new)` after a measure changes
pub type ChangeCallback = Box<dyn FnMut(f32, f32)>;

/// Maps a base measure's value to a derived measure's value
pub type DeriveFn = Box<dyn Fn(f32) -> f32>;

struct Measure {
    value: f32,
    subscribers: Vec<ChangeCallback>,
    dependents: SmallVec<[NodeId; 4]>,
    /// Measures derived from this one, in creation order
    derived: SmallVec<[MeasureId; 2]>,
    derivation: Option<DeriveFn>,
}

impl Measure {
    fn new(value: f32) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            dependents: SmallVec::new(),
            derived: SmallVec::new(),
            derivation: None,
        }
    }
}

/// One measure's value transition inside a [`MeasureUpdate`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeasureChange {
    pub measure: MeasureId,
    pub old: f32,
    pub new: f32,
}

/// Outcome of [`MeasureGraph::set`]
#[derive(Clone, Debug, Default)]
pub struct MeasureUpdate {
    /// Every measure that changed, the directly set one first, then derived
    /// measures in depth-first order
    pub changes: SmallVec<[MeasureChange; 2]>,
    /// Dependent nodes of all changed measures, without duplicates, in
    /// first-seen order
    pub dependents: SmallVec<[NodeId; 8]>,
}

/// Owns every measure of a scene
pub struct MeasureGraph {
    measures: SlotMap<MeasureId, Measure>,
}

impl MeasureGraph {
    pub fn new() -> Self {
        Self {
            measures: SlotMap::with_key(),
        }
    }

    /// Create a measure with an initial value
    pub fn create(&mut self, value: f32) -> Result<MeasureId> {
        let value = ensure_finite("measure value", value)?;
        Ok(self.measures.insert(Measure::new(value)))
    }

    /// Create a measure of 1 pixel per unit
    pub fn create_unit(&mut self) -> MeasureId {
        self.measures.insert(Measure::new(1.0))
    }

    /// Create a measure whose value is `derive(base)`, recomputed every time
    /// `base` changes.
    ///
    /// Derived measures can only point at measures that already exist, so
    /// derivation chains are acyclic by construction.
    pub fn derive<F>(&mut self, base: MeasureId, derive: F) -> Result<MeasureId>
    where
        F: Fn(f32) -> f32 + 'static,
    {
        let base_value = self.value(base)?;
        let value = ensure_finite("derived measure value", derive(base_value))?;

        let mut measure = Measure::new(value);
        measure.derivation = Some(Box::new(derive));
        let id = self.measures.insert(measure);

        if let Some(base) = self.measures.get_mut(base) {
            base.derived.push(id);
        }
        Ok(id)
    }

    /// Current value of a measure
    pub fn get(&self, id: MeasureId) -> Option<f32> {
        self.measures.get(id).map(|m| m.value)
    }

    /// Current value of a measure, as a typed error when it is unknown
    pub fn value(&self, id: MeasureId) -> Result<f32> {
        self.get(id).ok_or(MeasureError::UnknownMeasure(id))
    }

    pub fn contains(&self, id: MeasureId) -> bool {
        self.measures.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Register a change callback. Callbacks are never removed and fire on
    /// every future change, in registration order.
    pub fn subscribe<F>(&mut self, id: MeasureId, callback: F) -> Result<()>
    where
        F: FnMut(f32, f32) + 'static,
    {
        let measure = self
            .measures
            .get_mut(id)
            .ok_or(MeasureError::UnknownMeasure(id))?;
        measure.subscribers.push(Box::new(callback));
        Ok(())
    }

    /// Record a node whose owner must re-layout when this measure changes.
    ///
    /// Returns `false` when the node was already registered.
    pub fn add_dependent(&mut self, id: MeasureId, node: NodeId) -> Result<bool> {
        let measure = self
            .measures
            .get_mut(id)
            .ok_or(MeasureError::UnknownMeasure(id))?;
        if measure.dependents.contains(&node) {
            return Ok(false);
        }
        measure.dependents.push(node);
        Ok(true)
    }

    pub fn dependents(&self, id: MeasureId) -> &[NodeId] {
        self.measures
            .get(id)
            .map(|m| m.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Change a measure's value.
    ///
    /// Non-finite values are rejected and the previous value is kept. On
    /// success subscribers run synchronously before this returns, and derived
    /// measures are updated depth-first. A derived measure whose function
    /// produces a non-finite value keeps its previous value and its own
    /// derivations are not visited.
    pub fn set(&mut self, id: MeasureId, value: f32) -> Result<MeasureUpdate> {
        if !self.measures.contains_key(id) {
            return Err(MeasureError::UnknownMeasure(id));
        }
        if let Err(err) = ensure_finite("measure value", value) {
            tracing::warn!(?id, value, "rejected measure value; keeping previous value");
            return Err(err);
        }

        let mut update = MeasureUpdate::default();
        let mut pending: Vec<(MeasureId, f32)> = vec![(id, value)];

        while let Some((current, next)) = pending.pop() {
            let Some(measure) = self.measures.get_mut(current) else {
                continue;
            };

            let old = measure.value;
            measure.value = next;
            tracing::trace!(measure = ?current, old, new = next, "measure changed");

            for subscriber in measure.subscribers.iter_mut() {
                subscriber(old, next);
            }

            update.changes.push(MeasureChange {
                measure: current,
                old,
                new: next,
            });
            for &node in &measure.dependents {
                if !update.dependents.contains(&node) {
                    update.dependents.push(node);
                }
            }

            // Reverse so the first derived measure is popped first
            let derived = measure.derived.clone();
            for &child in derived.iter().rev() {
                let Some(derivation) = self
                    .measures
                    .get(child)
                    .and_then(|m| m.derivation.as_ref())
                else {
                    continue;
                };
                let derived_value = derivation(next);
                if derived_value.is_finite() {
                    pending.push((child, derived_value));
                } else {
                    tracing::warn!(
                        measure = ?child,
                        value = derived_value,
                        "derived measure produced a non-finite value; keeping previous value"
                    );
                }
            }
        }

        Ok(update)
    }
}

impl Default for MeasureGraph {
    fn default() -> Self {
        Self::new()
    }
}
