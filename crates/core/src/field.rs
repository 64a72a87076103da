//! Field module - which slots are subject to the simulated force
//!
//! The field model answers exactly two questions: which slots are currently
//! free (face-down, unmatched) and what force vector applies to them. It
//! never computes positions; motion integration belongs to the presentation
//! substrate.

use std::collections::BTreeSet;

use tui_pairs_types::{DeviceOrientation, SlotId, Vec2, GRAVITY_MAGNITUDE};

/// Membership set plus the uniform force applied to every member.
#[derive(Debug, Clone, Default)]
pub struct FieldModel {
    members: BTreeSet<SlotId>,
    direction: Vec2,
    active: bool,
}

impl FieldModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot to the force-subject set. Idempotent.
    ///
    /// Returns true if the slot was not already a member.
    pub fn admit(&mut self, id: SlotId) -> bool {
        self.members.insert(id)
    }

    /// Remove a slot from the force-subject set. Idempotent.
    ///
    /// Returns true if the slot was a member.
    pub fn evict(&mut self, id: SlotId) -> bool {
        self.members.remove(&id)
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member ids in ascending order.
    pub fn members(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.members.iter().copied()
    }

    /// Apply an accelerometer sample, remapped for the device orientation.
    ///
    /// Returns the resulting screen-space direction.
    pub fn set_direction(&mut self, ax: f32, ay: f32, orientation: DeviceOrientation) -> Vec2 {
        self.direction = orientation.remap(ax, ay);
        self.direction
    }

    /// Last screen-space direction; persists across sensor silence.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Toggle the force magnitude between zero and the active constant.
    ///
    /// Returns true if the activity state changed.
    pub fn set_active(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current force magnitude: zero while the round is inactive.
    pub fn magnitude(&self) -> f32 {
        if self.active {
            GRAVITY_MAGNITUDE
        } else {
            0.0
        }
    }
}
