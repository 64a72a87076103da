//! Snapshot module - reusable observation of a round
//!
//! Observers (the adapter, the terminal view, tests) read rounds through
//! snapshots. `Round::snapshot_into` refills an existing snapshot so steady
//! observation streams reuse the slot allocation.

use arrayvec::ArrayVec;
use tui_pairs_types::{Card, SlotId, Vec2};

/// Observable state of one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotSnapshot {
    pub card: Card,
    pub face_up: bool,
    pub removed: bool,
    pub in_field: bool,
}

/// Observable state of the whole round.
#[derive(Debug, Clone, Default)]
pub struct RoundSnapshot {
    pub slots: Vec<SlotSnapshot>,
    /// Face-up unmatched slots, at most two.
    pub revealed: ArrayVec<SlotId, 2>,
    pub matched_pairs: u32,
    pub over: bool,
    pub seed: u32,
    /// Last field direction in screen space.
    pub gravity: Vec2,
    /// Current field magnitude (zero while inactive).
    pub magnitude: f32,
}
