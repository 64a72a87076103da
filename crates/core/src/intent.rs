//! Intent module - what the engine tells the renderer to do
//!
//! The core never animates. Each state transition pushes intents describing
//! what changed; the renderer sequences and times them (flip animations, the
//! grow-and-fade celebration, the pause before a flip-back).

use tui_pairs_types::{SlotId, Vec2};

/// A renderable command emitted by the match engine or field model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Flip a card face-up or face-down.
    SetFaceUp { slot: SlotId, face_up: bool },
    /// Celebrate a matched pair: scale up and fade out.
    GrowAndFade { slots: [SlotId; 2] },
    /// Remove a matched pair from view after the celebration.
    Hide { slots: [SlotId; 2] },
    /// Flip a non-matching pair back face-down after the visible pause.
    FlipBack { slots: [SlotId; 2] },
    /// Attach a slot's card to the force field.
    AdmitToField { slot: SlotId },
    /// Detach a slot's card from the force field.
    EvictFromField { slot: SlotId },
    /// Uniform force direction changed.
    SetFieldDirection { direction: Vec2 },
    /// Force magnitude toggled (zero when the round is inactive).
    SetFieldMagnitude { value: f32 },
}
