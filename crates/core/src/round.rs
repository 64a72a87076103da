//! Round module - the match engine and turn state machine
//!
//! A round owns the dealt slots, the two-card reveal rule, match detection,
//! and the field membership coupling: a slot leaving the hidden state leaves
//! the field, and re-enters it when flipped back.
//!
//! All legality decisions are made from slot state alone, never from
//! animation progress, so late or duplicated tap events are harmless no-ops.

use arrayvec::ArrayVec;
use tui_pairs_types::{Card, DeviceOrientation, SlotId};

use crate::deal::{deal, DealError};
use crate::deck::Deck;
use crate::field::FieldModel;
use crate::intent::Intent;
use crate::snapshot::{RoundSnapshot, SlotSnapshot};

/// Lifecycle phase of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPhase {
    /// Face-down and subject to the force field.
    Hidden,
    /// Face-up, waiting for its partner or for resolution.
    Revealed,
    /// Matched and removed. Terminal.
    Matched,
}

/// One fixed table position holding one card for the round's duration.
///
/// `card` is assigned at deal time and never reassigned; the flags mutate
/// only through [`Round`] transitions.
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    card: Card,
    face_up: bool,
    removed: bool,
}

impl Slot {
    fn new(card: Card) -> Self {
        Self {
            card,
            face_up: false,
            removed: false,
        }
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Free: face-down and unmatched, hence subject to the field.
    pub fn is_hidden(&self) -> bool {
        !self.face_up && !self.removed
    }

    pub fn phase(&self) -> SlotPhase {
        if self.removed {
            SlotPhase::Matched
        } else if self.face_up {
            SlotPhase::Revealed
        } else {
            SlotPhase::Hidden
        }
    }
}

/// Complete round state: slots, field, and the pending intent stream.
#[derive(Debug, Clone)]
pub struct Round {
    slots: Vec<Slot>,
    field: FieldModel,
    /// Most recently chosen slot; the tap that completes a non-matching
    /// pair is the only one allowed to trigger the flip-back.
    last_flipped: Option<SlotId>,
    matched_pairs: u32,
    seed: u32,
    intents: Vec<Intent>,
}

impl Round {
    /// Deal a fresh round of `slot_count` slots from a seeded deck.
    ///
    /// Refuses to start on precondition violations (odd or oversized slot
    /// counts) rather than dealing partial state.
    pub fn deal(slot_count: usize, seed: u32) -> Result<Self, DealError> {
        let mut deck = Deck::new(seed);
        let cards = deal(&mut deck, slot_count)?;
        Ok(Self::with_cards(cards, seed))
    }

    /// Build a round from a prepared card layout.
    ///
    /// Used by [`Round::deal`] and by tests that need a fixed table. The
    /// layout is trusted to be properly paired.
    pub fn with_cards(cards: Vec<Card>, seed: u32) -> Self {
        let mut round = Self {
            slots: cards.into_iter().map(Slot::new).collect(),
            field: FieldModel::new(),
            last_flipped: None,
            matched_pairs: 0,
            seed,
            intents: Vec::new(),
        };
        round.admit_all();
        round
    }

    /// Re-deal in place with a new seed, keeping the slot count.
    pub fn restart(&mut self, seed: u32) -> Result<(), DealError> {
        let mut deck = Deck::new(seed);
        let cards = deal(&mut deck, self.slots.len())?;

        self.slots = cards.into_iter().map(Slot::new).collect();
        self.field = FieldModel::new();
        self.last_flipped = None;
        self.matched_pairs = 0;
        self.seed = seed;
        self.intents.clear();
        self.admit_all();
        Ok(())
    }

    fn admit_all(&mut self) {
        for id in 0..self.slots.len() {
            if self.field.admit(id) {
                self.intents.push(Intent::AdmitToField { slot: id });
            }
        }
    }

    /// Handle a completed tap on `id`.
    ///
    /// Returns true if any state changed. All illegal choices (unknown id,
    /// matched slot, already-revealed slot, two cards already showing) are
    /// silent no-ops: gameplay policy, not faults.
    pub fn choose_slot(&mut self, id: SlotId) -> bool {
        let Some(slot) = self.slots.get(id) else {
            return false;
        };
        if slot.removed || slot.face_up {
            return false;
        }
        if self.revealed().len() >= 2 {
            return false;
        }

        // Leave the field first: the card is about to face up.
        if self.field.evict(id) {
            self.intents.push(Intent::EvictFromField { slot: id });
        }
        self.slots[id].face_up = true;
        self.intents.push(Intent::SetFaceUp {
            slot: id,
            face_up: true,
        });
        self.last_flipped = Some(id);

        let revealed = self.revealed();
        if revealed.len() == 2 {
            let (a, b) = (revealed[0], revealed[1]);
            if self.slots[a].card() == self.slots[b].card() {
                self.resolve_match(a, b);
            } else if self.last_flipped == Some(id) {
                // Only the tap that produced the second card flips the
                // pair back; a repeated late event cannot re-trigger it.
                self.resolve_flip_back(a, b);
            }
        }

        true
    }

    /// Terminal transition: both slots removed, permanently out of the field.
    fn resolve_match(&mut self, a: SlotId, b: SlotId) {
        self.slots[a].removed = true;
        self.slots[b].removed = true;
        self.matched_pairs += 1;
        self.last_flipped = None;

        self.intents.push(Intent::GrowAndFade { slots: [a, b] });
        self.intents.push(Intent::Hide { slots: [a, b] });
    }

    /// Non-match: both slots return to hidden and re-enter the field.
    ///
    /// The renderer owns the visible pause; state resolves immediately so
    /// the two-card rule is decided from slot state alone.
    fn resolve_flip_back(&mut self, a: SlotId, b: SlotId) {
        for id in [a, b] {
            self.slots[id].face_up = false;
            if self.field.admit(id) {
                self.intents.push(Intent::AdmitToField { slot: id });
            }
        }
        self.last_flipped = None;
        self.intents.push(Intent::FlipBack { slots: [a, b] });
    }

    /// Ids of slots currently face-up and unmatched (at most two).
    pub fn revealed(&self) -> ArrayVec<SlotId, 2> {
        let mut out = ArrayVec::new();
        for (id, slot) in self.slots.iter().enumerate() {
            if slot.phase() == SlotPhase::Revealed && out.try_push(id).is_err() {
                break;
            }
        }
        out
    }

    /// All pairs matched; the engine never auto-resets.
    pub fn is_over(&self) -> bool {
        self.slots.iter().all(|s| s.is_removed())
    }

    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(id)
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn last_flipped(&self) -> Option<SlotId> {
        self.last_flipped
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn field(&self) -> &FieldModel {
        &self.field
    }

    /// Apply an accelerometer sample to the field.
    pub fn orientation_sample(&mut self, ax: f32, ay: f32, orientation: DeviceOrientation) {
        let direction = self.field.set_direction(ax, ay, orientation);
        self.intents.push(Intent::SetFieldDirection { direction });
    }

    /// Toggle the field force on round enter/leave.
    pub fn set_field_active(&mut self, active: bool) {
        if self.field.set_active(active) {
            self.intents.push(Intent::SetFieldMagnitude {
                value: self.field.magnitude(),
            });
        }
    }

    /// Drain the intents accumulated since the last call.
    pub fn take_intents(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    /// Write the observable state into a reusable snapshot.
    pub fn snapshot_into(&self, out: &mut RoundSnapshot) {
        out.slots.clear();
        out.slots.extend(self.slots.iter().enumerate().map(|(id, slot)| SlotSnapshot {
            card: slot.card(),
            face_up: slot.is_face_up(),
            removed: slot.is_removed(),
            in_field: self.field.contains(id),
        }));
        out.revealed = self.revealed();
        out.matched_pairs = self.matched_pairs;
        out.over = self.is_over();
        out.seed = self.seed;
        out.gravity = self.field.direction();
        out.magnitude = self.field.magnitude();
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        let mut s = RoundSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_pairs_types::{Rank, Suit};

    fn fixed_round() -> Round {
        // [A♠, K♦, A♠, K♦]
        let ace = Card::new(Rank::Ace, Suit::Spades);
        let king = Card::new(Rank::King, Suit::Diamonds);
        Round::with_cards(vec![ace, king, ace, king], 1)
    }

    #[test]
    fn test_initial_deal_state() {
        let round = fixed_round();
        assert_eq!(round.slot_count(), 4);
        for id in 0..4 {
            assert_eq!(round.slot(id).unwrap().phase(), SlotPhase::Hidden);
            assert!(round.field().contains(id));
        }
        assert!(round.revealed().is_empty());
        assert!(!round.is_over());
    }

    #[test]
    fn test_reveal_leaves_field() {
        let mut round = fixed_round();
        round.take_intents();

        assert!(round.choose_slot(0));
        assert_eq!(round.slot(0).unwrap().phase(), SlotPhase::Revealed);
        assert!(!round.field().contains(0));
        assert_eq!(round.last_flipped(), Some(0));

        let intents = round.take_intents();
        assert_eq!(
            intents,
            vec![
                Intent::EvictFromField { slot: 0 },
                Intent::SetFaceUp {
                    slot: 0,
                    face_up: true
                },
            ]
        );
    }

    #[test]
    fn test_match_is_terminal() {
        let mut round = fixed_round();
        round.take_intents();

        round.choose_slot(0);
        round.choose_slot(2);

        for id in [0, 2] {
            assert_eq!(round.slot(id).unwrap().phase(), SlotPhase::Matched);
            assert!(!round.field().contains(id));
        }
        assert_eq!(round.matched_pairs(), 1);

        let intents = round.take_intents();
        assert!(intents.contains(&Intent::GrowAndFade { slots: [0, 2] }));
        assert!(intents.contains(&Intent::Hide { slots: [0, 2] }));

        // Matched slots ignore further taps.
        assert!(!round.choose_slot(0));
        assert!(!round.choose_slot(2));
        assert_eq!(round.slot(0).unwrap().phase(), SlotPhase::Matched);
    }

    #[test]
    fn test_non_match_flips_back_and_readmits() {
        let mut round = fixed_round();
        round.take_intents();

        round.choose_slot(0);
        round.choose_slot(1);

        for id in [0, 1] {
            assert_eq!(round.slot(id).unwrap().phase(), SlotPhase::Hidden);
            assert!(round.field().contains(id));
        }
        assert_eq!(round.last_flipped(), None);

        let intents = round.take_intents();
        assert!(intents.contains(&Intent::FlipBack { slots: [0, 1] }));
        assert!(intents.contains(&Intent::AdmitToField { slot: 0 }));
        assert!(intents.contains(&Intent::AdmitToField { slot: 1 }));
    }

    #[test]
    fn test_choosing_revealed_slot_is_noop() {
        let mut round = fixed_round();
        round.choose_slot(0);
        round.take_intents();

        assert!(!round.choose_slot(0));
        assert!(round.take_intents().is_empty());
        assert_eq!(round.revealed().as_slice(), &[0]);
    }

    #[test]
    fn test_unknown_slot_is_noop() {
        let mut round = fixed_round();
        round.take_intents();
        assert!(!round.choose_slot(99));
        assert!(round.take_intents().is_empty());
    }

    #[test]
    fn test_full_round_example() {
        // Full-round walkthrough on the fixed [A♠, K♦, A♠, K♦] table.
        let mut round = fixed_round();

        round.choose_slot(0);
        assert_eq!(round.revealed().as_slice(), &[0]);
        assert_eq!(round.field().len(), 3);

        round.choose_slot(2);
        assert_eq!(round.matched_pairs(), 1);
        assert_eq!(round.field().len(), 2);

        round.choose_slot(1);
        round.choose_slot(3);
        assert_eq!(round.matched_pairs(), 2);
        assert!(round.is_over());
        assert!(round.field().is_empty());
    }

    #[test]
    fn test_two_card_rule_over_random_play() {
        let mut round = Round::deal(16, 77).unwrap();
        let mut rng = crate::rng::SimpleRng::new(4242);

        for _ in 0..2000 {
            let id = rng.pick_index(round.slot_count());
            round.choose_slot(id);
            assert!(round.revealed().len() <= 2);
            // Field membership must mirror the hidden predicate exactly.
            for (sid, slot) in round.slots().iter().enumerate() {
                assert_eq!(round.field().contains(sid), slot.is_hidden());
            }
            if round.is_over() {
                break;
            }
        }
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut round = fixed_round();
        round.choose_slot(0);
        round.choose_slot(2);
        assert_eq!(round.matched_pairs(), 1);

        round.restart(99).unwrap();
        assert_eq!(round.matched_pairs(), 0);
        assert_eq!(round.slot_count(), 4);
        assert!(round.slots().iter().all(|s| s.is_hidden()));
        assert_eq!(round.field().len(), 4);
        assert_eq!(round.last_flipped(), None);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut round = fixed_round();
        round.choose_slot(0);

        let snap = round.snapshot();
        assert_eq!(snap.slots.len(), 4);
        assert!(snap.slots[0].face_up);
        assert!(!snap.slots[0].in_field);
        assert!(snap.slots[1].in_field);
        assert_eq!(snap.revealed.as_slice(), &[0]);
        assert!(!snap.over);
    }
}
