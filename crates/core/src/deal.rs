//! Deal module - pairing drawn cards and assigning them to slots
//!
//! Dealing draws `slot_count / 2` distinct cards, duplicates each into a
//! pair, then assigns pool entries to slots by picking a uniformly random
//! remaining pool index for each slot in turn. The final slot-to-card
//! assignment is therefore a uniformly random permutation of the paired pool.

use thiserror::Error;
use tui_pairs_types::{Card, MAX_SLOT_COUNT};

use crate::deck::Deck;

/// Precondition violations that prevent a round from starting.
///
/// These are refused up front; the engine never deals partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Slot counts must be even; every card needs a partner.
    #[error("slot count {0} is odd; pairs require an even slot count")]
    OddSlotCount(usize),

    /// Zero slots is a degenerate table.
    #[error("slot count must be at least 2")]
    EmptyTable,

    /// More pairs requested than a 52-card deck can supply.
    #[error("slot count {requested} exceeds the {max} slots a 52-card deck can fill")]
    DeckExhausted { requested: usize, max: usize },
}

/// Draw and pair cards for `slot_count` slots, returning one card per slot.
///
/// The returned vector is indexed by slot id. Every card value in it appears
/// exactly twice.
pub fn deal(deck: &mut Deck, slot_count: usize) -> Result<Vec<Card>, DealError> {
    if slot_count == 0 {
        return Err(DealError::EmptyTable);
    }
    if slot_count % 2 != 0 {
        return Err(DealError::OddSlotCount(slot_count));
    }
    if slot_count > MAX_SLOT_COUNT || slot_count / 2 > deck.len() {
        return Err(DealError::DeckExhausted {
            requested: slot_count,
            max: (deck.len() * 2).min(MAX_SLOT_COUNT),
        });
    }

    // Build the paired pool: each drawn card twice.
    let mut pool = Vec::with_capacity(slot_count);
    for _ in 0..slot_count / 2 {
        // Length was checked above; a None here would be a deck bug.
        let Some(card) = deck.draw() else {
            return Err(DealError::DeckExhausted {
                requested: slot_count,
                max: pool.len(),
            });
        };
        pool.push(card);
        pool.push(card);
    }

    // Random-without-replacement assignment: one uniformly random remaining
    // pool entry per slot.
    let mut rng = crate::rng::SimpleRng::new(deck.rng_state());
    let mut assigned = Vec::with_capacity(slot_count);
    while !pool.is_empty() {
        let index = rng.pick_index(pool.len());
        assigned.push(pool.swap_remove(index));
    }

    Ok(assigned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_deal_rejects_odd_count() {
        let mut deck = Deck::new(1);
        assert_eq!(deal(&mut deck, 7), Err(DealError::OddSlotCount(7)));
    }

    #[test]
    fn test_deal_rejects_empty_table() {
        let mut deck = Deck::new(1);
        assert_eq!(deal(&mut deck, 0), Err(DealError::EmptyTable));
    }

    #[test]
    fn test_deal_rejects_oversized_table() {
        let mut deck = Deck::new(1);
        assert!(matches!(
            deal(&mut deck, 106),
            Err(DealError::DeckExhausted { .. })
        ));
        // The deck must be untouched after a refused deal.
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn test_deal_assigns_every_card_twice() {
        let mut deck = Deck::new(2024);
        let cards = deal(&mut deck, 16).unwrap();
        assert_eq!(cards.len(), 16);

        let mut counts: HashMap<(_, _), usize> = HashMap::new();
        for card in &cards {
            *counts.entry((card.rank, card.suit)).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_deal_max_table_uses_whole_deck() {
        let mut deck = Deck::new(5);
        let cards = deal(&mut deck, 104).unwrap();
        assert_eq!(cards.len(), 104);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_deal_deterministic_per_seed() {
        let mut a = Deck::new(31);
        let mut b = Deck::new(31);
        assert_eq!(deal(&mut a, 12).unwrap(), deal(&mut b, 12).unwrap());
    }
}
