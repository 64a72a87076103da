//! Deck module - standard 52-card deck with random draw
//!
//! Construction enumerates the full rank x suit cross product exactly once.
//! `draw` removes and returns a uniformly random remaining card; drawing from
//! an empty deck yields `None` rather than an error - the caller decides
//! whether exhaustion is fatal.

use tui_pairs_types::{Card, Rank, Suit};

use crate::rng::SimpleRng;

/// An ordered, mutable sequence of the remaining undrawn cards.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: SimpleRng,
}

impl Deck {
    /// Create a full 52-card deck seeded for deterministic draws.
    pub fn new(seed: u32) -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }

        Self {
            cards,
            rng: SimpleRng::new(seed),
        }
    }

    /// Remove and return one uniformly random remaining card.
    ///
    /// Every remaining card has equal selection probability at each call.
    pub fn draw(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let index = self.rng.pick_index(self.cards.len());
        // swap_remove is O(1); deck order carries no meaning.
        Some(self.cards.swap_remove(index))
    }

    /// Number of cards left in the deck.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// RNG state after construction/draws (seeds follow-up rounds).
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_deck_has_52_unique_cards() {
        let deck = Deck::new(1);
        assert_eq!(deck.len(), 52);
    }

    #[test]
    fn test_draw_exhausts_without_repeats() {
        let mut deck = Deck::new(42);
        let mut seen = HashSet::new();

        for _ in 0..52 {
            let card = deck.draw().expect("deck should not be empty yet");
            assert!(seen.insert(card), "duplicate card drawn: {}", card);
        }

        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_full_cross_product_covered() {
        let mut deck = Deck::new(7);
        let mut seen = HashSet::new();
        while let Some(card) = deck.draw() {
            seen.insert((card.rank, card.suit));
        }

        assert_eq!(seen.len(), 52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                assert!(seen.contains(&(rank, suit)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Deck::new(12345);
        let mut b = Deck::new(12345);
        for _ in 0..52 {
            assert_eq!(a.draw(), b.draw());
        }
    }
}
