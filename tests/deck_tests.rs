//! Deck tests - uniqueness and exhaustion properties

use std::collections::HashSet;

use tui_pairs::core::Deck;
use tui_pairs::types::{Rank, Suit};

#[test]
fn test_deck_covers_all_52_combinations_exactly_once() {
    for seed in [1, 7, 12345, u32::MAX] {
        let mut deck = Deck::new(seed);
        let mut seen = HashSet::new();

        while let Some(card) = deck.draw() {
            assert!(
                seen.insert((card.rank, card.suit)),
                "seed {}: duplicate card {}",
                seed,
                card
            );
        }

        assert_eq!(seen.len(), 52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                assert!(seen.contains(&(rank, suit)));
            }
        }
    }
}

#[test]
fn test_53_draws_yield_52_cards_then_none() {
    let mut deck = Deck::new(99);

    let mut drawn = 0;
    for i in 0..53 {
        match deck.draw() {
            Some(_) => {
                assert!(i < 52, "draw {} should have been empty", i);
                drawn += 1;
            }
            None => assert_eq!(i, 52),
        }
    }
    assert_eq!(drawn, 52);

    // Absent thereafter.
    assert!(deck.draw().is_none());
    assert!(deck.is_empty());
}

#[test]
fn test_draw_order_varies_across_seeds() {
    let mut a = Deck::new(1);
    let mut b = Deck::new(2);

    let first_a: Vec<_> = (0..10).map(|_| a.draw().unwrap()).collect();
    let first_b: Vec<_> = (0..10).map(|_| b.draw().unwrap()).collect();
    assert_ne!(first_a, first_b);
}
