//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the full pair-matching rules with zero dependencies
//! on UI, networking, or I/O:
//!
//! - **Deterministic**: the same seed produces the same deal every time
//! - **Event-driven**: state mutates only in response to discrete events
//!   (tap completed, sensor sample, lifecycle toggle)
//! - **Intent-emitting**: every transition is reported as render intents;
//!   the renderer sequences animation, the core only computes next state
//!
//! # Module structure
//!
//! - [`deck`]: standard 52-card deck with uniform random draw
//! - [`deal`]: pairing drawn cards and assigning them to slots
//! - [`round`]: the match engine - two-card rule, match detection, slot
//!   lifecycle
//! - [`field`]: which slots are subject to the simulated gravity force
//! - [`snapshot`]: reusable observations for adapters and views
//! - [`rng`]: seeded LCG used for drawing and dealing
//!
//! # Game rules
//!
//! Cards are dealt face-down in pairs. A tap reveals a card and removes it
//! from the force field. The second revealed card resolves the turn: equal
//! rank and suit removes both permanently; anything else flips both back
//! and re-admits them to the field. At most two cards are ever face-up.
//!
//! # Example
//!
//! ```
//! use tui_pairs_core::Round;
//!
//! let mut round = Round::deal(16, 12345).expect("even slot count");
//! round.set_field_active(true);
//!
//! round.choose_slot(0);
//! round.choose_slot(1);
//!
//! // Either a matched pair or both flipped back; never more than two up.
//! assert!(round.revealed().len() <= 2);
//! for intent in round.take_intents() {
//!     // forward to a renderer
//!     let _ = intent;
//! }
//! ```

pub mod deal;
pub mod deck;
pub mod field;
pub mod intent;
pub mod rng;
pub mod round;
pub mod snapshot;

pub use deal::{deal, DealError};
pub use deck::Deck;
pub use field::FieldModel;
pub use intent::Intent;
pub use rng::SimpleRng;
pub use round::{Round, Slot, SlotPhase};
pub use snapshot::{RoundSnapshot, SlotSnapshot};
