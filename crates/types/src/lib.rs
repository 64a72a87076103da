//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (core logic, UI rendering, AI protocol).
//!
//! # Table dimensions
//!
//! The default table is 16 slots (8 pairs). Slot counts must be even and can
//! hold at most 104 slots (two copies of every card in a 52-card deck).
//!
//! # Timing constants
//!
//! Timing values are in milliseconds and are published for renderers; the
//! core itself never consults the clock:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `FLIP_DURATION_MS` | 300 | Face-up/face-down flip animation |
//! | `MATCH_GROW_DURATION_MS` | 600 | Grow-and-fade celebration on a match |
//! | `FLIP_BACK_DELAY_MS` | 700 | Pause before a non-matching pair flips back |

/// Default number of slots on the table (must be even).
pub const DEFAULT_SLOT_COUNT: usize = 16;

/// Hard upper bound on slot count: two copies of each of the 52 cards.
pub const MAX_SLOT_COUNT: usize = 104;

/// Fixed timestep interval (~60 FPS) for the front-end loop.
pub const TICK_MS: u32 = 16;

/// Flip animation duration (renderer contract, not a core timing).
pub const FLIP_DURATION_MS: u32 = 300;

/// Grow-and-fade celebration duration for a matched pair.
pub const MATCH_GROW_DURATION_MS: u32 = 600;

/// Visible pause before a non-matching pair flips back down.
pub const FLIP_BACK_DELAY_MS: u32 = 700;

/// Scale factor applied to matched cards during the celebration.
pub const MATCHED_SCALE: f32 = 3.0;

/// Force magnitude applied to free cards while a round is active.
pub const GRAVITY_MAGNITUDE: f32 = 1.0;

/// Index of a fixed card position on the table.
pub type SlotId = usize;

/// The thirteen card ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in display order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Display order 1..=13 (Ace low). Used for sorting in views only,
    /// never for gameplay comparison.
    pub fn order(&self) -> u8 {
        *self as u8 + 1
    }

    /// One- or two-character display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Parse rank from its protocol string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ace" => Some(Rank::Ace),
            "two" => Some(Rank::Two),
            "three" => Some(Rank::Three),
            "four" => Some(Rank::Four),
            "five" => Some(Rank::Five),
            "six" => Some(Rank::Six),
            "seven" => Some(Rank::Seven),
            "eight" => Some(Rank::Eight),
            "nine" => Some(Rank::Nine),
            "ten" => Some(Rank::Ten),
            "jack" => Some(Rank::Jack),
            "queen" => Some(Rank::Queen),
            "king" => Some(Rank::King),
            _ => None,
        }
    }

    /// Protocol string (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Ace => "ace",
            Rank::Two => "two",
            Rank::Three => "three",
            Rank::Four => "four",
            Rank::Five => "five",
            Rank::Six => "six",
            Rank::Seven => "seven",
            Rank::Eight => "eight",
            Rank::Nine => "nine",
            Rank::Ten => "ten",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
        }
    }
}

/// The four card suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 0,
    Hearts = 1,
    Diamonds = 2,
    Clubs = 3,
}

impl Suit {
    /// All suits in display order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Single-character display symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Spades => "♠",
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
        }
    }

    /// Red suits render differently; gameplay never consults color.
    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }

    /// Parse suit from its protocol string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spades" => Some(Suit::Spades),
            "hearts" => Some(Suit::Hearts),
            "diamonds" => Some(Suit::Diamonds),
            "clubs" => Some(Suit::Clubs),
            _ => None,
        }
    }

    /// Protocol string (lowercase).
    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }
}

/// A playing card: an immutable (rank, suit) pair.
///
/// Equality is component-wise. Two cards with the same rank and suit are
/// interchangeable; the engine distinguishes duplicated pair cards only by
/// the slot holding them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Short display label like "A♠" or "10♦".
    pub fn label(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

/// A 2D vector used for the field force direction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Discrete device orientations reported with accelerometer samples.
///
/// The raw (ax, ay) sample is expressed in the device's own frame; the table
/// below remaps it into screen space for each orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceOrientation {
    Upright,
    UpsideDown,
    RotatedRight,
    RotatedLeft,
    /// Face-up/face-down or unknown: contributes no force.
    Other,
}

impl DeviceOrientation {
    /// Remap a raw accelerometer sample into a screen-space direction.
    ///
    /// Fixed table: upright (x, -y); upside-down (x, y); rotated-right
    /// (y, x); rotated-left (y, -x); other (0, 0).
    pub fn remap(&self, ax: f32, ay: f32) -> Vec2 {
        match self {
            DeviceOrientation::Upright => Vec2::new(ax, -ay),
            DeviceOrientation::UpsideDown => Vec2::new(ax, ay),
            DeviceOrientation::RotatedRight => Vec2::new(ay, ax),
            DeviceOrientation::RotatedLeft => Vec2::new(ay, -ax),
            DeviceOrientation::Other => Vec2::ZERO,
        }
    }

    /// Parse orientation from its protocol string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "upright" => Some(DeviceOrientation::Upright),
            "upsidedown" => Some(DeviceOrientation::UpsideDown),
            "rotatedright" => Some(DeviceOrientation::RotatedRight),
            "rotatedleft" => Some(DeviceOrientation::RotatedLeft),
            "other" => Some(DeviceOrientation::Other),
            _ => None,
        }
    }

    /// Protocol string.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceOrientation::Upright => "upright",
            DeviceOrientation::UpsideDown => "upsideDown",
            DeviceOrientation::RotatedRight => "rotatedRight",
            DeviceOrientation::RotatedLeft => "rotatedLeft",
            DeviceOrientation::Other => "other",
        }
    }
}
