//! Terminal front end: renderer, table view, and the physics substrate.
//!
//! This crate is the "external collaborator" the core is written against.
//! It consumes snapshots and render intents, simulates resting positions for
//! free cards, and owns the terminal session.

pub mod renderer;
pub mod substrate;
pub mod table_view;

pub use renderer::TerminalRenderer;
pub use substrate::{Bounds, FieldSubstrate};
pub use table_view::{home_positions, table_bounds, TableView, Viewport};
