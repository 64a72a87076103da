//! TUI Pairs (workspace facade crate).
//!
//! This package keeps a stable `tui_pairs::{core,adapter,term,input,types}`
//! public API while the implementation lives in dedicated crates under
//! `crates/`.

pub use tui_pairs_adapter as adapter;
pub use tui_pairs_core as core;
pub use tui_pairs_input as input;
pub use tui_pairs_term as term;
pub use tui_pairs_types as types;
