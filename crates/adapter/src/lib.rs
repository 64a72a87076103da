//! Adapter module - external renderer/AI control via TCP with JSON protocol
//!
//! This crate lets an external process drive the game and render it. The
//! protocol is **line-delimited JSON** over TCP:
//!
//! 1. **Connection**: client connects (default: 127.0.0.1:7878)
//! 2. **Handshake**: client sends `hello`, server responds with `welcome`
//! 3. **Commanding**: client sends `command` lines (`tap`, `tilt`, `restart`)
//! 4. **Observation streaming**: the game broadcasts `observation` lines
//!    carrying the round snapshot plus the render intents emitted since the
//!    previous observation
//!
//! # Message types
//!
//! Client → game: `hello`, `command`. Game → client: `welcome`,
//! `observation`, `ack`, `error`.
//!
//! Illegal gameplay commands (tap on a matched slot, third tap while two
//! cards show) are acked with `applied: false` - the game silently ignores
//! them by policy. Only malformed input produces `error` replies.
//!
//! # Environment variables
//!
//! - `PAIRS_AI_HOST`: bind address (default: "127.0.0.1")
//! - `PAIRS_AI_PORT`: port number (default: 7878)
//! - `PAIRS_AI_MAX_PENDING`: inbound command buffer (default: 16)
//! - `PAIRS_AI_DISABLED`: set to "1" or "true" to disable the adapter
//!
//! # Example protocol flow
//!
//! ```text
//! Client -> Game: {"type":"hello","seq":1,"ts":1,"client":{"name":"my-ai","version":"1.0.0"},"protocol_version":"1.0.0"}
//! Game -> Client: {"type":"welcome","seq":1,"ts":2,"protocol_version":"1.0.0","slot_count":16}
//! Client -> Game: {"type":"command","seq":2,"ts":3,"mode":"tap","slot":5}
//! Game -> Client: {"type":"ack","seq":2,"ts":4,"applied":true}
//! Game -> Client: {"type":"observation","seq":3,"ts":5,"slots":[...],"intents":[{"kind":"setFaceUp","slot":5,"faceUp":true}, ...], ...}
//! ```

pub mod protocol;
pub mod runtime;
pub mod server;

pub use protocol::{build_observation, create_hello, ObservationMessage, PROTOCOL_VERSION};
pub use runtime::{Adapter, ClientCommand, InboundCommand, OutboundMessage};
pub use server::{ack_line, run_server, ServerConfig};
