//! Adapter runtime integration.
//!
//! Bridges the sync game loop with the async TCP server. The game loop stays
//! single-threaded; it polls `try_recv` once per tick and pushes observation
//! lines back through `send`.

use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use tui_pairs_types::{DeviceOrientation, SlotId};

use crate::server::{run_server, ServerConfig};

/// Command delivered to the game loop.
#[derive(Debug, Clone)]
pub struct InboundCommand {
    pub client_id: usize,
    pub seq: u64,
    pub command: ClientCommand,
}

/// Command payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClientCommand {
    /// Tap completed on a slot.
    Tap(SlotId),
    /// Accelerometer sample in the device frame.
    Tilt {
        ax: f32,
        ay: f32,
        orientation: DeviceOrientation,
    },
    /// Re-deal the round.
    Restart,
}

/// Outbound message to be delivered by the server.
#[derive(Debug, Clone)]
pub enum OutboundMessage {
    ToClient { client_id: usize, line: String },
    Broadcast { line: String },
}

/// Running adapter instance.
pub struct Adapter {
    _rt: Runtime,
    cmd_rx: mpsc::Receiver<InboundCommand>,
    out_tx: mpsc::UnboundedSender<OutboundMessage>,
}

impl Adapter {
    /// Start the adapter from environment variables.
    ///
    /// Returns None if `PAIRS_AI_DISABLED` is set.
    pub fn start_from_env(slot_count: usize) -> Option<Self> {
        if ServerConfig::is_disabled() {
            return None;
        }

        let mut config = ServerConfig::from_env();
        config.slot_count = slot_count;
        Self::start(config)
    }

    /// Start the adapter with an explicit configuration.
    pub fn start(config: ServerConfig) -> Option<Self> {
        let max_pending = config.max_pending_commands.max(1);
        let (cmd_tx, cmd_rx) = mpsc::channel::<InboundCommand>(max_pending);
        let (out_tx, out_rx) = mpsc::unbounded_channel::<OutboundMessage>();

        let rt = Runtime::new().expect("failed to create tokio runtime");
        rt.spawn(async move {
            let _ = run_server(config, cmd_tx, out_rx, None).await;
        });

        Some(Self {
            _rt: rt,
            cmd_rx,
            out_tx,
        })
    }

    /// Non-blocking poll for the next client command.
    pub fn try_recv(&mut self) -> Option<InboundCommand> {
        self.cmd_rx.try_recv().ok()
    }

    pub fn send(&self, msg: OutboundMessage) {
        let _ = self.out_tx.send(msg);
    }

    /// Broadcast one observation line to every connected client.
    pub fn broadcast_line(&self, line: String) {
        self.send(OutboundMessage::Broadcast { line });
    }
}
