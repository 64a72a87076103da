//! TCP server for the renderer/AI adapter
//!
//! Accepts line-delimited JSON clients, forwards their commands to the game
//! loop through a bounded channel, and delivers outbound observation lines.
//! Uses tokio for async networking.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::protocol::{
    now_ms, AckMessage, CommandMessage, CommandMode, ErrorMessage, WelcomeMessage,
    PROTOCOL_VERSION,
};
use crate::runtime::{ClientCommand, InboundCommand, OutboundMessage};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub protocol_version: String,
    pub max_pending_commands: usize,
    /// Advertised in the welcome message so clients can index slots.
    pub slot_count: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
            protocol_version: PROTOCOL_VERSION.to_string(),
            max_pending_commands: 16,
            slot_count: 0,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        use std::env;

        let host = env::var("PAIRS_AI_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PAIRS_AI_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(7878);
        let max_pending_commands = env::var("PAIRS_AI_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(16);

        Self {
            host,
            port,
            max_pending_commands,
            ..Self::default()
        }
    }

    /// Whether the adapter is disabled via `PAIRS_AI_DISABLED`.
    pub fn is_disabled() -> bool {
        std::env::var("PAIRS_AI_DISABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }
}

#[derive(Debug)]
struct ClientHandle {
    id: usize,
    tx: mpsc::UnboundedSender<String>,
}

#[derive(Debug, Clone, Default)]
struct Clients {
    inner: Arc<RwLock<Vec<ClientHandle>>>,
}

impl Clients {
    async fn add(&self, handle: ClientHandle) {
        self.inner.write().await.push(handle);
    }

    async fn remove(&self, id: usize) {
        self.inner.write().await.retain(|c| c.id != id);
    }

    async fn send_to(&self, id: usize, line: &str) {
        let clients = self.inner.read().await;
        if let Some(client) = clients.iter().find(|c| c.id == id) {
            let _ = client.tx.send(line.to_string());
        }
    }

    async fn broadcast(&self, line: &str) {
        let clients = self.inner.read().await;
        for client in clients.iter() {
            let _ = client.tx.send(line.to_string());
        }
    }
}

/// Run the adapter server until the outbound channel closes.
///
/// `ready_tx` reports the bound address (tests bind port 0).
pub async fn run_server(
    config: ServerConfig,
    cmd_tx: mpsc::Sender<InboundCommand>,
    mut out_rx: mpsc::UnboundedReceiver<OutboundMessage>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    if let Some(tx) = ready_tx {
        let _ = tx.send(listener.local_addr()?);
    }

    let clients = Clients::default();

    // Outbound pump: deliver observation lines from the game loop.
    let pump_clients = clients.clone();
    let _pump = tokio::spawn(async move {
        while let Some(msg) = out_rx.recv().await {
            match msg {
                OutboundMessage::ToClient { client_id, line } => {
                    pump_clients.send_to(client_id, &line).await;
                }
                OutboundMessage::Broadcast { line } => {
                    pump_clients.broadcast(&line).await;
                }
            }
        }
    });

    let mut next_id: usize = 0;
    loop {
        let (stream, _addr) = listener.accept().await?;
        let id = next_id;
        next_id += 1;

        let clients = clients.clone();
        let cmd_tx = cmd_tx.clone();
        let config = config.clone();
        tokio::spawn(async move {
            let _ = handle_client(stream, id, clients.clone(), cmd_tx, config).await;
            clients.remove(id).await;
        });
    }
}

async fn handle_client(
    stream: TcpStream,
    id: usize,
    clients: Clients,
    cmd_tx: mpsc::Sender<InboundCommand>,
    config: ServerConfig,
) -> Result<()> {
    stream.set_nodelay(true)?;
    let (read_half, mut write_half) = stream.into_split();

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    clients.add(ClientHandle { id, tx }).await;

    // Writer task: one line per outbound message.
    let writer = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if write_half.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            if write_half.write_all(b"\n").await.is_err() {
                break;
            }
        }
    });

    let mut lines = BufReader::new(read_half).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        dispatch_line(&line, id, &clients, &cmd_tx, &config).await;
    }

    writer.abort();
    Ok(())
}

async fn dispatch_line(
    line: &str,
    client_id: usize,
    clients: &Clients,
    cmd_tx: &mpsc::Sender<InboundCommand>,
    config: &ServerConfig,
) {
    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            reply_error(clients, client_id, 0, "parse_error", &e.to_string()).await;
            return;
        }
    };
    let seq = value.get("seq").and_then(|v| v.as_u64()).unwrap_or(0);
    let msg_type = value
        .get("type")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    match msg_type.as_deref() {
        Some("hello") => {
            let welcome = WelcomeMessage {
                msg_type: "welcome".to_string(),
                seq,
                ts: now_ms(),
                protocol_version: config.protocol_version.clone(),
                slot_count: config.slot_count,
            };
            if let Ok(line) = serde_json::to_string(&welcome) {
                clients.send_to(client_id, &line).await;
            }
        }
        Some("command") => {
            // Parse from the raw line so wire enums can borrow their strings.
            let msg: CommandMessage = match serde_json::from_str(line) {
                Ok(m) => m,
                Err(e) => {
                    reply_error(clients, client_id, seq, "bad_command", &e.to_string()).await;
                    return;
                }
            };
            let command = match to_client_command(&msg) {
                Ok(c) => c,
                Err(reason) => {
                    reply_error(clients, client_id, seq, "bad_command", reason).await;
                    return;
                }
            };

            let inbound = InboundCommand {
                client_id,
                seq,
                command,
            };
            if cmd_tx.try_send(inbound).is_err() {
                reply_error(
                    clients,
                    client_id,
                    seq,
                    "backpressure",
                    "too many pending commands",
                )
                .await;
            }
        }
        other => {
            let what = other.unwrap_or("<missing>");
            reply_error(
                clients,
                client_id,
                seq,
                "unknown_type",
                &format!("unknown message type: {}", what),
            )
            .await;
        }
    }
}

fn to_client_command(msg: &CommandMessage) -> Result<ClientCommand, &'static str> {
    match msg.mode {
        CommandMode::Tap => msg
            .slot
            .map(ClientCommand::Tap)
            .ok_or("tap command requires a slot"),
        CommandMode::Tilt => {
            let tilt = msg.tilt.ok_or("tilt command requires a tilt payload")?;
            Ok(ClientCommand::Tilt {
                ax: tilt.ax,
                ay: tilt.ay,
                orientation: tilt.orientation.0,
            })
        }
        CommandMode::Restart => Ok(ClientCommand::Restart),
    }
}

async fn reply_error(clients: &Clients, client_id: usize, seq: u64, code: &str, message: &str) {
    let err = ErrorMessage {
        msg_type: "error".to_string(),
        seq,
        ts: now_ms(),
        code: code.to_string(),
        message: message.to_string(),
    };
    if let Ok(line) = serde_json::to_string(&err) {
        clients.send_to(client_id, &line).await;
    }
}

/// Build an ack line for a processed command.
pub fn ack_line(seq: u64, applied: bool) -> String {
    let ack = AckMessage {
        msg_type: "ack".to_string(),
        seq,
        ts: now_ms(),
        applied,
    };
    serde_json::to_string(&ack).unwrap_or_default()
}
