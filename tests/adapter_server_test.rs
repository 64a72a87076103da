//! Adapter server acceptance test
//!
//! Drives a real TCP client against `run_server`: handshake, command
//! forwarding, error replies, and observation broadcast.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_test::assert_ok;

use tui_pairs::adapter::{run_server, ClientCommand, OutboundMessage, ServerConfig};
use tui_pairs::types::DeviceOrientation;

#[tokio::test]
async fn test_hello_command_error_and_broadcast_flow() {
    let config = ServerConfig {
        port: 0,
        slot_count: 4,
        ..ServerConfig::default()
    };

    let (cmd_tx, mut cmd_rx) = mpsc::channel(16);
    let (out_tx, out_rx) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = oneshot::channel();

    tokio::spawn(async move {
        let _ = run_server(config, cmd_tx, out_rx, Some(ready_tx)).await;
    });
    let addr = ready_rx.await.expect("server should report its address");

    let stream = tokio_test::assert_ok!(TcpStream::connect(addr).await);
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    // Handshake: hello -> welcome with the table size.
    write_half
        .write_all(
            b"{\"type\":\"hello\",\"seq\":1,\"ts\":0,\"client\":{\"name\":\"probe\",\"version\":\"0.1\"},\"protocol_version\":\"1.0.0\"}\n",
        )
        .await
        .unwrap();
    let line = lines.next_line().await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["type"], "welcome");
    assert_eq!(value["slot_count"], 4);

    // Tap command lands on the game channel with its seq.
    write_half
        .write_all(b"{\"type\":\"command\",\"seq\":2,\"ts\":0,\"mode\":\"tap\",\"slot\":3}\n")
        .await
        .unwrap();
    let inbound = cmd_rx.recv().await.unwrap();
    assert_eq!(inbound.seq, 2);
    assert_eq!(inbound.command, ClientCommand::Tap(3));

    // Tilt command carries the full sample.
    write_half
        .write_all(
            b"{\"type\":\"command\",\"seq\":3,\"ts\":0,\"mode\":\"tilt\",\"tilt\":{\"ax\":0.5,\"ay\":-0.5,\"orientation\":\"rotatedRight\"}}\n",
        )
        .await
        .unwrap();
    let inbound = cmd_rx.recv().await.unwrap();
    assert_eq!(
        inbound.command,
        ClientCommand::Tilt {
            ax: 0.5,
            ay: -0.5,
            orientation: DeviceOrientation::RotatedRight,
        }
    );

    // Tap without a slot is a protocol error, not a gameplay no-op.
    write_half
        .write_all(b"{\"type\":\"command\",\"seq\":4,\"ts\":0,\"mode\":\"tap\"}\n")
        .await
        .unwrap();
    let line = lines.next_line().await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["type"], "error");
    assert_eq!(value["code"], "bad_command");

    // Malformed JSON gets a parse error reply.
    write_half.write_all(b"not json\n").await.unwrap();
    let line = lines.next_line().await.unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["code"], "parse_error");

    // Broadcast lines reach connected clients verbatim.
    out_tx
        .send(OutboundMessage::Broadcast {
            line: "{\"type\":\"observation\",\"seq\":9}".to_string(),
        })
        .unwrap();
    let line = lines.next_line().await.unwrap().unwrap();
    assert!(line.contains("\"observation\""));
}
