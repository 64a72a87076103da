//! Protocol module - JSON message types for the renderer/AI adapter
//!
//! Implements a line-delimited JSON protocol. All messages carry: type,
//! seq (sequence number), ts (timestamp in ms). Inbound commands mirror the
//! game's event surface (tap, tilt, restart); outbound observations carry a
//! snapshot plus the render intents drained since the last observation.
//!
//! Face-down cards are not disclosed on the wire: a slot's card value is
//! present only while that slot is revealed.

use serde::{Deserialize, Serialize};

use tui_pairs_core::{Intent, RoundSnapshot};
use tui_pairs_types::{DeviceOrientation, Rank, SlotId, Suit};

// ============== Client -> Game Messages ==============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HelloType {
    #[serde(rename = "hello")]
    Hello,
}

impl Default for HelloType {
    fn default() -> Self {
        Self::Hello
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandType {
    #[serde(rename = "command")]
    Command,
}

impl Default for CommandType {
    fn default() -> Self {
        Self::Command
    }
}

/// Client hello message (first message to establish connection)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: HelloType,
    pub seq: u64,
    pub ts: u64,
    pub client: ClientInfo,
    pub protocol_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

/// Command message: one player-level event per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMessage {
    #[serde(rename = "type")]
    #[serde(default)]
    pub msg_type: CommandType,
    pub seq: u64,
    pub ts: u64,
    pub mode: CommandMode,
    /// Target slot for `tap` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotId>,
    /// Sensor sample for `tilt` mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt: Option<TiltPayload>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandMode {
    Tap,
    Tilt,
    Restart,
}

impl<'de> Deserialize<'de> for CommandMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.eq_ignore_ascii_case("tap") {
            Ok(Self::Tap)
        } else if s.eq_ignore_ascii_case("tilt") {
            Ok(Self::Tilt)
        } else if s.eq_ignore_ascii_case("restart") {
            Ok(Self::Restart)
        } else {
            Err(serde::de::Error::custom("invalid command mode"))
        }
    }
}

impl Serialize for CommandMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            CommandMode::Tap => serializer.serialize_str("tap"),
            CommandMode::Tilt => serializer.serialize_str("tilt"),
            CommandMode::Restart => serializer.serialize_str("restart"),
        }
    }
}

/// Raw accelerometer sample plus the reporting orientation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TiltPayload {
    pub ax: f32,
    pub ay: f32,
    pub orientation: WireOrientation,
}

/// Device orientation as its wire string ("upright", "rotatedLeft", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WireOrientation(pub DeviceOrientation);

impl<'de> Deserialize<'de> for WireOrientation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        DeviceOrientation::from_str(s)
            .map(WireOrientation)
            .ok_or_else(|| serde::de::Error::custom("invalid device orientation"))
    }
}

impl Serialize for WireOrientation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

// ============== Game -> Client Messages ==============

/// Welcome reply to a hello.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub protocol_version: String,
    pub slot_count: usize,
}

/// Command acknowledgment.
///
/// Illegal gameplay choices are acked with `applied: false`, never errored:
/// silently ignoring them is the game's policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub applied: bool,
}

/// Error reply (malformed message, unknown mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub code: String,
    pub message: String,
}

/// Card value on the wire, lowercase rank/suit strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardObservation {
    pub rank: String,
    pub suit: String,
}

/// One slot in an observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotObservation {
    /// Present only while the slot is revealed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<CardObservation>,
    #[serde(rename = "faceUp")]
    pub face_up: bool,
    pub removed: bool,
    #[serde(rename = "inField")]
    pub in_field: bool,
}

/// Render intent on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind")]
pub enum IntentMessage {
    #[serde(rename = "setFaceUp")]
    SetFaceUp {
        slot: SlotId,
        #[serde(rename = "faceUp")]
        face_up: bool,
    },
    #[serde(rename = "growAndFade")]
    GrowAndFade { slots: [SlotId; 2] },
    #[serde(rename = "hide")]
    Hide { slots: [SlotId; 2] },
    #[serde(rename = "flipBack")]
    FlipBack { slots: [SlotId; 2] },
    #[serde(rename = "admitToField")]
    AdmitToField { slot: SlotId },
    #[serde(rename = "evictFromField")]
    EvictFromField { slot: SlotId },
    #[serde(rename = "setFieldDirection")]
    SetFieldDirection { x: f32, y: f32 },
    #[serde(rename = "setFieldMagnitude")]
    SetFieldMagnitude { value: f32 },
}

impl From<Intent> for IntentMessage {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::SetFaceUp { slot, face_up } => IntentMessage::SetFaceUp { slot, face_up },
            Intent::GrowAndFade { slots } => IntentMessage::GrowAndFade { slots },
            Intent::Hide { slots } => IntentMessage::Hide { slots },
            Intent::FlipBack { slots } => IntentMessage::FlipBack { slots },
            Intent::AdmitToField { slot } => IntentMessage::AdmitToField { slot },
            Intent::EvictFromField { slot } => IntentMessage::EvictFromField { slot },
            Intent::SetFieldDirection { direction } => IntentMessage::SetFieldDirection {
                x: direction.x,
                y: direction.y,
            },
            Intent::SetFieldMagnitude { value } => IntentMessage::SetFieldMagnitude { value },
        }
    }
}

/// Full observation: snapshot plus intents since the previous observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationMessage {
    #[serde(rename = "type")]
    pub msg_type: String,
    pub seq: u64,
    pub ts: u64,
    pub slots: Vec<SlotObservation>,
    pub revealed: Vec<SlotId>,
    #[serde(rename = "matchedPairs")]
    pub matched_pairs: u32,
    pub over: bool,
    pub gravity: [f32; 2],
    pub magnitude: f32,
    pub intents: Vec<IntentMessage>,
}

/// Milliseconds since the Unix epoch for message timestamps.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Build a hello message for clients.
pub fn create_hello(seq: u64, name: &str, version: &str) -> HelloMessage {
    HelloMessage {
        msg_type: HelloType::Hello,
        seq,
        ts: now_ms(),
        client: ClientInfo {
            name: name.to_string(),
            version: version.to_string(),
        },
        protocol_version: PROTOCOL_VERSION.to_string(),
    }
}

/// Build an observation from a snapshot and the drained intents.
pub fn build_observation(
    snapshot: &RoundSnapshot,
    intents: &[Intent],
    seq: u64,
) -> ObservationMessage {
    let slots = snapshot
        .slots
        .iter()
        .map(|slot| SlotObservation {
            card: (slot.face_up && !slot.removed).then(|| card_observation(slot.card.rank, slot.card.suit)),
            face_up: slot.face_up,
            removed: slot.removed,
            in_field: slot.in_field,
        })
        .collect();

    ObservationMessage {
        msg_type: "observation".to_string(),
        seq,
        ts: now_ms(),
        slots,
        revealed: snapshot.revealed.iter().copied().collect(),
        matched_pairs: snapshot.matched_pairs,
        over: snapshot.over,
        gravity: [snapshot.gravity.x, snapshot.gravity.y],
        magnitude: snapshot.magnitude,
        intents: intents.iter().copied().map(IntentMessage::from).collect(),
    }
}

fn card_observation(rank: Rank, suit: Suit) -> CardObservation {
    CardObservation {
        rank: rank.as_str().to_string(),
        suit: suit.as_str().to_string(),
    }
}

/// Protocol version advertised in hello/welcome messages.
pub const PROTOCOL_VERSION: &str = "1.0.0";
