use serde::{Deserialize, Serialize};

use crate::types::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub color: String,
    /// `None` until the participant first moves their pointer over the canvas.
    pub cursor: Option<Point>,
    /// A record only exists while its participant is in the room, so this is
    /// always `true` on the wire. Kept for clients that read it.
    pub online: bool,
}

impl Participant {
    pub fn new(id: ParticipantId, name: String, color: String) -> Self {
        Self {
            id,
            name,
            color,
            cursor: None,
            online: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Pen,
    Eraser,
    /// A tool kind the server has no name for. Stored and relayed as sent.
    #[serde(untagged)]
    Other(String),
}

/// A completed drawing operation. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub id: StrokeId,
    pub points: Vec<Point>,
    pub color: String,
    pub width: f32,
    pub tool: Tool,
    pub author_id: ParticipantId,
    pub timestamp: Timestamp,
}

/// An in-progress point of a stroke that has not been completed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamPoint {
    pub stroke_id: StrokeId,
    pub author_id: ParticipantId,
    pub point: Point,
    pub color: String,
    pub width: f32,
    pub tool: Tool,
    pub is_start: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub participants: Vec<Participant>,
    pub strokes: Vec<Stroke>,
}

/// Inbound events, one per websocket text frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientCommand {
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        room_id: RoomId,
        participant_id: ParticipantId,
        name: String,
        color: String,
    },
    #[serde(rename_all = "camelCase")]
    LeaveRoom {
        room_id: RoomId,
        participant_id: ParticipantId,
    },
    #[serde(rename_all = "camelCase")]
    StrokeAdd { room_id: RoomId, stroke: Stroke },
    #[serde(rename_all = "camelCase")]
    StrokeStream {
        room_id: RoomId,
        stroke_id: StrokeId,
        author_id: ParticipantId,
        point: Point,
        color: String,
        width: f32,
        tool: Tool,
        is_start: bool,
    },
    #[serde(rename_all = "camelCase")]
    CursorMove {
        room_id: RoomId,
        participant_id: ParticipantId,
        position: Option<Point>,
    },
    /// `strokes` is only sent by older clients that computed the undo result
    /// locally. The server ignores it and pops its own log.
    #[serde(rename_all = "camelCase")]
    CanvasUndo {
        room_id: RoomId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strokes: Option<Vec<Stroke>>,
    },
    #[serde(rename_all = "camelCase")]
    CanvasRedo {
        room_id: RoomId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strokes: Option<Vec<Stroke>>,
    },
    #[serde(rename_all = "camelCase")]
    CanvasClear { room_id: RoomId },
    #[serde(rename_all = "camelCase")]
    RoomDeleted {
        room_id: RoomId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
}

impl ClientCommand {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Outbound events. Who receives each one is decided by [`ServerEvent::fan_out`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    RoomJoined(RoomSnapshot),
    ParticipantJoined {
        participant: Participant,
    },
    ParticipantLeft {
        participant: Participant,
    },
    ParticipantsList {
        participants: Vec<Participant>,
    },
    StrokeAdded {
        stroke: Stroke,
    },
    StrokeStream(StreamPoint),
    #[serde(rename_all = "camelCase")]
    CursorUpdated {
        participant_id: ParticipantId,
        position: Option<Point>,
    },
    CanvasState {
        strokes: Vec<Stroke>,
    },
    CanvasCleared,
    #[serde(rename_all = "camelCase")]
    RoomDeleted {
        room_id: RoomId,
        reason: String,
    },
}

impl ServerEvent {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoomJoined(_) => "room-joined",
            Self::ParticipantJoined { .. } => "participant-joined",
            Self::ParticipantLeft { .. } => "participant-left",
            Self::ParticipantsList { .. } => "participants-list",
            Self::StrokeAdded { .. } => "stroke-added",
            Self::StrokeStream(_) => "stroke-stream",
            Self::CursorUpdated { .. } => "cursor-updated",
            Self::CanvasState { .. } => "canvas-state",
            Self::CanvasCleared => "canvas-cleared",
            Self::RoomDeleted { .. } => "room-deleted",
        }
    }
}
