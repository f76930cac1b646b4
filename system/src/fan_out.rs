use crate::message::ServerEvent;

/// Which connections of a room receive an outbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanOut {
    /// Only the connection whose command caused the event.
    Sender,
    /// Everyone attached to the room except the sender. Used for effects the
    /// sender has already applied locally.
    RoomExceptSender,
    /// Everyone attached to the room, sender included. Used for effects on
    /// shared history whose result only the server can compute.
    WholeRoom,
}

impl ServerEvent {
    pub fn fan_out(&self) -> FanOut {
        match self {
            ServerEvent::RoomJoined(_) => FanOut::Sender,
            ServerEvent::ParticipantJoined { .. }
            | ServerEvent::ParticipantLeft { .. }
            | ServerEvent::StrokeAdded { .. }
            | ServerEvent::StrokeStream(_)
            | ServerEvent::CursorUpdated { .. } => FanOut::RoomExceptSender,
            ServerEvent::ParticipantsList { .. }
            | ServerEvent::CanvasState { .. }
            | ServerEvent::CanvasCleared
            | ServerEvent::RoomDeleted { .. } => FanOut::WholeRoom,
        }
    }
}
