use std::collections::BTreeMap;
use system::{ConnectionId, DrawingLog, Participant, ParticipantId, RoomId, RoomSnapshot};

pub struct Room {
    pub room_id: RoomId,
    pub participants: BTreeMap<ParticipantId, Participant>,
    /// Connections that receive this room's broadcasts.
    pub connections: Vec<ConnectionId>,
    pub log: DrawingLog,
}

impl Room {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            participants: BTreeMap::new(),
            connections: Vec::new(),
            log: DrawingLog::new(),
        }
    }

    pub fn attach(&mut self, connection_id: ConnectionId) {
        if !self.connections.contains(&connection_id) {
            self.connections.push(connection_id);
        }
    }

    pub fn detach(&mut self, connection_id: &ConnectionId) {
        self.connections.retain(|c| c != connection_id);
    }

    pub fn participant_list(&self) -> Vec<Participant> {
        self.participants.values().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            room_id: self.room_id.clone(),
            participants: self.participant_list(),
            strokes: self.log.strokes().to_vec(),
        }
    }
}
