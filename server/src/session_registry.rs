use crate::room::Room;
use serde::Serialize;
use std::collections::HashMap;
use system::RoomId;

/// Every live room of the process.
///
/// Owned by the server loop, so the map is only ever touched from one task.
pub struct SessionRegistry {
    rooms: HashMap<RoomId, Room>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub participants: usize,
    pub strokes: usize,
    pub redo_depth: usize,
    pub connections: usize,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    pub fn get_or_create(&mut self, room_id: &RoomId) -> &mut Room {
        self.rooms.entry(room_id.clone()).or_insert_with(|| {
            log::info!("Room {} created", room_id);
            Room::new(room_id.clone())
        })
    }

    pub fn get(&self, room_id: &RoomId) -> Option<&Room> {
        self.rooms.get(room_id)
    }

    pub fn get_mut(&mut self, room_id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(room_id)
    }

    pub fn delete(&mut self, room_id: &RoomId) -> Option<Room> {
        let removed = self.rooms.remove(room_id);
        if removed.is_some() {
            log::info!("Room {} deleted", room_id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn summaries(&self) -> Vec<RoomSummary> {
        let mut summaries: Vec<RoomSummary> = self
            .rooms
            .values()
            .map(|room| RoomSummary {
                room_id: room.room_id.clone(),
                participants: room.participants.len(),
                strokes: room.log.strokes().len(),
                redo_depth: room.log.redo_buffer().len(),
                connections: room.connections.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.room_id.cmp(&b.room_id));
        summaries
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
