use crate::session_registry::RoomSummary;
use system::{RoomId, RoomSnapshot};
use tokio::sync::oneshot::Sender;

pub const ADMIN_DELETE_REASON: &str = "deleted by administrator";

#[derive(Debug)]
pub enum AdminCommand {
    ListRooms {
        tx: Sender<Vec<RoomSummary>>,
    },
    GetRoom {
        room_id: RoomId,
        tx: Sender<Option<RoomSnapshot>>,
    },
    DeleteRoom {
        room_id: RoomId,
        tx: Sender<bool>,
    },
}
