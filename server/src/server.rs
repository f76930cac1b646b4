use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use system::uuid::Uuid;
use system::{ClientCommand, ConnectionId, Participant, RoomId, ServerEvent, StreamPoint};

use super::connection::ConnectionCommand;
use crate::admin::{AdminCommand, ADMIN_DELETE_REASON};
use crate::broadcast::BroadcastRouter;
use crate::canvas;
use crate::presence::PresenceTracker;
use crate::session_registry::SessionRegistry;

pub type ServerTx = UnboundedSender<ServerCommand>;

const OWNER_DELETE_REASON: &str = "deleted by owner";

/// Sender used for broadcasts that no connection caused.
const NO_CONNECTION: ConnectionId = Uuid::nil();

#[derive(Debug)]
pub enum ServerCommand {
    Connection(ConnectionCommand),
    Admin(AdminCommand),
}

/// Owns every room. All commands, from every connection, are applied one at
/// a time in the order they were queued.
pub struct Server {
    registry: SessionRegistry,
    presence: PresenceTracker,
    router: BroadcastRouter,
}

impl Server {
    pub fn new() -> Self {
        Self {
            registry: SessionRegistry::new(),
            presence: PresenceTracker::new(),
            router: BroadcastRouter::new(),
        }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    pub fn handle_server_command(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Connection(command) => self.handle_connection_command(command),
            ServerCommand::Admin(command) => self.handle_admin_command(command),
        }
    }

    pub fn handle_connection_command(&mut self, command: ConnectionCommand) {
        match command {
            ConnectionCommand::Connect { connection_id, tx } => {
                self.router.register(connection_id, tx);
                self.presence.connect(connection_id);
                log::info!(
                    "Connection {} registered ({} live)",
                    connection_id,
                    self.router.connection_count()
                );
            }
            ConnectionCommand::Disconnect { from } => {
                self.presence
                    .disconnect(&mut self.registry, &self.router, &from);
                if self.router.unregister(&from) {
                    log::info!(
                        "Connection {} disconnected ({} live)",
                        from,
                        self.router.connection_count()
                    );
                }
            }
            ConnectionCommand::ClientCommand { from, command } => {
                if self.presence.is_connected(&from) {
                    self.handle_client_command(&from, command);
                } else {
                    log::warn!(
                        "Dropping {:?} from unregistered connection {}",
                        command,
                        from
                    );
                }
            }
        }
    }

    fn handle_client_command(&mut self, from: &ConnectionId, command: ClientCommand) {
        log::debug!("Ingress from {}: {:?}", from, command);
        match command {
            ClientCommand::JoinRoom {
                room_id,
                participant_id,
                name,
                color,
            } => self.presence.join(
                &mut self.registry,
                &self.router,
                from,
                room_id,
                Participant::new(participant_id, name, color),
            ),
            ClientCommand::LeaveRoom {
                room_id,
                participant_id,
            } => self.presence.leave(
                &mut self.registry,
                &self.router,
                from,
                &room_id,
                &participant_id,
            ),
            ClientCommand::StrokeAdd { room_id, stroke } => {
                canvas::append_stroke(&mut self.registry, &self.router, from, &room_id, stroke)
            }
            ClientCommand::StrokeStream {
                room_id,
                stroke_id,
                author_id,
                point,
                color,
                width,
                tool,
                is_start,
            } => canvas::stream_point(
                &self.registry,
                &self.router,
                from,
                &room_id,
                StreamPoint {
                    stroke_id,
                    author_id,
                    point,
                    color,
                    width,
                    tool,
                    is_start,
                },
            ),
            ClientCommand::CursorMove {
                room_id,
                participant_id,
                position,
            } => self.presence.update_cursor(
                &mut self.registry,
                &self.router,
                from,
                &room_id,
                &participant_id,
                position,
            ),
            ClientCommand::CanvasUndo { room_id, strokes } => {
                if strokes.is_some() {
                    log::debug!("Ignoring client-computed strokes on undo in {}", room_id);
                }
                canvas::undo(&mut self.registry, &self.router, from, &room_id);
            }
            ClientCommand::CanvasRedo { room_id, strokes } => {
                if strokes.is_some() {
                    log::debug!("Ignoring client-computed strokes on redo in {}", room_id);
                }
                canvas::redo(&mut self.registry, &self.router, from, &room_id);
            }
            ClientCommand::CanvasClear { room_id } => {
                canvas::clear(&mut self.registry, &self.router, from, &room_id)
            }
            ClientCommand::RoomDeleted { room_id, reason } => {
                let reason = reason.unwrap_or_else(|| OWNER_DELETE_REASON.to_string());
                self.delete_room(from, &room_id, reason);
            }
        }
    }

    fn handle_admin_command(&mut self, command: AdminCommand) {
        match command {
            AdminCommand::ListRooms { tx } => {
                let _ = tx.send(self.registry.summaries());
            }
            AdminCommand::GetRoom { room_id, tx } => {
                let _ = tx.send(self.registry.get(&room_id).map(|room| room.snapshot()));
            }
            AdminCommand::DeleteRoom { room_id, tx } => {
                let deleted =
                    self.delete_room(&NO_CONNECTION, &room_id, ADMIN_DELETE_REASON.into());
                let _ = tx.send(deleted);
            }
        }
    }

    /// Tells the whole room it is gone, then evicts it. Connections bound to
    /// it fall back to idle and may join again.
    fn delete_room(&mut self, from: &ConnectionId, room_id: &RoomId, reason: String) -> bool {
        let room = match self.registry.get(room_id) {
            Some(room) => room,
            None => return false,
        };
        self.router.emit(
            from,
            &room.connections,
            ServerEvent::RoomDeleted {
                room_id: room_id.clone(),
                reason,
            },
        );
        self.registry.delete(room_id);
        let released = self.presence.release_room(room_id);
        log::info!("Room {} evicted, {} connection(s) released", room_id, released);
        true
    }
}

impl Default for Server {
    fn default() -> Self {
        Self::new()
    }
}

pub fn spawn_server() -> ServerTx {
    let (srv_tx, mut srv_rx) = unbounded_channel::<ServerCommand>();

    tokio::spawn(async move {
        let mut server = Server::new();

        while let Some(command) = srv_rx.recv().await {
            server.handle_server_command(command);
        }
        log::info!("Server loop terminated");
    });

    srv_tx
}
