use std::collections::HashMap;
use system::{ConnectionId, Participant, ParticipantId, Point, RoomId, ServerEvent};

use crate::broadcast::BroadcastRouter;
use crate::session_registry::SessionRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionBinding {
    pub room_id: RoomId,
    pub participant_id: ParticipantId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Idle,
    Joined(ConnectionBinding),
}

/// Tracks which room and participant each live connection stands for.
///
/// A connection is in at most one room. A connection that is not in the map
/// is either not registered yet or already terminated.
pub struct PresenceTracker {
    connection_states: HashMap<ConnectionId, ConnectionState>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self {
            connection_states: HashMap::new(),
        }
    }

    pub fn connect(&mut self, connection_id: ConnectionId) {
        self.connection_states
            .insert(connection_id, ConnectionState::Idle);
    }

    pub fn state(&self, connection_id: &ConnectionId) -> Option<&ConnectionState> {
        self.connection_states.get(connection_id)
    }

    pub fn binding(&self, connection_id: &ConnectionId) -> Option<&ConnectionBinding> {
        match self.connection_states.get(connection_id) {
            Some(ConnectionState::Joined(binding)) => Some(binding),
            _ => None,
        }
    }

    pub fn is_connected(&self, connection_id: &ConnectionId) -> bool {
        self.connection_states.contains_key(connection_id)
    }

    pub fn join(
        &mut self,
        registry: &mut SessionRegistry,
        router: &BroadcastRouter,
        from: &ConnectionId,
        room_id: RoomId,
        participant: Participant,
    ) {
        let previous = match self.connection_states.get(from) {
            Some(state) => state.clone(),
            None => {
                log::warn!("Join from unregistered connection {}", from);
                return;
            }
        };

        // The old room must see the leave before anyone sees the join.
        if let ConnectionState::Joined(binding) = previous {
            if binding.room_id != room_id {
                self.leave_room(
                    registry,
                    router,
                    from,
                    &binding.room_id,
                    &binding.participant_id,
                );
            } else if binding.participant_id != participant.id {
                retire_participant(registry, router, from, &binding);
            }
        }

        let participant_id = participant.id.clone();
        let room = registry.get_or_create(&room_id);
        room.participants
            .insert(participant_id.clone(), participant.clone());
        room.attach(*from);
        log::info!(
            "Connection {} joined room {} as {}",
            from,
            room_id,
            participant_id
        );
        self.connection_states.insert(
            *from,
            ConnectionState::Joined(ConnectionBinding {
                room_id,
                participant_id,
            }),
        );

        router.emit(from, &room.connections, ServerEvent::RoomJoined(room.snapshot()));
        router.emit(
            from,
            &room.connections,
            ServerEvent::ParticipantJoined { participant },
        );
        router.emit(
            from,
            &room.connections,
            ServerEvent::ParticipantsList {
                participants: room.participant_list(),
            },
        );
    }

    pub fn leave(
        &mut self,
        registry: &mut SessionRegistry,
        router: &BroadcastRouter,
        from: &ConnectionId,
        room_id: &RoomId,
        participant_id: &ParticipantId,
    ) {
        self.leave_room(registry, router, from, room_id, participant_id);
    }

    /// Runs the leave sequence for the connection's last binding and forgets
    /// the connection.
    pub fn disconnect(
        &mut self,
        registry: &mut SessionRegistry,
        router: &BroadcastRouter,
        from: &ConnectionId,
    ) -> Option<ConnectionBinding> {
        let binding = self.binding(from).cloned();
        if let Some(binding) = &binding {
            self.leave_room(
                registry,
                router,
                from,
                &binding.room_id,
                &binding.participant_id,
            );
        }
        self.connection_states.remove(from);
        binding
    }

    pub fn update_cursor(
        &self,
        registry: &mut SessionRegistry,
        router: &BroadcastRouter,
        from: &ConnectionId,
        room_id: &RoomId,
        participant_id: &ParticipantId,
        position: Option<Point>,
    ) {
        let room = match registry.get_mut(room_id) {
            Some(room) => room,
            None => return,
        };
        match room.participants.get_mut(participant_id) {
            Some(participant) => participant.cursor = position,
            None => log::debug!(
                "Cursor of unknown participant {} in room {}",
                participant_id,
                room_id
            ),
        }
        router.emit(
            from,
            &room.connections,
            ServerEvent::CursorUpdated {
                participant_id: participant_id.clone(),
                position,
            },
        );
    }

    /// Drops every binding to `room_id`, leaving those connections idle.
    pub fn release_room(&mut self, room_id: &RoomId) -> usize {
        let mut released = 0;
        for state in self.connection_states.values_mut() {
            if matches!(state, ConnectionState::Joined(binding) if &binding.room_id == room_id) {
                *state = ConnectionState::Idle;
                released += 1;
            }
        }
        released
    }

    fn leave_room(
        &mut self,
        registry: &mut SessionRegistry,
        router: &BroadcastRouter,
        from: &ConnectionId,
        room_id: &RoomId,
        participant_id: &ParticipantId,
    ) {
        let room = match registry.get_mut(room_id) {
            Some(room) => room,
            None => {
                log::debug!("Leave for unknown room {}", room_id);
                return;
            }
        };

        if let Some(state) = self.connection_states.get_mut(from) {
            let own_binding = matches!(
                state,
                ConnectionState::Joined(binding)
                    if &binding.room_id == room_id && &binding.participant_id == participant_id
            );
            if own_binding {
                *state = ConnectionState::Idle;
                room.detach(from);
            }
        }

        let participant = match room.participants.remove(participant_id) {
            Some(participant) => participant,
            None => return,
        };
        log::info!(
            "Connection {} left room {} as {}",
            from,
            room_id,
            participant_id
        );

        if room.is_empty() {
            registry.delete(room_id);
            self.release_room(room_id);
            return;
        }

        router.emit(
            from,
            &room.connections,
            ServerEvent::ParticipantLeft { participant },
        );
        router.emit(
            from,
            &room.connections,
            ServerEvent::ParticipantsList {
                participants: room.participant_list(),
            },
        );
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Same connection, same room, new identity: the old record goes away
/// without tearing the room down.
fn retire_participant(
    registry: &mut SessionRegistry,
    router: &BroadcastRouter,
    from: &ConnectionId,
    binding: &ConnectionBinding,
) {
    if let Some(room) = registry.get_mut(&binding.room_id) {
        if let Some(participant) = room.participants.remove(&binding.participant_id) {
            router.emit(
                from,
                &room.connections,
                ServerEvent::ParticipantLeft { participant },
            );
        }
    }
}
