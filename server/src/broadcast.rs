use system::{ConnectionId, FanOut, ServerEvent};

use crate::connection_tx_storage::{ConnectionTx, ConnectionTxStorage};

/// Hands outbound events to connections according to [`ServerEvent::fan_out`].
pub struct BroadcastRouter {
    connections: ConnectionTxStorage,
}

impl BroadcastRouter {
    pub fn new() -> Self {
        Self {
            connections: ConnectionTxStorage::new(),
        }
    }

    pub fn register(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connections.insert(connection_id, tx);
    }

    pub fn unregister(&mut self, connection_id: &ConnectionId) -> bool {
        self.connections.remove(connection_id).is_some()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// `audience` is every connection attached to the room the event belongs
    /// to. Returns how many connections the event was handed to.
    pub fn emit(
        &self,
        from: &ConnectionId,
        audience: &[ConnectionId],
        event: ServerEvent,
    ) -> usize {
        let recipients: Vec<&ConnectionId> = match event.fan_out() {
            FanOut::Sender => vec![from],
            FanOut::RoomExceptSender => audience.iter().filter(|c| *c != from).collect(),
            FanOut::WholeRoom => audience.iter().collect(),
        };

        log::debug!(
            "Emit {} from {} to {} connection(s)",
            event.kind(),
            from,
            recipients.len()
        );

        if let Some((last, rest)) = recipients.split_last() {
            for connection_id in rest {
                self.connections.send(connection_id, event.clone());
            }
            self.connections.send(last, event);
        }
        recipients.len()
    }
}

impl Default for BroadcastRouter {
    fn default() -> Self {
        Self::new()
    }
}
