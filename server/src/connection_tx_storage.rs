use std::collections::HashMap;
use system::{ConnectionId, ServerEvent};

pub type ConnectionTx = tokio::sync::mpsc::UnboundedSender<ServerEvent>;

pub struct ConnectionTxStorage {
    connection_txs: HashMap<ConnectionId, ConnectionTx>,
}

impl ConnectionTxStorage {
    pub fn new() -> Self {
        Self {
            connection_txs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, connection_id: ConnectionId, tx: ConnectionTx) {
        self.connection_txs.insert(connection_id, tx);
    }

    /// Fire-and-forget. A connection whose actor already stopped only gets a
    /// warning; its disconnect is on its way through the server queue.
    pub fn send(&self, to: &ConnectionId, event: ServerEvent) {
        if let Some(tx) = self.connection_txs.get(to) {
            if tx.send(event).is_err() {
                log::warn!("Connection {} is closed, dropping event", to);
            }
        } else {
            log::warn!("Unknown connection {}, dropping event", to);
        }
    }

    pub fn remove(&mut self, connection_id: &ConnectionId) -> Option<ConnectionTx> {
        self.connection_txs.remove(connection_id)
    }

    pub fn len(&self) -> usize {
        self.connection_txs.len()
    }
}

impl Default for ConnectionTxStorage {
    fn default() -> Self {
        Self::new()
    }
}
