pub mod admin;
mod broadcast;
mod canvas;
pub mod config;
pub mod connection;
mod connection_tx_storage;
pub mod error;
pub mod handlers;
mod presence;
mod room;
pub mod server;
mod session_registry;

pub use broadcast::BroadcastRouter;
pub use connection_tx_storage::ConnectionTx;
pub use presence::{ConnectionBinding, ConnectionState, PresenceTracker};
pub use room::Room;
pub use session_registry::{RoomSummary, SessionRegistry};
