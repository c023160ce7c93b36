use tracing::info;

use super::{ConnectionId, HubState, Tx};
use crate::protocol::ServerEvent;

impl HubState {
    /// The group directory is the first thing a new connection hears.
    pub fn connect(&mut self, tx: Tx) -> ConnectionId {
        let id = ConnectionId::new();
        self.switchboard.open(id, tx);
        self.switchboard
            .emit_to(id, ServerEvent::GroupsList(self.groups.snapshot()));

        info!(%id, connections = self.switchboard.len(), "user connected");
        id
    }

    pub fn disconnect(&mut self, id: ConnectionId) {
        let username = self.switchboard.close(id);
        info!(%id, username = username.as_deref(), "user disconnected");

        if let Some(username) = username {
            // A newer registration for the same name keeps its presence, but
            // never inherits this socket's rooms: it did not subscribe to them.
            self.presence.remove(&username, id);
            self.members.leave_all(&username);
        }

        // Sent even when nothing changed, clients rely on it.
        self.broadcast_presence();
    }
}
