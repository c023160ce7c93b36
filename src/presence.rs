// Presence Registry
//
// Who is online: username -> the connection currently speaking for it.

use std::collections::HashMap;

use crate::hub::ConnectionId;

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    connections: HashMap<String, ConnectionId>,

    /// First-registration order, used for `online_users`
    order: Vec<String>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point `username` at `conn`, replacing any earlier connection.
    /// The superseded connection is not told anything.
    pub fn register(&mut self, username: &str, conn: ConnectionId) -> bool {
        if username.is_empty() {
            return false;
        }

        if self.connections.insert(username.to_owned(), conn).is_none() {
            self.order.push(username.to_owned());
        }
        true
    }

    pub fn lookup(&self, username: &str) -> Option<ConnectionId> {
        self.connections.get(username).copied()
    }

    pub fn usernames(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Forget `username`, but only while `conn` still owns it. A disconnect
    /// arriving after a newer registration must not wipe that registration.
    pub fn remove(&mut self, username: &str, conn: ConnectionId) -> bool {
        if self.lookup(username) != Some(conn) {
            return false;
        }

        self.connections.remove(username);
        self.order.retain(|name| name != username);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
