// Switchboard
//
// Live connections and their transport-level room subscriptions. Everything
// the core emits goes out through here.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::protocol::ServerEvent;

pub type Tx = mpsc::UnboundedSender<ServerEvent>;
pub type Rx = mpsc::UnboundedReceiver<ServerEvent>;

/// Opaque handle for one accepted socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct Connection {
    tx: Tx,

    /// Identity attached by `register_user`
    username: Option<String>,

    rooms: HashSet<String>,
}

#[derive(Debug, Default)]
pub struct Switchboard {
    connections: HashMap<ConnectionId, Connection>,
    subscribers: HashMap<String, HashSet<ConnectionId>>,
}

impl Switchboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: ConnectionId, tx: Tx) {
        self.connections.insert(
            id,
            Connection {
                tx,
                username: None,
                rooms: HashSet::new(),
            },
        );
    }

    /// Forget the connection and every subscription it held. Returns the
    /// username that was attached to it, if any.
    pub fn close(&mut self, id: ConnectionId) -> Option<String> {
        let conn = self.connections.remove(&id)?;
        for room in &conn.rooms {
            if let Some(subs) = self.subscribers.get_mut(room) {
                subs.remove(&id);
                if subs.is_empty() {
                    self.subscribers.remove(room);
                }
            }
        }
        conn.username
    }

    pub fn is_open(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn attach(&mut self, id: ConnectionId, username: &str) {
        if let Some(conn) = self.connections.get_mut(&id) {
            conn.username = Some(username.to_owned());
        }
    }

    pub fn username_of(&self, id: ConnectionId) -> Option<&str> {
        self.connections.get(&id)?.username.as_deref()
    }

    pub fn subscribe(&mut self, id: ConnectionId, room: &str) {
        let Some(conn) = self.connections.get_mut(&id) else {
            return;
        };
        conn.rooms.insert(room.to_owned());
        self.subscribers.entry(room.to_owned()).or_default().insert(id);
    }

    pub fn is_subscribed(&self, id: ConnectionId, room: &str) -> bool {
        self.subscribers
            .get(room)
            .is_some_and(|subs| subs.contains(&id))
    }

    pub fn emit_to(&self, id: ConnectionId, event: ServerEvent) {
        if let Some(conn) = self.connections.get(&id) {
            let _ = conn.tx.send(event);
        }
    }

    /// Every subscriber of `room`, sender included.
    pub fn emit_room(&self, room: &str, event: &ServerEvent) {
        self.emit_room_filtered(room, None, event);
    }

    /// Every subscriber of `room` except `sender`.
    pub fn emit_room_except(&self, room: &str, sender: ConnectionId, event: &ServerEvent) {
        self.emit_room_filtered(room, Some(sender), event);
    }

    fn emit_room_filtered(&self, room: &str, skip: Option<ConnectionId>, event: &ServerEvent) {
        let Some(subs) = self.subscribers.get(room) else {
            return;
        };
        for id in subs.iter().filter(|id| Some(**id) != skip) {
            self.emit_to(*id, event.clone());
        }
    }

    pub fn broadcast(&self, event: &ServerEvent) {
        for conn in self.connections.values() {
            let _ = conn.tx.send(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(board: &mut Switchboard) -> (ConnectionId, Rx) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::new();
        board.open(id, tx);
        (id, rx)
    }

    #[test]
    fn room_emission_reaches_subscribers_only() {
        let mut board = Switchboard::new();
        let (a, mut rx_a) = open(&mut board);
        let (b, mut rx_b) = open(&mut board);
        let (_c, mut rx_c) = open(&mut board);
        board.subscribe(a, "g");
        board.subscribe(b, "g");

        board.emit_room_except("g", a, &ServerEvent::StopTyping("g".to_string()));

        assert!(rx_a.try_recv().is_err());
        assert_eq!(rx_b.try_recv().unwrap(), ServerEvent::StopTyping("g".to_string()));
        assert!(rx_c.try_recv().is_err());
    }

    #[test]
    fn close_drops_subscriptions() {
        let mut board = Switchboard::new();
        let (a, _rx_a) = open(&mut board);
        board.subscribe(a, "g");
        board.attach(a, "alice");

        assert_eq!(board.close(a), Some("alice".to_string()));
        assert!(!board.is_open(a));
        assert!(!board.is_subscribed(a, "g"));
        assert!(board.subscribers.is_empty());
    }

    #[test]
    fn broadcast_reaches_everyone() {
        let mut board = Switchboard::new();
        let (_a, mut rx_a) = open(&mut board);
        let (_b, mut rx_b) = open(&mut board);

        board.broadcast(&ServerEvent::OnlineUsers(vec![]));

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_ok());
    }
}
