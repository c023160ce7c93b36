// Hub
//
// The one place chat state lives. Each inbound event locks the state, runs
// its handler to completion and unlocks, so handlers never interleave.

mod lifecycle;
mod switchboard;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::groups::GroupDirectory;
use crate::presence::PresenceRegistry;
use crate::protocol::{ClientEvent, ServerEvent};
use crate::rooms::RoomMembership;

pub use switchboard::{ConnectionId, Rx, Switchboard, Tx};

pub struct Hub {
    state: Mutex<HubState>,
}

impl Hub {
    pub fn new(default_group: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(HubState::new(default_group)),
        }
    }

    /// Accept a new connection whose outbound events go to `tx`.
    pub async fn connect(&self, tx: Tx) -> ConnectionId {
        self.state.lock().await.connect(tx)
    }

    pub async fn dispatch(&self, id: ConnectionId, event: ClientEvent) {
        self.state.lock().await.dispatch(id, event);
    }

    pub async fn disconnect(&self, id: ConnectionId) {
        self.state.lock().await.disconnect(id);
    }

    pub async fn online_users(&self) -> Vec<String> {
        self.state.lock().await.presence.usernames()
    }

    pub async fn groups(&self) -> Vec<String> {
        self.state.lock().await.groups.snapshot()
    }
}

#[derive(Debug)]
pub struct HubState {
    pub(crate) switchboard: Switchboard,
    pub(crate) presence: PresenceRegistry,
    pub(crate) members: RoomMembership,
    pub(crate) groups: GroupDirectory,
}

impl HubState {
    pub fn new(default_group: impl Into<String>) -> Self {
        Self {
            switchboard: Switchboard::new(),
            presence: PresenceRegistry::new(),
            members: RoomMembership::new(),
            groups: GroupDirectory::seeded(default_group),
        }
    }

    pub fn dispatch(&mut self, id: ConnectionId, event: ClientEvent) {
        if !self.switchboard.is_open(id) {
            debug!(%id, event = event.name(), "event from closed connection");
            return;
        }
        if let Err(e) = event.validate() {
            debug!(%id, "dropping event: {e}");
            return;
        }

        use ClientEvent::*;
        match event {
            RegisterUser(username) => self.register_user(id, &username),
            JoinRoom(room) => self.join_room(id, &room),
            CreateGroup(group) => self.create_group(&group),
            SendMessage(msg) => self.send_message(msg),
            Typing(signal) => self.typing(id, signal),
            StopTyping(room) => self.stop_typing(id, room),
        }
    }

    fn register_user(&mut self, id: ConnectionId, username: &str) {
        if !self.presence.register(username, id) {
            return;
        }
        self.switchboard.attach(id, username);
        info!(%id, username, "user registered");

        self.broadcast_presence();
    }

    fn join_room(&mut self, id: ConnectionId, room: &str) {
        self.switchboard.subscribe(id, room);
        info!(%id, room, "joined room");

        // Anonymous sockets still hear the room but don't count as members.
        if let Some(username) = self.switchboard.username_of(id) {
            self.members.join(room, username);
        }
    }

    fn create_group(&mut self, group: &str) {
        if self.groups.create(group) {
            info!(group, "group created");
        }
        self.switchboard
            .broadcast(&ServerEvent::GroupsList(self.groups.snapshot()));
    }

    pub(crate) fn broadcast_presence(&self) {
        self.switchboard
            .broadcast(&ServerEvent::OnlineUsers(self.presence.usernames()));
    }
}
