use tracing::debug;

use crate::hub::HubState;
use crate::protocol::{ChatMessage, ServerEvent};

use super::RoomKind;

impl HubState {
    /// Fan a message out to the room, then make sure the other side of a
    /// private room gets it even if they never joined it.
    pub(crate) fn send_message(&mut self, msg: ChatMessage) {
        let fallback = RoomKind::of(&msg.room)
            .counterpart(&msg.author)
            .filter(|other| !self.members.is_member(&msg.room, other))
            .and_then(|other| self.presence.lookup(other));

        let room = msg.room.clone();
        let event = ServerEvent::ReceiveMessage(msg);
        self.switchboard.emit_room(&room, &event);

        if let Some(conn) = fallback {
            debug!(%room, %conn, "direct delivery to absent private party");
            self.switchboard.emit_to(conn, event);
        }
    }
}
