use crate::hub::{ConnectionId, HubState};
use crate::protocol::{ServerEvent, TypingSignal};

impl HubState {
    pub(crate) fn typing(&self, sender: ConnectionId, signal: TypingSignal) {
        let room = signal.room.clone();
        self.switchboard
            .emit_room_except(&room, sender, &ServerEvent::Typing(signal));
    }

    pub(crate) fn stop_typing(&self, sender: ConnectionId, room: String) {
        self.switchboard
            .emit_room_except(&room, sender, &ServerEvent::StopTyping(room.clone()));
    }
}
