use std::collections::{HashMap, HashSet};

/// Which usernames have explicitly joined which rooms.
///
/// This is separate from transport subscriptions: the router needs to know
/// whether the other side of a private room has acknowledged it, not just
/// whether some socket happens to be listening.
#[derive(Debug, Default)]
pub struct RoomMembership {
    rooms: HashMap<String, HashSet<String>>,
}

impl RoomMembership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(&mut self, room: &str, username: &str) -> bool {
        if room.is_empty() || username.is_empty() {
            return false;
        }
        self.rooms
            .entry(room.to_owned())
            .or_default()
            .insert(username.to_owned())
    }

    /// Members of `room`; empty for rooms nobody is in.
    pub fn members_of(&self, room: &str) -> HashSet<&str> {
        self.rooms
            .get(room)
            .map(|members| members.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_member(&self, room: &str, username: &str) -> bool {
        self.rooms
            .get(room)
            .is_some_and(|members| members.contains(username))
    }

    /// Drop `username` from every room, deleting rooms left empty.
    /// Returns how many rooms it was removed from.
    pub fn leave_all(&mut self, username: &str) -> usize {
        let mut left = 0;
        self.rooms.retain(|_, members| {
            if members.remove(username) {
                left += 1;
            }
            !members.is_empty()
        });
        left
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
