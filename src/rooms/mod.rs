mod membership;
mod msg;
mod typing;
mod ws;

use axum::{routing::get, Router};

use crate::AppState;

pub use membership::RoomMembership;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::room_ws))
}

/// How a room name is read. Names of the form `<userA>_<userB>` are private
/// two-party conversations, split on the first underscore; anything else is
/// a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomKind<'a> {
    Group(&'a str),
    Direct(&'a str, &'a str),
}

impl<'a> RoomKind<'a> {
    pub fn of(name: &'a str) -> Self {
        match name.split_once('_') {
            Some((a, b)) => RoomKind::Direct(a, b),
            None => RoomKind::Group(name),
        }
    }

    /// The other party of a private room, seen from `author`.
    ///
    /// `None` for groups, for authors who are not one of the two parties, and
    /// for a room pairing a user with themselves.
    pub fn counterpart(&self, author: &str) -> Option<&'a str> {
        match *self {
            RoomKind::Group(_) => None,
            RoomKind::Direct(a, b) if a == author && b != author => Some(b),
            RoomKind::Direct(a, b) if b == author && a != author => Some(a),
            RoomKind::Direct(..) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_names_have_no_underscore() {
        assert_eq!(RoomKind::of("Global Chat"), RoomKind::Group("Global Chat"));
        assert_eq!(RoomKind::of("Global Chat").counterpart("alice"), None);
    }

    #[test]
    fn direct_room_counterpart() {
        let kind = RoomKind::of("alice_bob");
        assert_eq!(kind, RoomKind::Direct("alice", "bob"));
        assert_eq!(kind.counterpart("alice"), Some("bob"));
        assert_eq!(kind.counterpart("bob"), Some("alice"));
    }

    #[test]
    fn stranger_has_no_counterpart() {
        assert_eq!(RoomKind::of("alice_bob").counterpart("mallory"), None);
    }

    #[test]
    fn self_room_has_no_counterpart() {
        assert_eq!(RoomKind::of("alice_alice").counterpart("alice"), None);
    }

    #[test]
    fn splits_on_first_underscore() {
        assert_eq!(RoomKind::of("a_b_c"), RoomKind::Direct("a", "b_c"));
        assert_eq!(RoomKind::of("a_b_c").counterpart("a"), Some("b_c"));
        assert_eq!(RoomKind::of("a_b_c").counterpart("a_b"), None);
    }
}
