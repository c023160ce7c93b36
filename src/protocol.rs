// Wire protocol
//
// Every frame is one JSON object, adjacently tagged:
// `{"event": "send_message", "data": {"room": "..", "author": "..", "message": ".."}}`.
// Event names match the ones the browser client already speaks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A chat message as it travels in both directions.
///
/// Fields the server does not know about (a client-side `time`, say) are
/// kept in `extra` and relayed untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub room: String,
    pub author: String,
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    pub fn new(
        room: impl Into<String>,
        author: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            room: room.into(),
            author: author.into(),
            message: message.into(),
            extra: Map::new(),
        }
    }
}

/// Someone is typing in a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingSignal {
    pub username: String,
    pub room: String,
}

/// Events a client sends to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    RegisterUser(String),
    JoinRoom(String),
    CreateGroup(String),
    SendMessage(ChatMessage),
    Typing(TypingSignal),
    StopTyping(String),
}

/// Events the server pushes to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    GroupsList(Vec<String>),
    OnlineUsers(Vec<String>),
    ReceiveMessage(ChatMessage),
    Typing(TypingSignal),
    StopTyping(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed event: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("`{event}` event with empty `{field}`")]
    EmptyField {
        event: &'static str,
        field: &'static str,
    },
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        use ClientEvent::*;
        match self {
            RegisterUser(_) => "register_user",
            JoinRoom(_) => "join_room",
            CreateGroup(_) => "create_group",
            SendMessage(_) => "send_message",
            Typing(_) => "typing",
            StopTyping(_) => "stop_typing",
        }
    }

    /// Every required field must be non-empty. Clients expect such events to
    /// be ignored rather than answered with an error.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        use ClientEvent::*;
        let fields: Vec<(&'static str, &str)> = match self {
            RegisterUser(username) => vec![("username", username.as_str())],
            JoinRoom(room) => vec![("roomName", room.as_str())],
            CreateGroup(group) => vec![("groupName", group.as_str())],
            SendMessage(msg) => vec![
                ("room", msg.room.as_str()),
                ("author", msg.author.as_str()),
                ("message", msg.message.as_str()),
            ],
            Typing(signal) => vec![
                ("username", signal.username.as_str()),
                ("room", signal.room.as_str()),
            ],
            StopTyping(room) => vec![("room", room.as_str())],
        };

        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some(&(field, _)) => Err(ProtocolError::EmptyField {
                event: self.name(),
                field,
            }),
            None => Ok(()),
        }
    }
}

/// Decode and validate one inbound frame.
pub fn decode(frame: &[u8]) -> Result<ClientEvent, ProtocolError> {
    let event: ClientEvent = serde_json::from_slice(frame)?;
    event.validate()?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_send_message() {
        let frame = json!({
            "event": "send_message",
            "data": { "room": "alice_bob", "author": "alice", "message": "hi" }
        });
        let event = decode(frame.to_string().as_bytes()).unwrap();
        assert_eq!(
            event,
            ClientEvent::SendMessage(ChatMessage::new("alice_bob", "alice", "hi"))
        );
    }

    #[test]
    fn unknown_message_fields_are_relayed() {
        let frame = json!({
            "event": "send_message",
            "data": { "room": "g", "author": "alice", "message": "hi", "time": "12:30" }
        });
        let ClientEvent::SendMessage(msg) = decode(frame.to_string().as_bytes()).unwrap() else {
            panic!("expected send_message");
        };
        assert_eq!(msg.extra.get("time"), Some(&json!("12:30")));

        let json = serde_json::to_value(ServerEvent::ReceiveMessage(msg)).unwrap();
        assert_eq!(
            json,
            json!({
                "event": "receive_message",
                "data": { "room": "g", "author": "alice", "message": "hi", "time": "12:30" }
            })
        );
    }

    #[test]
    fn decodes_bare_string_payloads() {
        let event = decode(br#"{"event":"stop_typing","data":"g"}"#).unwrap();
        assert_eq!(event, ClientEvent::StopTyping("g".to_string()));

        let event = decode(br#"{"event":"register_user","data":"alice"}"#).unwrap();
        assert_eq!(event, ClientEvent::RegisterUser("alice".to_string()));
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = decode(br#"{"event":"send_message","data":{"room":"g","author":"a"}}"#)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));

        let err = decode(br#"{"event":"register_user"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn unknown_event_is_malformed() {
        let err = decode(br#"{"event":"shout","data":"x"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::Malformed(_)));
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = decode(br#"{"event":"typing","data":{"username":"","room":"g"}}"#).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::EmptyField { event: "typing", field: "username" }
        ));

        let err = decode(br#"{"event":"join_room","data":""}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::EmptyField { field: "roomName", .. }));
    }

    #[test]
    fn server_events_use_client_event_names() {
        let json = serde_json::to_value(ServerEvent::OnlineUsers(vec!["alice".to_string()])).unwrap();
        assert_eq!(json, json!({ "event": "online_users", "data": ["alice"] }));

        let json = serde_json::to_value(ServerEvent::StopTyping("g".to_string())).unwrap();
        assert_eq!(json, json!({ "event": "stop_typing", "data": "g" }));
    }
}
