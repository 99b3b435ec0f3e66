//! Wire protocol for the realtime gateway. Event names and payload
//! shapes are the contract with the frontend.
//!
//! Client -> Server (JSON):
//! ```json
//! {"event": "join", "data": {"friend_id": 7}}
//! {"event": "type_message", "data": {"friend_id": 7}}
//! {"event": "send_message", "data": {"friend_id": 7, "body": "hi"}}
//! ```
//!
//! Server -> Client (JSON):
//! ```json
//! {"event": "history", "data": {"messages": [{"id": 1, "sender_id": 7, "body": "hi", "created_at": "..."}]}}
//! {"event": "type_message", "data": {"sender_id": 7}}
//! {"event": "message", "data": {"id": 2, "body": "hi", "created_at": "...", "sender_id": 7}}
//! ```

use serde::{Deserialize, Serialize};

use crate::models::message::Message;
use crate::types::{MessageId, UserId};

#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    Join { friend_id: i64 },
    TypeMessage { friend_id: i64 },
    SendMessage { friend_id: i64, body: String },
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    History { messages: Vec<HistoryMessage> },
    TypeMessage { sender_id: UserId },
    Message {
        id: MessageId,
        body: String,
        /// ISO-8601, as stored.
        created_at: String,
        sender_id: UserId,
    },
}

/// One backfilled message inside a `history` event. The receiver id is
/// implied by the room and not repeated on the wire.
#[derive(Debug, Serialize)]
pub struct HistoryMessage {
    pub id: MessageId,
    pub sender_id: UserId,
    pub body: String,
    pub created_at: String,
}

impl From<Message> for HistoryMessage {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            body: message.body,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}
