//! Chat model types.

use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;

/// Sender id used for messages written by the current user.
pub const CURRENT_USER_ID: i64 = 0;

/// Unique identifier for a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(pub i64);

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Message id, unique within its conversation.
    pub id: i64,
    /// Author.
    pub sender_id: i64,
    /// Author display name.
    pub sender_name: String,
    /// Text.
    pub message: String,
    /// Display time ("10:42", "Yesterday").
    pub timestamp: String,
    /// Whether the current user wrote it.
    pub is_from_current_user: bool,
}

/// A conversation with a seller about one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConversation {
    /// Conversation id.
    pub id: ConversationId,
    /// Seller taking part.
    pub seller_id: i64,
    /// Seller display name.
    pub seller_name: String,
    /// Seller avatar.
    #[serde(default)]
    pub seller_avatar: String,
    /// Listing the conversation is about.
    pub item_id: ItemId,
    /// Listing title.
    pub item_title: String,
    /// Listing cover image.
    #[serde(default)]
    pub item_image: String,
    /// Text of the newest message.
    pub last_message: String,
    /// Display time of the newest message.
    pub last_message_time: String,
    /// Whether the current user has seen the newest message.
    pub is_read: bool,
    /// Messages, oldest first.
    pub messages: Vec<ChatMessage>,
}

impl ChatConversation {
    /// Id for the next message in this conversation.
    #[must_use]
    pub fn next_message_id(&self) -> i64 {
        self.messages.iter().map(|m| m.id).max().unwrap_or(0) + 1
    }

    /// Append a message and make it the conversation preview.
    pub fn push(&mut self, message: ChatMessage) {
        self.last_message.clone_from(&message.message);
        self.last_message_time.clone_from(&message.timestamp);
        self.is_read = message.is_from_current_user;
        self.messages.push(message);
    }
}

/// Payload of the conversations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ConversationsPayload {
    pub conversations: Vec<ChatConversation>,
}
