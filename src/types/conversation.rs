//! Conversation types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;

/// Preview shown for a conversation whose last message is an image
pub const PHOTO_PREVIEW: &str = "📷 Foto";

/// Preview shown for a conversation whose last message was deleted for everyone
pub const DELETED_PREVIEW: &str = "🚫 Mensaje eliminado";

/// A chat with one contact or a group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub avatar: String,
    #[serde(default)]
    pub is_group: bool,
    /// Member names, only present for groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub unread: u32,
    /// Denormalized preview of the last message
    #[serde(default)]
    pub last_message: String,
    /// Time of the last message, or creation time while empty
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty one-to-one conversation
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        avatar: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
            is_group: false,
            participants: None,
            is_favorite: false,
            unread: 0,
            last_message: String::new(),
            timestamp: created_at,
            messages: Vec::new(),
        }
    }

    pub fn find_message(&self, message_id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == message_id)
    }

    /// Recompute `last_message` and `timestamp` from the message sequence.
    ///
    /// An empty sequence clears the preview but keeps the previous timestamp.
    pub fn refresh_summary(&mut self) {
        match self.messages.last() {
            Some(last) => {
                self.last_message = preview_of(last);
                self.timestamp = last.timestamp;
            }
            None => self.last_message.clear(),
        }
    }
}

/// Preview text for a message as shown in the chat list
pub fn preview_of(message: &Message) -> String {
    if message.is_deleted {
        DELETED_PREVIEW.to_string()
    } else if message.image.is_some() && message.text.is_empty() {
        PHOTO_PREVIEW.to_string()
    } else {
        message.text.clone()
    }
}
