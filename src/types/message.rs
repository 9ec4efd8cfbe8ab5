//! Message types
//!
//! Defines chat message structures, delivery status and delete modes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{NoContext, Timestamp, Uuid};

/// Delivery status of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Stored locally
    Sent,
    /// Seen by the other side
    Read,
}

/// How a message should be deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Drop the message from this conversation entirely
    Me,
    /// Keep a tombstone in place of the message
    Everyone,
}

impl std::str::FromStr for DeleteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "me" => Ok(DeleteMode::Me),
            "everyone" => Ok(DeleteMode::Everyone),
            other => Err(format!("unknown delete mode: {other}")),
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    /// Display name of the author
    pub sender: String,
    /// Whether the local user wrote this message
    pub is_me: bool,
    /// Text content, empty for pure image messages and tombstones
    #[serde(default)]
    pub text: String,
    /// Embedded image as a data URI
    #[serde(default)]
    pub image: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: MessageStatus,
    #[serde(default)]
    pub is_deleted: bool,
}

impl Message {
    /// Create a message written by the local user
    pub fn outgoing(
        sender: impl Into<String>,
        text: impl Into<String>,
        image: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            sender: sender.into(),
            is_me: true,
            text: text.into(),
            image,
            timestamp,
            status: MessageStatus::Sent,
            is_deleted: false,
        }
    }

    /// Time-ordered id for a message created at `at`.
    ///
    /// Sorts with ids produced for newer messages by [`Message::outgoing`].
    pub fn id_at(at: DateTime<Utc>) -> String {
        let secs = u64::try_from(at.timestamp()).unwrap_or(0);
        let ts = Timestamp::from_unix(NoContext, secs, at.timestamp_subsec_nanos());
        Uuid::new_v7(ts).to_string()
    }

    /// Create a message from another participant
    pub fn incoming(
        id: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            is_me: false,
            text: text.into(),
            image: None,
            timestamp,
            status: MessageStatus::Read,
            is_deleted: false,
        }
    }

    /// Turn the message into a tombstone. Content is dropped for good.
    pub fn tombstone(&mut self) {
        self.is_deleted = true;
        self.text.clear();
        self.image = None;
    }

    /// Only own messages that still carry content can be deleted for everyone
    pub fn can_delete_for_everyone(&self) -> bool {
        self.is_me && !self.is_deleted
    }

    /// Whether the message has searchable text
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}
