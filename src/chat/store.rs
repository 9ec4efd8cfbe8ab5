//! Conversation store
//!
//! Owns the ordered conversation list, applies mutations and writes the
//! whole list back to its key-value slot after each one.

use chrono::Utc;
use uuid::Uuid;

use crate::chat::seed::seed_conversations;
use crate::storage::settings::AppSettings;
use crate::storage::{KeyValueStore, StorageError};
use crate::types::{Conversation, DeleteMode, Message};

/// Caller-side rule for new conversation names
pub fn is_valid_conversation_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// In-memory conversation list with write-through persistence
#[derive(Debug)]
pub struct ChatStore<S: KeyValueStore> {
    slots: S,
    key: String,
    local_user_label: String,
    avatar_base_url: String,
    conversations: Vec<Conversation>,
}

impl<S: KeyValueStore> ChatStore<S> {
    /// Open the store, restoring the persisted list or seeding a fresh one.
    ///
    /// A snapshot that fails to parse is discarded in favour of the seed.
    pub fn open(slots: S, settings: &AppSettings) -> Result<Self, StorageError> {
        let key = settings.chats_key.clone();
        let restored = match slots.get(&key)? {
            Some(json) => match serde_json::from_str::<Vec<Conversation>>(&json) {
                Ok(conversations) => Some(conversations),
                Err(e) => {
                    tracing::warn!("Discarding unreadable snapshot in '{}': {}", key, e);
                    None
                }
            },
            None => None,
        };

        let mut store = Self {
            slots,
            key,
            local_user_label: settings.local_user_label.clone(),
            avatar_base_url: settings.avatar_base_url.clone(),
            conversations: Vec::new(),
        };

        match restored {
            Some(conversations) => {
                tracing::info!("Restored {} conversations", conversations.len());
                store.conversations = conversations;
            }
            None => {
                store.conversations = seed_conversations(Utc::now());
                tracing::info!("Seeded {} conversations", store.conversations.len());
                store.persist()?;
            }
        }

        Ok(store)
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    fn conversation_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// Serialized form of the whole list, as written to the slot
    pub fn snapshot(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(&self.conversations)?)
    }

    /// Give back the underlying slots
    pub fn into_slots(self) -> S {
        self.slots
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let json = self.snapshot()?;
        self.slots.set(&self.key, &json)
    }

    fn avatar_for(&self, name: &str) -> String {
        url::Url::parse_with_params(
            &self.avatar_base_url,
            &[("name", name), ("background", "random")],
        )
        .map(|url| url.to_string())
        .unwrap_or_else(|_| format!("{}?name={}&background=random", self.avatar_base_url, name))
    }

    /// Start an empty conversation and put it at the top of the list.
    ///
    /// Returns the new conversation's id.
    pub fn create_conversation(&mut self, name: &str) -> Result<String, StorageError> {
        let id = Uuid::new_v4().to_string();
        let conversation = Conversation::new(id.clone(), name, self.avatar_for(name), Utc::now());

        self.conversations.insert(0, conversation);
        self.persist()?;

        tracing::debug!("Created conversation {} ({})", id, name);
        Ok(id)
    }

    /// Append a message from the local user. Unknown ids are ignored.
    pub fn send_message(
        &mut self,
        conversation_id: &str,
        text: &str,
        image: Option<String>,
    ) -> Result<(), StorageError> {
        let sender = self.local_user_label.clone();
        let Some(conversation) = self.conversation_mut(conversation_id) else {
            tracing::debug!("send_message: no conversation {}", conversation_id);
            return Ok(());
        };

        let message = Message::outgoing(sender, text, image, Utc::now());
        tracing::debug!("Sending message {} to {}", message.id, conversation_id);
        conversation.messages.push(message);
        conversation.refresh_summary();

        self.persist()
    }

    /// Reset the unread counter. Unknown ids are ignored.
    pub fn mark_read(&mut self, conversation_id: &str) -> Result<(), StorageError> {
        let Some(conversation) = self.conversation_mut(conversation_id) else {
            tracing::debug!("mark_read: no conversation {}", conversation_id);
            return Ok(());
        };

        if conversation.unread == 0 {
            return Ok(());
        }
        conversation.unread = 0;

        self.persist()
    }

    /// Delete a message for the local user or for everyone.
    ///
    /// Unknown conversation or message ids are ignored.
    pub fn delete_message(
        &mut self,
        conversation_id: &str,
        message_id: &str,
        mode: DeleteMode,
    ) -> Result<(), StorageError> {
        let Some(conversation) = self.conversation_mut(conversation_id) else {
            tracing::debug!("delete_message: no conversation {}", conversation_id);
            return Ok(());
        };
        let Some(index) = conversation.messages.iter().position(|m| m.id == message_id) else {
            tracing::debug!(
                "delete_message: no message {} in {}",
                message_id,
                conversation_id
            );
            return Ok(());
        };

        match mode {
            DeleteMode::Everyone => conversation.messages[index].tombstone(),
            DeleteMode::Me => {
                conversation.messages.remove(index);
            }
        }
        conversation.refresh_summary();

        tracing::debug!("Deleted message {} ({:?})", message_id, mode);
        self.persist()
    }
}
